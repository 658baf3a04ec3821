#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub check_id: Option<String>,
    pub code: String,
    pub message: String,
    pub help: Option<String>,
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableDiagnostics {
    pub detected_format: Option<String>,
    pub transformations_applied: Vec<String>,
    pub validation_steps: Vec<String>,
    pub elapsed_ms: u64,
}

/// The externally-safe credential view: no key material, ever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableCredential {
    pub email: String,
    pub key_length: u32,
    pub fingerprint: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub findings_emitted: u32,
    pub findings_total: u32,
    pub truncated_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub valid: bool,
    pub errors: Vec<RenderableFinding>,
    pub warnings: Vec<RenderableFinding>,
    pub diagnostics: RenderableDiagnostics,
    pub credential: Option<RenderableCredential>,
    pub data: RenderableData,
}
