use credguard_types::Severity;
use std::collections::BTreeMap;

/// Structural length bounds applied when the config does not override them.
pub const DEFAULT_MIN_KEY_LENGTH: usize = 1600;
pub const DEFAULT_MAX_KEY_LENGTH: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

#[derive(Clone, Debug)]
pub struct CheckPolicy {
    pub enabled: bool,
    pub severity: Severity,
    pub allow: Vec<String>,
}

impl CheckPolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
            allow: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Info,
            allow: Vec::new(),
        }
    }
}

/// Fully-resolved engine configuration.
///
/// Everything the pipeline needs is in here; no step reads ambient state.
#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_findings: usize,
    pub min_key_length: usize,
    pub max_key_length: usize,
    /// Enables the optional authentication probe stage.
    pub test_authentication: bool,
    /// Tightens the email grammar (reserved strictness switch).
    pub strict_email: bool,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}
