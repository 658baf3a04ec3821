use crate::fingerprint::key_fingerprint;
use crate::model::NormalizedCredential;
use credguard_types::{CredentialSummary, Diagnostics, Finding, Severity, Verdict};

#[derive(Clone, Debug, Default)]
pub struct SeverityCounts {
    pub info: u32,
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

/// Result of one `validate` call.
///
/// Constructed once per call and returned by value; nothing in here is shared
/// with engine state or other calls. Invariant:
/// `valid == errors.is_empty() && credential.is_some()`.
#[derive(Clone, Debug)]
pub struct ValidationReport {
    pub verdict: Verdict,
    pub valid: bool,
    pub credential: Option<NormalizedCredential>,
    /// Blocking findings, in discovery order.
    pub errors: Vec<Finding>,
    /// Non-blocking findings, in discovery order.
    pub warnings: Vec<Finding>,
    pub diagnostics: Diagnostics,
    pub counts: SeverityCounts,
    /// Findings discovered before `max_findings` truncation.
    pub findings_total: u32,
    pub truncated_reason: Option<String>,
}

impl ValidationReport {
    /// The externally-safe view of the credential: email, key length, and a
    /// SHA-256 fingerprint. Key material itself never leaves the report.
    pub fn credential_summary(&self) -> Option<CredentialSummary> {
        self.credential.as_ref().map(|c| CredentialSummary {
            email: c.email.clone(),
            key_length: c.private_key_pem.len() as u32,
            fingerprint: key_fingerprint(&c.private_key_pem),
        })
    }

    pub fn findings_emitted(&self) -> u32 {
        (self.errors.len() + self.warnings.len()) as u32
    }
}
