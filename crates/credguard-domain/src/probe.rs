//! Contract for the optional authentication probe.
//!
//! Implementations live outside the engine (network transport, assertion
//! signing); the engine only maps outcomes to findings.

use crate::model::NormalizedCredential;

/// Classification of a failed token exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeFailureKind {
    /// The endpoint answered but produced no access token.
    NoToken,
    /// The credential was rejected as expired, revoked, or not yet active.
    InvalidGrant,
    /// The key material itself was rejected.
    InvalidKeyMaterial,
    /// The exchange request was structurally malformed.
    MalformedStructure,
    /// The endpoint was unreachable, timed out, or the probe was cancelled.
    TransportFailure,
}

impl ProbeFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeFailureKind::NoToken => "no_token",
            ProbeFailureKind::InvalidGrant => "invalid_grant",
            ProbeFailureKind::InvalidKeyMaterial => "invalid_key_material",
            ProbeFailureKind::MalformedStructure => "malformed_structure",
            ProbeFailureKind::TransportFailure => "transport_failure",
        }
    }
}

/// A failed probe. `detail` is a bounded, content-free description; the
/// engine truncates it before it reaches a finding.
#[derive(Clone, Debug)]
pub struct ProbeFailure {
    pub kind: ProbeFailureKind,
    pub detail: String,
}

/// Token exchange contract.
///
/// Implementations must honor their own timeout and cancellation; a failure
/// converts to findings and never crashes or corrupts a validation report.
pub trait TokenProbe {
    fn probe(&self, credential: &NormalizedCredential) -> Result<(), ProbeFailure>;
}
