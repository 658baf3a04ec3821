use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for credguard reports.
pub const SCHEMA_REPORT_V1: &str = "credguard.report.v1";

/// Severity is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// The input shape the format detector settled on for a run.
///
/// `Base64Text` means the credential payload was recovered by decoding a
/// whole base64 blob; when an encoded variable wins over a plain pair, the
/// recorded format is that of the payload actually used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DetectedFormat {
    EnvPairs,
    JsonText,
    ObjectPair,
    Base64Text,
    Unknown,
}

impl DetectedFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectedFormat::EnvPairs => "env_pairs",
            DetectedFormat::JsonText => "json_text",
            DetectedFormat::ObjectPair => "object_pair",
            DetectedFormat::Base64Text => "base64_text",
            DetectedFormat::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,
    pub message: String,

    /// Actionable remediation, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Check-specific structured payload (kept open-ended for forward compatibility).
    /// Must never carry raw key material.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

/// Per-call provenance: what the engine detected, transformed, and executed.
///
/// Built fresh for every `validate` call and owned by the returned report.
/// Storing this on long-lived engine state corrupts results under concurrent
/// use; nothing here may be shared across calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_format: Option<DetectedFormat>,
    /// Transform step names, in execution order.
    pub transformations_applied: Vec<String>,
    /// Validation stage names, in execution order. A disabled stage never
    /// appears here.
    pub validation_steps: Vec<String>,
    pub elapsed_ms: u64,
}

/// Summary of a credential that passed validation.
///
/// The key itself never leaves the engine; only its length and SHA-256
/// fingerprint do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CredentialSummary {
    pub email: String,
    pub key_length: u32,
    pub fingerprint: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Credguard-specific summary payload for the report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationData {
    pub profile: String,
    /// `true` iff no blocking finding fired and a normalized credential was
    /// produced.
    pub valid: bool,
    pub diagnostics: Diagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<CredentialSummary>,

    pub findings_total: u32,
    pub findings_emitted: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated_reason: Option<String>,
}

/// A generic report envelope.
///
/// Keeping this generic allows credguard to embed tool-specific data while
/// still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = ValidationData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    /// Blocking findings, in discovery order.
    pub errors: Vec<Finding>,
    /// Non-blocking findings, in discovery order.
    pub warnings: Vec<Finding>,
    pub data: TData,
}

pub type CredguardReport = ReportEnvelope<ValidationData>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finding_serialization_omits_empty_fields() {
        let finding = Finding {
            severity: Severity::Error,
            check_id: "credential.key_structure".to_string(),
            code: "KEY_TOO_SHORT".to_string(),
            message: "too short".to_string(),
            help: None,
            url: None,
            data: JsonValue::Null,
        };
        let value = serde_json::to_value(&finding).expect("serialize finding");
        assert_eq!(value["severity"], "error");
        assert_eq!(value["code"], "KEY_TOO_SHORT");
        assert!(value.get("help").is_none());
        assert!(value.get("url").is_none());
        assert!(value.get("data").is_none());
    }

    #[test]
    fn detected_format_serializes_snake_case() {
        let value = serde_json::to_value(DetectedFormat::Base64Text).expect("serialize format");
        assert_eq!(value, json!("base64_text"));
        assert_eq!(DetectedFormat::Base64Text.as_str(), "base64_text");
    }

    #[test]
    fn envelope_round_trips() {
        let report = CredguardReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "credguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: OffsetDateTime::UNIX_EPOCH,
            finished_at: OffsetDateTime::UNIX_EPOCH,
            verdict: Verdict::Pass,
            errors: Vec::new(),
            warnings: Vec::new(),
            data: ValidationData {
                profile: "strict".to_string(),
                valid: true,
                diagnostics: Diagnostics {
                    detected_format: Some(DetectedFormat::JsonText),
                    transformations_applied: vec!["base64_decode".to_string()],
                    validation_steps: vec!["format_detection".to_string()],
                    elapsed_ms: 3,
                },
                credential: Some(CredentialSummary {
                    email: "svc@demo.iam.gserviceaccount.com".to_string(),
                    key_length: 1704,
                    fingerprint: "SHA256:abcd".to_string(),
                }),
                findings_total: 0,
                findings_emitted: 0,
                truncated_reason: None,
            },
        };

        let text = serde_json::to_string(&report).expect("serialize envelope");
        let back: CredguardReport = serde_json::from_str(&text).expect("parse envelope");
        assert_eq!(back, report);
        assert!(!text.contains("private_key"));
    }
}
