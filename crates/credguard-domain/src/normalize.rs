//! The key normalization pipeline.
//!
//! An ordered list of named, idempotent transform steps folded left to right.
//! Each step either changes the text, does nothing, or fails hard; every
//! fired step is recorded in the diagnostics and as a warning finding.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use credguard_types::{Diagnostics, Finding, Severity, ids};
use serde_json::json;

/// Fragment every PEM block shares; used as the "already PEM" precondition.
pub(crate) const PEM_MARKER_FRAGMENT: &str = "-----BEGIN";

/// Minimum length before a markerless string is treated as a base64 candidate.
const BASE64_CANDIDATE_MIN_LEN: usize = 64;

enum StepOutcome {
    Changed(String),
    Unchanged,
    Failed {
        code: &'static str,
        message: String,
        help: &'static str,
    },
}

struct TransformStep {
    name: &'static str,
    apply: fn(&str) -> StepOutcome,
}

/// Pipeline order is part of the contract: decoding must precede unescaping,
/// single-escape handling must precede double-escape residue cleanup, and
/// quote stripping must follow the outer trims.
const PIPELINE: &[TransformStep] = &[
    TransformStep {
        name: ids::TRANSFORM_BASE64_DECODE,
        apply: base64_decode,
    },
    TransformStep {
        name: ids::TRANSFORM_UNESCAPE_NEWLINES,
        apply: unescape_newlines,
    },
    TransformStep {
        name: ids::TRANSFORM_UNESCAPE_DOUBLE_NEWLINES,
        apply: unescape_double_newlines,
    },
    TransformStep {
        name: ids::TRANSFORM_TRIM_WHITESPACE,
        apply: trim_whitespace,
    },
    TransformStep {
        name: ids::TRANSFORM_STRIP_WRAPPING_QUOTES,
        apply: strip_wrapping_quotes,
    },
    TransformStep {
        name: ids::TRANSFORM_JSON_STRING_UNESCAPE,
        apply: json_string_unescape,
    },
    TransformStep {
        name: ids::TRANSFORM_NORMALIZE_LINE_ENDINGS,
        apply: normalize_line_endings,
    },
    TransformStep {
        name: ids::TRANSFORM_FINAL_TRIM,
        apply: final_trim,
    },
];

/// Run the pipeline. Returns canonical text, or `None` after pushing a
/// blocking finding.
pub(crate) fn normalize_key(
    raw_key: &str,
    out: &mut Vec<Finding>,
    diag: &mut Diagnostics,
) -> Option<String> {
    if raw_key.trim().is_empty() {
        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_KEY_NORMALIZE.to_string(),
            code: ids::CODE_NULL_PRIVATE_KEY.to_string(),
            message: "private key value is empty".to_string(),
            help: Some("Set the private key field to the key's full PEM text.".to_string()),
            url: None,
            data: serde_json::Value::Null,
        });
        return None;
    }

    let mut current = raw_key.to_string();
    for step in PIPELINE {
        match (step.apply)(&current) {
            StepOutcome::Unchanged => {}
            StepOutcome::Changed(next) => {
                diag.transformations_applied.push(step.name.to_string());
                out.push(Finding {
                    severity: Severity::Warning,
                    check_id: ids::CHECK_KEY_NORMALIZE.to_string(),
                    code: ids::CODE_KEY_TRANSFORMED.to_string(),
                    message: format!(
                        "private key required transformation '{}' before validation",
                        step.name
                    ),
                    help: None,
                    url: None,
                    data: json!({ "transformation": step.name }),
                });
                current = next;
            }
            StepOutcome::Failed {
                code,
                message,
                help,
            } => {
                out.push(Finding {
                    severity: Severity::Error,
                    check_id: ids::CHECK_KEY_NORMALIZE.to_string(),
                    code: code.to_string(),
                    message,
                    help: Some(help.to_string()),
                    url: None,
                    data: serde_json::Value::Null,
                });
                return None;
            }
        }
    }
    Some(current)
}

/// Whole-blob base64 decode. Runs at most once per call; a decoded blob that
/// still lacks a PEM marker is left for structural validation to report.
fn base64_decode(text: &str) -> StepOutcome {
    if text.contains(PEM_MARKER_FRAGMENT) {
        return StepOutcome::Unchanged;
    }
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() < BASE64_CANDIDATE_MIN_LEN {
        return StepOutcome::Unchanged;
    }
    match BASE64.decode(compact.as_bytes()) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(decoded) => StepOutcome::Changed(decoded),
            Err(_) => StepOutcome::Failed {
                code: ids::CODE_BASE64_DECODE_FAILED,
                message: "private key decoded from base64 to non-text content".to_string(),
                help: "Re-encode the PEM key with `base64 -w0 key.pem` and supply the output.",
            },
        },
        Err(_) => StepOutcome::Failed {
            code: ids::CODE_BASE64_DECODE_FAILED,
            message: "private key looks base64-encoded but does not decode".to_string(),
            help: "Re-encode the PEM key with `base64 -w0 key.pem` and supply the output.",
        },
    }
}

fn unescape_newlines(text: &str) -> StepOutcome {
    if text.contains("\\n") {
        StepOutcome::Changed(text.replace("\\n", "\n"))
    } else {
        StepOutcome::Unchanged
    }
}

/// A double-escaped key leaves a stray backslash in front of each real line
/// break once the single unescape has run; collapse it.
fn unescape_double_newlines(text: &str) -> StepOutcome {
    if text.contains("\\\n") {
        StepOutcome::Changed(text.replace("\\\n", "\n"))
    } else {
        StepOutcome::Unchanged
    }
}

fn trim_whitespace(text: &str) -> StepOutcome {
    let trimmed = text.trim();
    if trimmed.len() != text.len() {
        StepOutcome::Changed(trimmed.to_string())
    } else {
        StepOutcome::Unchanged
    }
}

/// Strips one symmetric pair of quotes wrapping the whole string. Embedded
/// quotes are never touched.
fn strip_wrapping_quotes(text: &str) -> StepOutcome {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return StepOutcome::Changed(text[1..text.len() - 1].to_string());
        }
    }
    StepOutcome::Unchanged
}

/// Reinterpret the text as a JSON string literal. Adopt the parse only when
/// it differs and reveals a PEM marker; anything else is not our escaping.
fn json_string_unescape(text: &str) -> StepOutcome {
    let wrapped = format!("\"{text}\"");
    match serde_json::from_str::<String>(&wrapped) {
        Ok(parsed) if parsed != text && parsed.contains(PEM_MARKER_FRAGMENT) => {
            StepOutcome::Changed(parsed)
        }
        _ => StepOutcome::Unchanged,
    }
}

fn normalize_line_endings(text: &str) -> StepOutcome {
    if text.contains("\r\n") {
        StepOutcome::Changed(text.replace("\r\n", "\n"))
    } else {
        StepOutcome::Unchanged
    }
}

fn final_trim(text: &str) -> StepOutcome {
    let trimmed = text.trim();
    if trimmed.len() != text.len() {
        StepOutcome::Changed(trimmed.to_string())
    } else {
        StepOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pkcs8_key;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;

    fn run(raw: &str) -> (Option<String>, Vec<Finding>, Diagnostics) {
        let mut out = Vec::new();
        let mut diag = Diagnostics::default();
        let result = normalize_key(raw, &mut out, &mut diag);
        (result, out, diag)
    }

    #[test]
    fn clean_pem_passes_untouched() {
        let key = pkcs8_key(1600);
        let (result, findings, diag) = run(&key);
        assert_eq!(result.as_deref(), Some(key.as_str()));
        assert!(findings.is_empty());
        assert!(diag.transformations_applied.is_empty());
    }

    #[test]
    fn empty_key_is_null_private_key() {
        let (result, findings, _) = run("   \n ");
        assert!(result.is_none());
        assert_eq!(findings[0].code, ids::CODE_NULL_PRIVATE_KEY);
    }

    #[test]
    fn base64_blob_is_decoded() {
        let key = pkcs8_key(1600);
        let blob = STANDARD.encode(key.as_bytes());
        let (result, _, diag) = run(&blob);
        assert_eq!(result.as_deref(), Some(key.as_str()));
        assert_eq!(
            diag.transformations_applied,
            vec![ids::TRANSFORM_BASE64_DECODE.to_string()]
        );
    }

    #[test]
    fn invalid_base64_is_a_hard_error() {
        let blob = "!!!not-base64-at-all!!!".repeat(8);
        let (result, findings, _) = run(&blob);
        assert!(result.is_none());
        assert_eq!(findings[0].code, ids::CODE_BASE64_DECODE_FAILED);
    }

    #[test]
    fn decoded_blob_without_marker_is_not_an_error_here() {
        // Downstream structural validation owns that failure.
        let blob = STANDARD.encode("x".repeat(90));
        let (result, findings, diag) = run(&blob);
        let text = result.expect("decode succeeds");
        assert!(!text.contains(PEM_MARKER_FRAGMENT));
        assert!(findings.iter().all(|f| f.code == ids::CODE_KEY_TRANSFORMED));
        assert!(
            diag.transformations_applied
                .contains(&ids::TRANSFORM_BASE64_DECODE.to_string())
        );
    }

    #[test]
    fn single_escaped_newlines_unescape() {
        let key = pkcs8_key(1600);
        let escaped = key.replace('\n', "\\n");
        let (result, _, diag) = run(&escaped);
        assert_eq!(result.as_deref(), Some(key.as_str()));
        assert!(
            diag.transformations_applied
                .contains(&ids::TRANSFORM_UNESCAPE_NEWLINES.to_string())
        );
    }

    #[test]
    fn double_escaped_newlines_unescape() {
        let key = pkcs8_key(1600);
        let escaped = key.replace('\n', "\\\\n");
        let (result, _, diag) = run(&escaped);
        assert_eq!(result.as_deref(), Some(key.as_str()));
        assert!(
            diag.transformations_applied
                .contains(&ids::TRANSFORM_UNESCAPE_DOUBLE_NEWLINES.to_string())
        );
    }

    #[test]
    fn wrapping_quotes_are_stripped() {
        let key = pkcs8_key(1600);
        let quoted = format!("\"{key}\"");
        let (result, _, diag) = run(&quoted);
        assert_eq!(result.as_deref(), Some(key.as_str()));
        assert!(
            diag.transformations_applied
                .contains(&ids::TRANSFORM_STRIP_WRAPPING_QUOTES.to_string())
        );
    }

    #[test]
    fn embedded_quotes_survive() {
        let text = format!("{}\"inner\"{}", pkcs8_key(800), "tail");
        let (result, _, diag) = run(&text);
        assert!(result.expect("normalized").contains("\"inner\""));
        assert!(
            !diag
                .transformations_applied
                .contains(&ids::TRANSFORM_STRIP_WRAPPING_QUOTES.to_string())
        );
    }

    #[test]
    fn crlf_normalizes_to_lf() {
        let key = pkcs8_key(1600);
        let crlf = key.replace('\n', "\r\n");
        let (result, _, diag) = run(&crlf);
        assert_eq!(result.as_deref(), Some(key.as_str()));
        assert!(
            diag.transformations_applied
                .contains(&ids::TRANSFORM_NORMALIZE_LINE_ENDINGS.to_string())
        );
    }

    #[test]
    fn every_fired_step_emits_a_warning() {
        let key = pkcs8_key(1600);
        let mangled = format!("  \"{}\"  ", key.replace('\n', "\\n"));
        let (result, findings, diag) = run(&mangled);
        assert!(result.is_some());
        let warned: Vec<&str> = findings
            .iter()
            .filter(|f| f.code == ids::CODE_KEY_TRANSFORMED)
            .map(|f| f.data["transformation"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(warned, diag.transformations_applied);
        // No warning ever carries key content.
        for f in &findings {
            assert!(!f.message.contains("BEGIN PRIVATE KEY"));
        }
    }

    #[test]
    fn pipeline_is_idempotent_on_its_own_output() {
        let key = pkcs8_key(1600);
        let mangled = format!("\"{}\"\r\n", key.replace('\n', "\\n"));
        let (first, _, _) = run(&mangled);
        let first = first.expect("first pass");
        let (second, findings, diag) = run(&first);
        assert_eq!(second.as_deref(), Some(first.as_str()));
        assert!(findings.is_empty());
        assert!(diag.transformations_applied.is_empty());
    }
}
