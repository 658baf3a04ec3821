//! End-to-end CLI tests over the credential fixtures in `tests/fixtures/`.
//!
//! Each fixture directory holds one credential file. Tests run the binary
//! against it and assert on exit code and the emitted JSON report (verdict,
//! finding codes, diagnostics). Timing fields are scrubbed with
//! `credguard-test-util` where two runs are compared.

use assert_cmd::Command;
use credguard_test_util::normalize_nondeterministic;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a Command for the credguard binary.
#[allow(deprecated)]
fn credguard_cmd() -> Command {
    Command::cargo_bin("credguard").expect("credguard binary not found - run `cargo build` first")
}

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("credguard-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

/// Run `check --file` on a fixture and return (exit_code, report).
fn run_check_on_fixture(fixture: &str) -> (i32, Value) {
    let fixture_path = fixtures_dir().join(fixture);
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let output = credguard_cmd()
        .arg("check")
        .arg("--file")
        .arg(&fixture_path)
        .arg("--report-out")
        .arg(&report_path)
        .output()
        .expect("run command");

    let exit_code = output.status.code().unwrap_or(-1);
    let report_content = std::fs::read_to_string(&report_path).expect("read report");
    let report: Value = serde_json::from_str(&report_content).expect("parse report JSON");

    (exit_code, report)
}

fn error_codes(report: &Value) -> Vec<String> {
    report["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|f| f["code"].as_str().expect("code").to_string())
        .collect()
}

fn warning_codes(report: &Value) -> Vec<String> {
    report["warnings"]
        .as_array()
        .expect("warnings array")
        .iter()
        .map(|f| f["code"].as_str().expect("code").to_string())
        .collect()
}

// ============================================================================
// File fixtures
// ============================================================================

#[test]
fn fixture_valid_passes() {
    let (exit_code, report) = run_check_on_fixture("valid/credential.json");
    assert_eq!(exit_code, 0, "valid fixture should pass: {report}");
    assert_eq!(report["data"]["valid"], true);
    assert_eq!(report["verdict"], "pass");
    assert!(error_codes(&report).is_empty());
    assert_eq!(report["data"]["diagnostics"]["detected_format"], "json_text");
    assert_eq!(
        report["data"]["credential"]["email"],
        "svc@demo-project.iam.gserviceaccount.com"
    );
    let fingerprint = report["data"]["credential"]["fingerprint"]
        .as_str()
        .expect("fingerprint");
    assert!(fingerprint.starts_with("SHA256:"));
    // The key itself must never appear in the report.
    let raw = report.to_string();
    assert!(!raw.contains("BEGIN PRIVATE KEY"));
}

#[test]
fn fixture_wrong_key_type_fails_first_with_wrong_key_type() {
    let (exit_code, report) = run_check_on_fixture("wrong_key_type/credential.json");
    assert_eq!(exit_code, 2);
    assert_eq!(report["data"]["valid"], false);
    let codes = error_codes(&report);
    assert_eq!(codes[0], "WRONG_KEY_TYPE");
}

#[test]
fn fixture_short_key_reports_exact_length() {
    let fixture = fixtures_dir().join("short_key/credential.json");
    let content = std::fs::read_to_string(&fixture).expect("read fixture");
    let parsed: Value = serde_json::from_str(&content).expect("fixture json");
    let key_len = parsed["private_key"].as_str().expect("key").len();

    let (exit_code, report) = run_check_on_fixture("short_key/credential.json");
    assert_eq!(exit_code, 2);
    let short = report["errors"]
        .as_array()
        .expect("errors")
        .iter()
        .find(|f| f["code"] == "KEY_TOO_SHORT")
        .expect("KEY_TOO_SHORT finding");
    assert_eq!(short["data"]["actual_length"], key_len);
    assert_eq!(short["data"]["expected_min_length"], 1600);
}

#[test]
fn fixture_base64_blob_passes_with_base64_format() {
    let (exit_code, report) = run_check_on_fixture("base64_blob/credential.txt");
    assert_eq!(exit_code, 0, "base64 fixture should pass: {report}");
    assert_eq!(report["data"]["valid"], true);
    assert_eq!(
        report["data"]["diagnostics"]["detected_format"],
        "base64_text"
    );
}

#[test]
fn fixture_incomplete_json_fails() {
    let (exit_code, report) = run_check_on_fixture("incomplete/credential.json");
    assert_eq!(exit_code, 2);
    assert_eq!(error_codes(&report), vec!["INCOMPLETE_JSON".to_string()]);
}

#[test]
fn fixture_opaque_text_is_unknown_format() {
    let (exit_code, report) = run_check_on_fixture("opaque/credential.txt");
    assert_eq!(exit_code, 2);
    assert_eq!(error_codes(&report), vec!["UNKNOWN_FORMAT".to_string()]);
    // Short-circuit: only detection ran.
    assert_eq!(
        report["data"]["diagnostics"]["validation_steps"],
        serde_json::json!(["format_detection"])
    );
}

#[test]
fn identical_runs_produce_identical_reports_modulo_timing() {
    let (_, first) = run_check_on_fixture("wrong_key_type/credential.json");
    let (_, second) = run_check_on_fixture("wrong_key_type/credential.json");
    assert_eq!(
        normalize_nondeterministic(first),
        normalize_nondeterministic(second)
    );
}

// ============================================================================
// Environment input
// ============================================================================

#[test]
fn env_pair_with_escaped_newlines_validates() {
    let key = credguard_test_util::pkcs8_key(1600);
    let escaped = key.replace('\n', "\\n");

    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    credguard_cmd()
        .env("GOOGLE_CLIENT_EMAIL", "svc@demo-project.iam.gserviceaccount.com")
        .env("GOOGLE_PRIVATE_KEY", &escaped)
        .arg("check")
        .arg("--env")
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .success();

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["data"]["valid"], true);
    assert_eq!(report["data"]["diagnostics"]["detected_format"], "env_pairs");
    let transformations = report["data"]["diagnostics"]["transformations_applied"]
        .as_array()
        .expect("transformations");
    assert!(
        transformations
            .iter()
            .any(|t| t == "unescape_newlines")
    );
}

#[test]
fn encoded_env_variant_wins_over_wrong_plain_value() {
    let key = credguard_test_util::pkcs8_key(1600);
    let blob = credguard_test_util::base64_blob(&credguard_test_util::service_account_json(
        "svc@demo-project.iam.gserviceaccount.com",
        &key,
    ));

    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    credguard_cmd()
        .env("GOOGLE_CREDENTIALS_BASE64", &blob)
        .env("GOOGLE_PRIVATE_KEY", "this plain value is wrong and must never be used")
        .arg("check")
        .arg("--env")
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .success();

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["data"]["valid"], true);
    assert!(
        warning_codes(&report).contains(&"USING_ENCODED_VARIANT".to_string()),
        "expected USING_ENCODED_VARIANT in {report}"
    );
}

// ============================================================================
// Other subcommands and failure paths
// ============================================================================

#[test]
fn report_and_md_render_from_written_json() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let fixture_path = fixtures_dir().join("valid/credential.json");
    credguard_cmd()
        .arg("check")
        .arg("--file")
        .arg(&fixture_path)
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .success();

    credguard_cmd()
        .arg("report")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicates::str::contains("Status: VALID"));

    credguard_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicates::str::contains("Verdict: **PASS**"));
}

#[test]
fn annotations_render_errors() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let fixture_path = fixtures_dir().join("wrong_key_type/credential.json");
    credguard_cmd()
        .arg("check")
        .arg("--file")
        .arg(&fixture_path)
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(2);

    credguard_cmd()
        .arg("annotations")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicates::str::contains("::error::"));
}

#[test]
fn explain_known_code_prints_remediation() {
    credguard_cmd()
        .args(["explain", "WRONG_KEY_TYPE"])
        .assert()
        .success()
        .stdout(predicates::str::contains("openssl pkcs8"));
}

#[test]
fn explain_unknown_identifier_fails() {
    credguard_cmd()
        .args(["explain", "NOT_A_THING"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("Unknown check_id or code"));
}

#[test]
fn unreadable_input_file_writes_a_runtime_error_report() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    credguard_cmd()
        .arg("check")
        .arg("--file")
        .arg(temp_dir.path().join("missing.json"))
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(1);

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["errors"][0]["code"], "UNEXPECTED_ERROR");
    assert_eq!(report["verdict"], "fail");
}

#[test]
fn conflicting_input_sources_are_rejected() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    credguard_cmd()
        .arg("check")
        .arg("--env")
        .arg("--json")
        .arg("{}")
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(1)
        .stderr(predicates::str::contains("choose one input source"));
}
