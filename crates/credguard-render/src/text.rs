use crate::{RenderableFinding, RenderableReport, RenderableVerdictStatus};

/// Render the human-readable validation report.
///
/// Layout: status line, diagnostics block, numbered errors (with suggestion
/// where present), numbered warnings, and the credential summary only when
/// the report is valid. Fully deterministic for a given report.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("credguard validation report\n");
    out.push_str("===========================\n");
    out.push_str(&format!(
        "Status: {}\n",
        if report.valid { "VALID" } else { "INVALID" }
    ));
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "pass",
        RenderableVerdictStatus::Warn => "warn",
        RenderableVerdictStatus::Fail => "fail",
    };
    out.push_str(&format!("Verdict: {verdict}\n\n"));

    out.push_str("Diagnostics:\n");
    out.push_str(&format!(
        "  detected format: {}\n",
        report.diagnostics.detected_format.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!(
        "  transformations: {}\n",
        join_or_none(&report.diagnostics.transformations_applied)
    ));
    out.push_str(&format!(
        "  steps: {}\n",
        join_or_none(&report.diagnostics.validation_steps)
    ));
    out.push_str(&format!("  elapsed: {} ms\n", report.diagnostics.elapsed_ms));

    if let Some(reason) = &report.data.truncated_reason {
        out.push_str(&format!("\nNote: {reason}\n"));
    }

    if !report.errors.is_empty() {
        out.push_str("\nErrors:\n");
        push_findings(&mut out, &report.errors);
    }
    if !report.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        push_findings(&mut out, &report.warnings);
    }

    if report.valid && let Some(credential) = &report.credential {
        out.push_str("\nCredential:\n");
        out.push_str(&format!("  email: {}\n", credential.email));
        out.push_str(&format!("  key length: {} chars\n", credential.key_length));
        out.push_str(&format!("  fingerprint: {}\n", credential.fingerprint));
    }

    out
}

fn push_findings(out: &mut String, findings: &[RenderableFinding]) {
    for (i, f) in findings.iter().enumerate() {
        out.push_str(&format!("  {}. [{}] {}\n", i + 1, f.code, f.message));
        if let Some(help) = &f.help {
            out.push_str(&format!("     suggestion: {help}\n"));
        }
        if let Some(url) = &f.url {
            out.push_str(&format!("     see: {url}\n"));
        }
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
