use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Credguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Valid: {}\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict, report.valid, report.data.findings_emitted, report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if let Some(format) = &report.diagnostics.detected_format {
        out.push_str(&format!(
            "Detected format `{}`; transformations: {}.\n\n",
            format,
            if report.diagnostics.transformations_applied.is_empty() {
                "none".to_string()
            } else {
                format!("`{}`", report.diagnostics.transformations_applied.join("`, `"))
            }
        ));
    }

    if report.errors.is_empty() && report.warnings.is_empty() {
        out.push_str("No findings.\n");
    } else {
        out.push_str("## Findings\n\n");
        for f in report.errors.iter().chain(report.warnings.iter()) {
            let sev = match f.severity {
                RenderableSeverity::Info => "INFO",
                RenderableSeverity::Warning => "WARN",
                RenderableSeverity::Error => "ERROR",
            };
            out.push_str(&format!(
                "- [{}] `{}` / `{}` — {}\n",
                sev,
                f.check_id.as_deref().unwrap_or(""),
                f.code,
                f.message
            ));
            if let Some(help) = &f.help {
                out.push_str(&format!("  - help: {}\n", help));
            }
            if let Some(url) = &f.url {
                out.push_str(&format!("  - url: {}\n", url));
            }
        }
    }

    if report.valid && let Some(credential) = &report.credential {
        out.push_str(&format!(
            "\n## Credential\n\n- email: `{}`\n- key length: {} chars\n- fingerprint: `{}`\n",
            credential.email, credential.key_length, credential.fingerprint
        ));
    }

    out
}
