use anyhow::Context;
use credguard_render::{
    RenderableCredential, RenderableData, RenderableDiagnostics, RenderableFinding,
    RenderableReport, RenderableSeverity, RenderableVerdictStatus,
};
use credguard_types::{
    CredguardReport, Diagnostics, Finding, ReportEnvelope, SCHEMA_REPORT_V1, Severity, ToolMeta,
    ValidationData, Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<CredguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if !schema.is_empty() && schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    let report: CredguardReport =
        serde_json::from_value(value).context("parse credguard report")?;
    Ok(report)
}

pub fn serialize_report(report: &CredguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &CredguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        valid: report.data.valid,
        errors: report.errors.iter().map(renderable_finding).collect(),
        warnings: report.warnings.iter().map(renderable_finding).collect(),
        diagnostics: renderable_diagnostics(&report.data.diagnostics),
        credential: report
            .data
            .credential
            .as_ref()
            .map(|c| RenderableCredential {
                email: c.email.clone(),
                key_length: c.key_length,
                fingerprint: c.fingerprint.clone(),
            }),
        data: RenderableData {
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: Some(f.check_id.clone()),
        code: f.code.clone(),
        message: f.message.clone(),
        help: f.help.clone(),
        url: f.url.clone(),
    }
}

fn renderable_diagnostics(d: &Diagnostics) -> RenderableDiagnostics {
    RenderableDiagnostics {
        detected_format: d.detected_format.map(|f| f.as_str().to_string()),
        transformations_applied: d.transformations_applied.clone(),
        validation_steps: d.validation_steps.clone(),
        elapsed_ms: d.elapsed_ms,
    }
}

/// An unexpected internal fault becomes a single-finding report: the engine
/// never lets a fault escape as anything but a well-formed envelope.
pub fn runtime_error_report(message: &str) -> CredguardReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "credguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        errors: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_UNEXPECTED_ERROR.to_string(),
            message: message.to_string(),
            help: Some("Fix the tool error and re-run credguard.".to_string()),
            url: None,
            data: serde_json::Value::Null,
        }],
        warnings: Vec::new(),
        data: ValidationData {
            profile: "unknown".to_string(),
            valid: false,
            diagnostics: Diagnostics::default(),
            credential: None,
            findings_total: 1,
            findings_emitted: 1,
            truncated_reason: None,
        },
    }
}
