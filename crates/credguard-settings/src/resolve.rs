use crate::{model::CredguardConfigV1, presets};
use anyhow::Context;
use credguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use credguard_types::Severity;
use globset::Glob;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
    pub min_key_length: Option<u32>,
    pub max_key_length: Option<u32>,
    pub test_authentication: Option<bool>,
}

/// Wiring for the optional authentication probe; lives outside
/// `EffectiveConfig` because the engine never touches the network.
#[derive(Clone, Debug)]
pub struct ProbeSettings {
    pub token_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub probe: ProbeSettings,
}

pub fn resolve_config(
    cfg: CredguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }
    if let Some(min) = overrides.min_key_length.or(cfg.min_key_length) {
        effective.min_key_length = min as usize;
    }
    if let Some(max) = overrides.max_key_length.or(cfg.max_key_length) {
        effective.max_key_length = max as usize;
    }
    if effective.min_key_length > effective.max_key_length {
        anyhow::bail!(
            "min_key_length ({}) exceeds max_key_length ({})",
            effective.min_key_length,
            effective.max_key_length
        );
    }
    if let Some(test_auth) = overrides.test_authentication.or(cfg.test_authentication) {
        effective.test_authentication = test_auth;
    }
    if let Some(strict) = cfg.strict_mode {
        effective.strict_email = strict;
    }

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
        if !cc.allow.is_empty() {
            validate_allowlist(check_id, &cc.allow)?;
            entry.allow = cc.allow.clone();
        }
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    let probe = ProbeSettings {
        token_url: cfg.token_url.clone(),
        timeout_secs: cfg.probe_timeout_secs.unwrap_or(10),
    };

    Ok(ResolvedConfig { effective, probe })
}

fn validate_allowlist(check_id: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern)
            .with_context(|| format!("invalid allow glob for {check_id}: {pattern}"))?;
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
