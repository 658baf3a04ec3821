use credguard_domain::policy::{
    CheckPolicy, DEFAULT_MAX_KEY_LENGTH, DEFAULT_MIN_KEY_LENGTH, EffectiveConfig, FailOn,
};
use credguard_types::{Severity, ids};
use std::collections::BTreeMap;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        "compat" => compat_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        min_key_length: DEFAULT_MIN_KEY_LENGTH,
        max_key_length: DEFAULT_MAX_KEY_LENGTH,
        test_authentication: false,
        strict_email: false,
        checks: default_checks(Severity::Error),
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Warning,
        max_findings: 200,
        min_key_length: DEFAULT_MIN_KEY_LENGTH,
        max_key_length: DEFAULT_MAX_KEY_LENGTH,
        test_authentication: false,
        strict_email: false,
        checks: default_checks(Severity::Warning),
    }
}

fn compat_profile() -> EffectiveConfig {
    // Compatibility mode keeps the structural rules as warnings by default.
    EffectiveConfig {
        profile: "compat".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        min_key_length: DEFAULT_MIN_KEY_LENGTH,
        max_key_length: DEFAULT_MAX_KEY_LENGTH,
        test_authentication: false,
        strict_email: false,
        checks: default_checks(Severity::Warning),
    }
}

fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    let mut m = BTreeMap::new();

    m.insert(
        ids::CHECK_KEY_STRUCTURE.to_string(),
        CheckPolicy::enabled(default_severity),
    );

    let mut email = CheckPolicy::enabled(default_severity);
    email.allow = vec![
        "*.iam.gserviceaccount.com".to_string(),
        "*.gserviceaccount.com".to_string(),
    ];
    m.insert(ids::CHECK_EMAIL.to_string(), email);

    m
}
