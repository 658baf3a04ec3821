use crate::checks::utils;
use crate::policy::EffectiveConfig;
use credguard_types::{Finding, Severity, ids};
use serde_json::json;

/// Email checks: presence, a basic `local@domain.tld` grammar, and a
/// service-account domain warning driven by the check's allow globs.
///
/// The address itself may appear in messages (the caller already has it);
/// nothing else from the credential does.
pub fn run(raw_email: &str, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_EMAIL) else {
        return;
    };

    let email = raw_email.trim();
    if email.is_empty() {
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_EMAIL.to_string(),
            code: ids::CODE_MISSING_EMAIL.to_string(),
            message: "no service account email was supplied".to_string(),
            help: Some("Set the client email field alongside the private key.".to_string()),
            url: None,
            data: serde_json::Value::Null,
        });
        return;
    }

    if !is_valid_email(email, cfg.strict_email) {
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_EMAIL.to_string(),
            code: ids::CODE_INVALID_EMAIL_FORMAT.to_string(),
            message: format!("'{email}' is not a valid email address"),
            help: Some(
                "Service account emails look like name@project.iam.gserviceaccount.com."
                    .to_string(),
            ),
            url: None,
            data: json!({ "email": email }),
        });
        return;
    }

    let domain = email.rsplit('@').next().unwrap_or_default();
    let allow = utils::build_allowlist(&policy.allow);
    if !utils::is_allowed(allow.as_ref(), domain) {
        out.push(Finding {
            severity: Severity::Warning,
            check_id: ids::CHECK_EMAIL.to_string(),
            code: ids::CODE_NON_SERVICE_ACCOUNT_EMAIL.to_string(),
            message: format!("'{email}' does not look like a service account address"),
            help: Some(
                "Expected a domain matching one of the configured service-account patterns."
                    .to_string(),
            ),
            url: None,
            data: json!({ "domain": domain }),
        });
    }
}

/// The permissive grammar accepts anything shaped like `local@domain.tld`;
/// strict mode additionally constrains the character set.
fn is_valid_email(email: &str, strict: bool) -> bool {
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return false;
    }
    if !strict {
        return true;
    }

    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let domain_ok = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = domain
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    local_ok && domain_ok && tld_ok
}

#[cfg(test)]
mod grammar_tests {
    use super::is_valid_email;

    #[test]
    fn permissive_accepts_odd_but_shaped_addresses() {
        assert!(is_valid_email("svc@p.iam.gserviceaccount.com", false));
        assert!(is_valid_email("a+b@x.co", false));
        // Odd, but grammatically shaped; permissive mode lets it through.
        assert!(is_valid_email("we!rd@x.co", false));
    }

    #[test]
    fn permissive_rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email", false));
        assert!(!is_valid_email("@x.co", false));
        assert!(!is_valid_email("a@", false));
        assert!(!is_valid_email("a@nodot", false));
        assert!(!is_valid_email("a@x..co", false));
        assert!(!is_valid_email("a b@x.co", false));
        assert!(!is_valid_email("a@b@x.co", false));
    }

    #[test]
    fn strict_tightens_the_charset() {
        assert!(is_valid_email("svc-1@p.iam.gserviceaccount.com", true));
        assert!(!is_valid_email("we!rd@x.co", true));
        assert!(!is_valid_email("a@x.c0", true));
    }
}
