//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Normalization idempotence and the base64 round trip
//! - Determinism of findings for identical input
//! - Robustness of detection against arbitrary text

use crate::engine::validate;
use crate::model::CredentialInput;
use crate::normalize::normalize_key;
use crate::test_support::{default_config, pkcs8_key, service_account_email};
use ::proptest::prelude::*;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use credguard_types::{Diagnostics, Finding};

/// Strategy for plausible key body lengths around the structural bounds.
fn arb_body_len() -> impl Strategy<Value = usize> {
    1550usize..2400
}

/// Strategy for the mangling a deployment platform typically applies.
#[derive(Clone, Debug)]
enum Mangling {
    None,
    EscapedNewlines,
    DoubleEscapedNewlines,
    Quoted,
    Base64,
    Crlf,
    Padded,
}

fn arb_mangling() -> impl Strategy<Value = Mangling> {
    prop_oneof![
        Just(Mangling::None),
        Just(Mangling::EscapedNewlines),
        Just(Mangling::DoubleEscapedNewlines),
        Just(Mangling::Quoted),
        Just(Mangling::Base64),
        Just(Mangling::Crlf),
        Just(Mangling::Padded),
    ]
}

fn mangle(key: &str, how: &Mangling) -> String {
    match how {
        Mangling::None => key.to_string(),
        Mangling::EscapedNewlines => key.replace('\n', "\\n"),
        Mangling::DoubleEscapedNewlines => key.replace('\n', "\\\\n"),
        Mangling::Quoted => format!("\"{key}\""),
        Mangling::Base64 => STANDARD.encode(key.as_bytes()),
        Mangling::Crlf => key.replace('\n', "\r\n"),
        Mangling::Padded => format!("  {key}\n\n"),
    }
}

fn normalize(text: &str) -> (Option<String>, Vec<Finding>, Diagnostics) {
    let mut out = Vec::new();
    let mut diag = Diagnostics::default();
    let result = normalize_key(text, &mut out, &mut diag);
    (result, out, diag)
}

proptest! {
    /// Any single mangling of a well-formed key normalizes back to it.
    #[test]
    fn mangled_keys_normalize_to_the_original(
        body_len in arb_body_len(),
        how in arb_mangling(),
    ) {
        let key = pkcs8_key(body_len);
        let mangled = mangle(&key, &how);
        let (result, _, _) = normalize(&mangled);
        prop_assert_eq!(result.as_deref(), Some(key.as_str()));
    }

    /// Re-running the pipeline on its own output fires nothing.
    #[test]
    fn normalization_is_idempotent(
        body_len in arb_body_len(),
        how in arb_mangling(),
    ) {
        let key = pkcs8_key(body_len);
        let (first, _, _) = normalize(&mangle(&key, &how));
        let first = first.expect("first pass succeeds");
        let (second, findings, diag) = normalize(&first);
        prop_assert_eq!(second.as_deref(), Some(first.as_str()));
        prop_assert!(findings.is_empty());
        prop_assert!(diag.transformations_applied.is_empty());
    }

    /// `normalize(base64(k)) == k` for any well-formed PEM `k`.
    #[test]
    fn base64_round_trip(body_len in arb_body_len()) {
        let key = pkcs8_key(body_len);
        let (result, _, diag) = normalize(&STANDARD.encode(key.as_bytes()));
        prop_assert_eq!(result.as_deref(), Some(key.as_str()));
        prop_assert_eq!(
            &diag.transformations_applied,
            &vec!["base64_decode".to_string()]
        );
    }

    /// Identical input always yields identical finding codes in identical
    /// order (timing excluded).
    #[test]
    fn validation_is_deterministic(
        body_len in arb_body_len(),
        how in arb_mangling(),
        email in prop_oneof![
            Just(service_account_email().to_string()),
            Just("ops@example.com".to_string()),
            Just("broken address".to_string()),
        ],
    ) {
        let key = mangle(&pkcs8_key(body_len), &how);
        let input = CredentialInput::from_pairs([
            ("client_email", email),
            ("private_key", key),
        ]);
        let cfg = default_config();
        let a = validate(&input, &cfg, None);
        let b = validate(&input, &cfg, None);

        let codes = |r: &crate::report::ValidationReport| {
            r.errors
                .iter()
                .chain(r.warnings.iter())
                .map(|f| f.code.clone())
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(codes(&a), codes(&b));
        prop_assert_eq!(a.valid, b.valid);
        prop_assert_eq!(a.verdict, b.verdict);
    }

    /// Arbitrary text never panics detection or normalization, and an
    /// invalid report never carries a credential.
    #[test]
    fn arbitrary_text_never_panics(text in ".{0,300}") {
        let report = validate(
            &CredentialInput::Text(text),
            &default_config(),
            None,
        );
        prop_assert_eq!(report.valid, report.errors.is_empty() && report.credential.is_some());
    }
}
