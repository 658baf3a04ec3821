//! Fuzz target for the key normalization pipeline.
//!
//! Goal: `validate` must **never panic** on any key value. It may produce
//! findings, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_key_normalizer
//! ```

#![no_main]

use credguard_domain::model::CredentialInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let input = CredentialInput::from_pairs([
            ("client_email", "svc@p.iam.gserviceaccount.com"),
            ("private_key", text),
        ]);
        let cfg = credguard_settings::resolve_config(
            Default::default(),
            Default::default(),
        )
        .expect("default config resolves");

        let report = credguard_domain::validate(&input, &cfg.effective, None);
        // Invariant: a report is never valid without a credential.
        assert_eq!(
            report.valid,
            report.errors.is_empty() && report.credential.is_some()
        );
    }
});
