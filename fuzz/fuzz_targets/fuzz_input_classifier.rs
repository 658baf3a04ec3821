//! Fuzz target for format detection over opaque text.
//!
//! Goal: classification must **never panic** on any input blob (malformed
//! JSON, truncated base64, control characters, ...).
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_input_classifier
//! ```

#![no_main]

use credguard_domain::model::CredentialInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let cfg = credguard_settings::resolve_config(
            Default::default(),
            Default::default(),
        )
        .expect("default config resolves");

        let _ = credguard_domain::validate(
            &CredentialInput::Text(text.to_string()),
            &cfg.effective,
            None,
        );
    }
});
