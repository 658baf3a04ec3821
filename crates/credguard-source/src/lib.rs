//! Credential input acquisition.
//!
//! This crate is allowed to read the environment and the filesystem. It only
//! *collects* material into a `CredentialInput`; classification and
//! validation are the engine's job, so nothing here inspects values.

#![forbid(unsafe_code)]

use camino::Utf8Path;
use credguard_domain::model::CredentialInput;
use credguard_domain::{EMAIL_FIELDS, ENCODED_FIELDS, KEY_FIELDS};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Snapshot the process environment, filtered to recognized credential
/// variables. Unrelated variables are never read into the input.
pub fn from_env() -> CredentialInput {
    from_env_iter(std::env::vars())
}

/// Same as [`from_env`], over an explicit variable list.
pub fn from_env_iter<I>(vars: I) -> CredentialInput
where
    I: IntoIterator<Item = (String, String)>,
{
    let recognized: Vec<(String, String)> = vars
        .into_iter()
        .filter(|(name, _)| is_recognized_var(name))
        .collect();
    CredentialInput::from_pairs(recognized)
}

/// Read a credential file. The content may be JSON, base64, or anything else
/// the engine's detector understands; it is passed through opaquely.
pub fn load_file(path: &Utf8Path) -> Result<CredentialInput, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(CredentialInput::Text(text))
}

/// Wrap inline text (a CLI argument or stdin) as an opaque input.
pub fn from_text(text: impl Into<String>) -> CredentialInput {
    CredentialInput::Text(text.into())
}

fn is_recognized_var(name: &str) -> bool {
    EMAIL_FIELDS.contains(&name) || KEY_FIELDS.contains(&name) || ENCODED_FIELDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_snapshot_keeps_only_recognized_variables() {
        let input = from_env_iter(vars(&[
            ("GOOGLE_CLIENT_EMAIL", "svc@p.iam.gserviceaccount.com"),
            ("GOOGLE_PRIVATE_KEY", "pem"),
            ("PATH", "/usr/bin"),
            ("HOME", "/root"),
        ]));
        match input {
            CredentialInput::Fields(fields) => {
                assert_eq!(fields.len(), 2);
                assert!(fields.contains_key("GOOGLE_CLIENT_EMAIL"));
                assert!(!fields.contains_key("PATH"));
            }
            other => panic!("expected fields, got {other:?}"),
        }
    }

    #[test]
    fn empty_environment_yields_an_empty_mapping() {
        let input = from_env_iter(vars(&[("PATH", "/usr/bin")]));
        assert_eq!(
            input,
            CredentialInput::Fields(std::collections::BTreeMap::new())
        );
    }

    #[test]
    fn encoded_blob_variables_are_recognized() {
        let input = from_env_iter(vars(&[("GOOGLE_CREDENTIALS_BASE64", "blob")]));
        match input {
            CredentialInput::Fields(fields) => {
                assert!(fields.contains_key("GOOGLE_CREDENTIALS_BASE64"))
            }
            other => panic!("expected fields, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error_naming_the_path() {
        let err = load_file(Utf8Path::new("/nonexistent/cred.json")).expect_err("should fail");
        assert!(err.to_string().contains("/nonexistent/cred.json"));
    }
}
