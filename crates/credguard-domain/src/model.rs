use serde_json::Value;
use std::collections::BTreeMap;

/// Untyped credential input.
///
/// Callers hand the engine whatever they were given: an environment-style
/// mapping, a parsed JSON object, or an opaque text blob. Classification into
/// a concrete format happens inside the engine; nothing here is trusted.
#[derive(Clone, Debug, PartialEq)]
pub enum CredentialInput {
    /// A mapping of named fields (environment variables, object form, ...).
    Fields(BTreeMap<String, Value>),
    /// An opaque text blob (JSON, base64, or anything else).
    Text(String),
}

impl CredentialInput {
    /// Build an input from any JSON value. Never panics on shape.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => CredentialInput::Fields(map.into_iter().collect()),
            Value::String(text) => CredentialInput::Text(text),
            other => CredentialInput::Text(other.to_string()),
        }
    }

    /// Build an input from `NAME=value` style pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CredentialInput::Fields(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    /// A content-free description of the input's shape, for diagnostics.
    pub fn shape(&self) -> Value {
        match self {
            CredentialInput::Fields(fields) => {
                let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                serde_json::json!({ "type": "fields", "field_names": names })
            }
            CredentialInput::Text(text) => {
                serde_json::json!({ "type": "text", "length": text.len() })
            }
        }
    }
}

/// The `(raw_email, raw_key)` pair extracted by format detection, before any
/// normalization or validation has touched it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCredential {
    pub raw_email: String,
    pub raw_key: String,
}

/// A credential that survived extraction and normalization.
///
/// Post-validation invariant: `private_key_pem` holds exactly one PKCS#8 PEM
/// block and `email` matches the basic address grammar. Owned by the report
/// that produced it and never serialized into an external surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedCredential {
    pub email: String,
    pub private_key_pem: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_maps_objects_to_fields() {
        let input = CredentialInput::from_value(json!({"client_email": "a@b.cd"}));
        match input {
            CredentialInput::Fields(fields) => {
                assert_eq!(fields["client_email"], json!("a@b.cd"));
            }
            other => panic!("expected fields, got {other:?}"),
        }
    }

    #[test]
    fn from_value_keeps_strings_as_text() {
        let input = CredentialInput::from_value(json!("some blob"));
        assert_eq!(input, CredentialInput::Text("some blob".to_string()));
    }

    #[test]
    fn from_value_tolerates_odd_shapes() {
        // Numbers and arrays become opaque text and fail detection later,
        // never here.
        let _ = CredentialInput::from_value(json!(42));
        let _ = CredentialInput::from_value(json!([1, 2, 3]));
        let _ = CredentialInput::from_value(Value::Null);
    }

    #[test]
    fn shape_never_contains_values() {
        let input = CredentialInput::from_pairs([("GOOGLE_PRIVATE_KEY", "super-secret")]);
        let shape = input.shape().to_string();
        assert!(shape.contains("GOOGLE_PRIVATE_KEY"));
        assert!(!shape.contains("super-secret"));
    }
}
