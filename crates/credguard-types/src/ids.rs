//! Stable identifiers for checks, finding codes, and pipeline step names.
//!
//! `check_id` is a dotted namespace. `code` is a SCREAMING_SNAKE discriminator
//! that callers can match on; codes never change meaning once shipped.

// Checks
pub const CHECK_CREDENTIAL_FORMAT: &str = "credential.format";
pub const CHECK_KEY_NORMALIZE: &str = "credential.key_normalize";
pub const CHECK_KEY_STRUCTURE: &str = "credential.key_structure";
pub const CHECK_EMAIL: &str = "credential.email";
pub const CHECK_AUTH_PROBE: &str = "credential.auth_probe";

// Codes: credential.format
pub const CODE_UNKNOWN_FORMAT: &str = "UNKNOWN_FORMAT";
pub const CODE_INVALID_JSON: &str = "INVALID_JSON";
pub const CODE_INCOMPLETE_JSON: &str = "INCOMPLETE_JSON";
pub const CODE_MISSING_EMAIL: &str = "MISSING_EMAIL";
pub const CODE_MISSING_PRIVATE_KEY: &str = "MISSING_PRIVATE_KEY";
pub const CODE_USING_ENCODED_VARIANT: &str = "USING_ENCODED_VARIANT";

// Codes: credential.key_normalize
pub const CODE_NULL_PRIVATE_KEY: &str = "NULL_PRIVATE_KEY";
pub const CODE_BASE64_DECODE_FAILED: &str = "BASE64_DECODE_FAILED";
pub const CODE_KEY_TRANSFORMED: &str = "KEY_TRANSFORMED";

// Codes: credential.key_structure
pub const CODE_MISSING_BEGIN_MARKER: &str = "MISSING_BEGIN_MARKER";
pub const CODE_MISSING_END_MARKER: &str = "MISSING_END_MARKER";
pub const CODE_KEY_TOO_SHORT: &str = "KEY_TOO_SHORT";
pub const CODE_KEY_TOO_LONG: &str = "KEY_TOO_LONG";
pub const CODE_INVALID_KEY_CONTENT: &str = "INVALID_KEY_CONTENT";
pub const CODE_FEW_KEY_LINES: &str = "FEW_KEY_LINES";
pub const CODE_WRONG_KEY_TYPE: &str = "WRONG_KEY_TYPE";
pub const CODE_CERTIFICATE_NOT_KEY: &str = "CERTIFICATE_NOT_KEY";

// Codes: credential.email
pub const CODE_INVALID_EMAIL_FORMAT: &str = "INVALID_EMAIL_FORMAT";
pub const CODE_NON_SERVICE_ACCOUNT_EMAIL: &str = "NON_SERVICE_ACCOUNT_EMAIL";

// Codes: credential.auth_probe
pub const CODE_AUTH_TEST_FAILED: &str = "AUTH_TEST_FAILED";
pub const CODE_AUTH_INVALID_GRANT: &str = "AUTH_INVALID_GRANT";
pub const CODE_AUTH_INVALID_KEY_MATERIAL: &str = "AUTH_INVALID_KEY_MATERIAL";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_UNEXPECTED_ERROR: &str = "UNEXPECTED_ERROR";

// Stage names recorded in `Diagnostics.validation_steps`.
pub const STEP_FORMAT_DETECTION: &str = "format_detection";
pub const STEP_KEY_NORMALIZATION: &str = "key_normalization";
pub const STEP_STRUCTURAL_VALIDATION: &str = "structural_validation";
pub const STEP_EMAIL_VALIDATION: &str = "email_validation";
pub const STEP_AUTH_PROBE: &str = "auth_probe";

// Transform step names recorded in `Diagnostics.transformations_applied`.
pub const TRANSFORM_BASE64_DECODE: &str = "base64_decode";
pub const TRANSFORM_UNESCAPE_NEWLINES: &str = "unescape_newlines";
pub const TRANSFORM_UNESCAPE_DOUBLE_NEWLINES: &str = "unescape_double_newlines";
pub const TRANSFORM_TRIM_WHITESPACE: &str = "trim_whitespace";
pub const TRANSFORM_STRIP_WRAPPING_QUOTES: &str = "strip_wrapping_quotes";
pub const TRANSFORM_JSON_STRING_UNESCAPE: &str = "json_string_unescape";
pub const TRANSFORM_NORMALIZE_LINE_ENDINGS: &str = "normalize_line_endings";
pub const TRANSFORM_FINAL_TRIM: &str = "final_trim";
