//! Claims domain errors

use serde_json::Value;
use thiserror::Error;

use core_kernel::PortError;

/// Extraction output that could not be shaped into a claim
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed claim at '{path}': expected {expected}, found {found}")]
pub struct MalformedClaimError {
    /// Dotted path of the offending value, `<root>` for the payload itself
    pub path: String,
    /// Shape the schema required
    pub expected: &'static str,
    /// Shape actually received
    pub found: String,
}

impl MalformedClaimError {
    pub fn new(path: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        Self {
            path: path.into(),
            expected,
            found: json_kind(found).to_string(),
        }
    }

    /// The model answered, but not with JSON at all
    pub fn unparsable(detail: impl Into<String>) -> Self {
        Self {
            path: "<root>".to_string(),
            expected: "a JSON object",
            found: detail.into(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error(transparent)]
    MalformedClaim(#[from] MalformedClaimError),

    #[error("Extraction service unavailable after {attempts} attempt(s): {cause}")]
    ExtractionUnavailable {
        attempts: u32,
        #[source]
        cause: PortError,
    },

    #[error("Claim processing exceeded the {timeout_ms}ms request timeout")]
    RequestTimeout { timeout_ms: u64 },

    #[error("Unknown claim field path: {0}")]
    UnknownFieldPath(String),
}
