use serde_json::Value;
use thiserror::Error;

/// Caller misuse, as opposed to a classification outcome.
#[derive(Error, Debug, PartialEq)]
pub enum LicenseError {
    #[error("license must be a string, got {0}")]
    NotAString(&'static str),
}

/// Result of normalizing a raw declaration.
#[derive(Debug, PartialEq)]
pub enum Normalized {
    /// Absent, blank, or the literal `undefined` sentinel.
    Undefined,
    Text(String),
}

/// Collapse a declaration onto one trimmed line.
///
/// Every line-break sequence (`\r\n`, `\n`, `\r`) becomes a single space.
pub fn normalize(raw: Option<&str>) -> Normalized {
    let Some(raw) = raw else {
        return Normalized::Undefined;
    };

    if is_undefined_sentinel(raw) {
        return Normalized::Undefined;
    }

    let joined = raw.replace("\r\n", " ").replace(['\n', '\r'], " ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        Normalized::Undefined
    } else {
        Normalized::Text(trimmed.to_string())
    }
}

/// Extract the text out of a dynamically typed value.
///
/// `null` counts as undefined; anything that is not a string is rejected.
pub fn as_text(value: &Value) -> Result<Option<&str>, LicenseError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        Value::Bool(_) => Err(LicenseError::NotAString("boolean")),
        Value::Number(_) => Err(LicenseError::NotAString("number")),
        Value::Array(_) => Err(LicenseError::NotAString("array")),
        Value::Object(_) => Err(LicenseError::NotAString("object")),
    }
}

// The stringified form of a missing value, possibly hard-wrapped.
fn is_undefined_sentinel(raw: &str) -> bool {
    let stripped: String = raw.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
    stripped.trim() == "undefined"
}
