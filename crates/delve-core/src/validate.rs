//! Shape checks for untyped values returned by the research engine.
//!
//! The engine speaks JSON, so every value it hands back is a
//! [`serde_json::Value`] until these checks turn it into a typed one.

use serde_json::Value;

use crate::errors::ValidationError;

/// JSON type name of a value, as reported in validation errors.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Require the written report to be text.
///
/// # Errors
///
/// Returns [`ValidationError::ReportNotText`] naming the observed type.
pub fn expect_report(value: Value) -> Result<String, ValidationError> {
    match value {
        Value::String(report) => Ok(report),
        other => Err(ValidationError::ReportNotText {
            observed: json_type_name(&other),
        }),
    }
}

/// Require the source list to be a sequence. An absent or null list is
/// treated as empty.
///
/// # Errors
///
/// Returns [`ValidationError::SourcesNotList`] naming the observed type.
pub fn expect_source_list(value: Option<Value>) -> Result<Vec<Value>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ValidationError::SourcesNotList {
            observed: json_type_name(&other),
        }),
    }
}

/// String form of a source URL entry, or `None` for empty entries
/// (null, false, zero, empty string, empty list, empty object).
#[must_use]
pub fn canonical_url(entry: &Value) -> Option<String> {
    match entry {
        Value::Null | Value::Bool(false) => None,
        Value::String(url) if url.is_empty() => None,
        Value::String(url) => Some(url.clone()),
        #[allow(clippy::float_cmp)]
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}
