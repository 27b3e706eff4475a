//! Text normalization for captured output fields
//!
//! Captured streams may arrive as text or as raw bytes. They are always
//! stored as text; invalid UTF-8 is replaced rather than rejected.

use crate::error::{Error, Result};
use serde_json::Value;

/// Input accepted by text-normalized fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Str(String),
    Bytes(Vec<u8>),
}

impl Text {
    /// Normalize to an owned string.
    pub fn into_string(self) -> String {
        match self {
            Text::Str(s) => s,
            Text::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => s,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
        }
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::Str(s)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::Str(s.to_string())
    }
}

impl From<Vec<u8>> for Text {
    fn from(b: Vec<u8>) -> Self {
        Text::Bytes(b)
    }
}

impl From<&[u8]> for Text {
    fn from(b: &[u8]) -> Self {
        Text::Bytes(b.to_vec())
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Interpret a JSON value as text input for `field`.
///
/// Strings are taken as-is and arrays of byte values are decoded; anything
/// else is a type error.
pub fn text_from_value(field: &str, value: &Value) -> Result<Text> {
    let type_error = || Error::InvalidFieldType {
        field: field.to_string(),
        found: value_kind(value),
    };

    match value {
        Value::String(s) => Ok(Text::Str(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|n| u8::try_from(n).ok())
                    .ok_or_else(type_error)
            })
            .collect::<Result<Vec<u8>>>()
            .map(Text::Bytes),
        _ => Err(type_error()),
    }
}

/// Like [`text_from_value`], but `null` means "absent".
pub fn optional_text_from_value(field: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        other => text_from_value(field, other).map(|t| Some(t.into_string())),
    }
}
