//! Error types for the result model

use std::io;
use thiserror::Error;

/// Result type alias for result-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// A token could not be mapped to a status.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// A text field was assigned something that is neither text nor bytes.
    #[error("Field {field} expects text or bytes, got {found}")]
    InvalidFieldType { field: String, found: &'static str },

    /// A test or subtest path did not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A serialized mapping did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration file error or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidStatus("poop".to_string());
        assert_eq!(err.to_string(), "Invalid status: poop");

        let err = Error::InvalidFieldType {
            field: "err".to_string(),
            found: "number",
        };
        assert_eq!(err.to_string(), "Field err expects text or bytes, got number");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
