//! Error types for Panelkit
//!
//! This module defines all error types used throughout the SDK. Uses
//! `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations.
//!
//! Most config failures never surface as errors: `load`/`save` report them
//! as a `false` result and log a warning. The one hard failure is asking a
//! registry for a file format nobody registered.

use thiserror::Error;

/// The primary error type for Panelkit operations.
#[derive(Error, Debug)]
pub enum PanelError {
    /// Configuration-related errors (bad paths, unresolvable settings, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// No file format registered under the requested name
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A file format failed to read or write its document
    #[error("Format error: {0}")]
    Format(String),

    /// Plugin identity errors (invalid plugin name, etc.)
    #[error("Invalid plugin: {0}")]
    InvalidPlugin(String),

    /// Web or console runner missing or failed
    #[error("Runner error: {0}")]
    Runner(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for Panelkit operations.
pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PanelError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported file format: yaml");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PanelError = io_err.into();
        assert!(matches!(err, PanelError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PanelError = json_err.into();
        assert!(matches!(err, PanelError::Json(_)));
    }

    #[test]
    fn test_runner_error_display() {
        let err = PanelError::Runner("Web application runner is not defined".to_string());
        assert_eq!(
            err.to_string(),
            "Runner error: Web application runner is not defined"
        );
    }
}
