//! Custom error types for Fundwatch
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Fundwatch operations
#[derive(Error, Debug)]
pub enum FundError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Chat was submitted while the toggle is off or no credential is set
    #[error("Chat unavailable: {0}")]
    ChatUnavailable(String),
}

impl FundError {
    /// Create a validation error for a named input field
    pub fn invalid_field(field: &str, reason: impl std::fmt::Display) -> Self {
        Self::Validation(format!("{}: {}", field, reason))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from chat gating
    pub fn is_chat_unavailable(&self) -> bool {
        matches!(self, Self::ChatUnavailable(_))
    }
}

impl From<std::io::Error> for FundError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FundError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Fundwatch operations
pub type FundResult<T> = Result<T, FundError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FundError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_invalid_field() {
        let err = FundError::invalid_field("Branch size", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Validation error: Branch size: must be at least 1"
        );
        assert!(err.is_validation());
        assert!(!err.is_chat_unavailable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FundError = io_err.into();
        assert!(matches!(err, FundError::Io(_)));
    }
}
