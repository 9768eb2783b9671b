//! Error types for the logging facade and its backends
//!
//! None of these ever cross the emit boundary: the facade has no return
//! channel from a backend. They surface only from backend helper APIs.

use std::error::Error as StdError;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// An error attached to a facade via `with_error`.
///
/// Shared so that derived facades and emitted messages refer to the same
/// error value without requiring the error type to be `Clone`.
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Severity string outside the fixed five
    #[error("Invalid severity: '{value}'")]
    InvalidSeverity { value: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn invalid_severity(value: impl Into<String>) -> Self {
        LoggerError::InvalidSeverity {
            value: value.into(),
        }
    }
}
