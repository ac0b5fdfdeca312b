//! Error types for Fitlog core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Fitlog operations.
pub type Result<T> = std::result::Result<T, FitlogError>;

/// Core error type for Fitlog operations.
#[derive(Debug, Error)]
pub enum FitlogError {
    /// A set is missing a required measurement field, or a field is malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database file does not exist
    #[error("Database not found")]
    DatabaseNotFound,

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FitlogError {
    /// True when the error was raised before touching storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, FitlogError::Validation(_) | FitlogError::InvalidInput(_))
    }

    /// True for missing rows and a missing database file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FitlogError::NotFound(_) | FitlogError::DatabaseNotFound)
    }
}

impl From<rusqlite::Error> for FitlogError {
    fn from(err: rusqlite::Error) -> Self {
        FitlogError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for FitlogError {
    fn from(err: std::io::Error) -> Self {
        FitlogError::Storage(err.to_string())
    }
}
