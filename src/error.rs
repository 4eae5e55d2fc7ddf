//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The expense file exists but could not be parsed
    #[error("Expense data is corrupt: {0}")]
    Corrupt(String),

    /// The expense file could not be written
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrackerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Soft errors are reported to the user without failing the process
    pub fn is_soft(&self) -> bool {
        self.is_not_found() || self.is_validation()
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
