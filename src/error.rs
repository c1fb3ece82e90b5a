//! Custom error types for nextcheck
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for nextcheck operations
#[derive(Error, Debug)]
pub enum NextCheckError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The last pay date is missing or not a `YYYY-MM-DD` date
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The income store refused or failed to advance the last pay date
    #[error("Update failed{}: {message}", status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    UpdateFailed {
        status: Option<u16>,
        message: String,
    },

    /// Transport errors talking to the remote API
    #[error("HTTP error: {0}")]
    Http(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl NextCheckError {
    /// Create a "not found" error for income records
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an invalid-input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a failed advance
    pub fn is_update_failed(&self) -> bool {
        matches!(self, Self::UpdateFailed { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for NextCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NextCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for NextCheckError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for nextcheck operations
pub type NextCheckResult<T> = Result<T, NextCheckError>;
