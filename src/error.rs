//! Custom error types for Monthwise
//!
//! This module defines the error hierarchy for the budget ledger using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Monthwise operations
#[derive(Error, Debug)]
pub enum MonthwiseError {
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

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Transaction store query errors
    #[error("Query error: {0}")]
    Query(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A multi-step flow stopped after some of its steps were persisted
    #[error(
        "{flow} failed at '{failed_step}' after completing [{}]: {message}",
        .completed.join(", ")
    )]
    PartialWrite {
        flow: &'static str,
        completed: Vec<&'static str>,
        failed_step: &'static str,
        message: String,
    },
}

impl MonthwiseError {
    /// Create a "not found" error for budget categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for months
    pub fn month_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Month",
            identifier: identifier.into(),
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

    /// Check if the store was left with only part of a flow applied
    pub fn is_partial_write(&self) -> bool {
        matches!(self, Self::PartialWrite { .. })
    }
}

impl From<std::io::Error> for MonthwiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MonthwiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Monthwise operations
pub type MonthwiseResult<T> = Result<T, MonthwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MonthwiseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = MonthwiseError::category_not_found("Dining");
        assert_eq!(err.to_string(), "Category not found: Dining");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_partial_write_error() {
        let err = MonthwiseError::PartialWrite {
            flow: "reset",
            completed: vec!["replace categories"],
            failed_step: "delete rollovers",
            message: "disk full".into(),
        };
        assert_eq!(
            err.to_string(),
            "reset failed at 'delete rollovers' after completing [replace categories]: disk full"
        );
        assert!(err.is_partial_write());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MonthwiseError = io_err.into();
        assert!(matches!(err, MonthwiseError::Io(_)));
    }
}
