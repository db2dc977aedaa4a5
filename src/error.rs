//! Custom error types for Quincena
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Quincena operations
#[derive(Error, Debug)]
pub enum QuincenaError {
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
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

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

    /// Withdrawals and savings-funded operations exceeding the savings pool
    #[error("Insufficient savings: need {requested}, have {available}")]
    InsufficientFunds { requested: i64, available: i64 },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Backup errors
    #[error("Backup error: {0}")]
    Backup(String),
}

impl QuincenaError {
    /// Create a validation error
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
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

    /// Create a "not found" error for fixed payments
    pub fn fixed_payment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Fixed payment",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for loans
    pub fn loan_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Loan",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is an insufficient-funds decline
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for QuincenaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for QuincenaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Quincena operations
pub type QuincenaResult<T> = Result<T, QuincenaError>;
