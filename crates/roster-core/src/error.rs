//! Error types for Roster core operations.
//!
//! This module defines well-structured error types using `thiserror` for
//! library-level errors, while higher-level code can use `anyhow` for
//! convenient error handling.

use crate::types::RecordId;
use thiserror::Error;

/// Result type alias using RosterError
pub type Result<T> = std::result::Result<T, RosterError>;

/// Core error types for Roster operations.
///
/// These errors represent specific failure modes that callers handle at the
/// boundary where they occur (a form field, an import row); none of them is
/// fatal to the session.
#[derive(Error, Debug)]
pub enum RosterError {
    // === Record Errors ===
    /// A candidate record violates a field-level or uniqueness rule
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// An operation referenced a record id no longer present
    #[error("record not found: {id}")]
    NotFound { id: RecordId },

    // === Import Errors ===
    /// An import row is missing a required column or has an unparseable value
    #[error("import row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    // === Configuration Errors ===
    /// Configuration file parsing failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RosterError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-row error for a 1-based input line
    pub fn malformed_row(line: usize, reason: impl Into<String>) -> Self {
        RosterError::MalformedRow {
            line,
            reason: reason.into(),
        }
    }

    /// Returns true if this error should be shown inline at a field or row
    /// rather than aborting the operation that produced it
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RosterError::Validation { .. }
                | RosterError::NotFound { .. }
                | RosterError::MalformedRow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        let err = RosterError::validation("email", "email is invalid");
        assert!(err.is_recoverable());

        let err = RosterError::malformed_row(3, "missing value for Name");
        assert!(err.is_recoverable());

        let err = RosterError::ConfigError {
            reason: "bad toml".to_string(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = RosterError::validation("contact_number", "contact number must be 10 digits");
        assert_eq!(
            err.to_string(),
            "invalid contact_number: contact number must be 10 digits"
        );

        let err = RosterError::malformed_row(7, "missing value for Team");
        assert_eq!(err.to_string(), "import row 7: missing value for Team");
    }
}
