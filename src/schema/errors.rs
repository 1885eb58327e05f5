//! Validation error types.
//!
//! Every validation failure names the offending column and carries a
//! closed reason variant, so callers can match on the exact cause.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, ValidationError>;

/// Reason a value or row failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationReason {
    /// A required column is absent from the row
    #[error("missing required column")]
    MissingColumn,

    /// The value's kind does not match the declared column type
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An integer value falls outside the declared inclusive bounds
    #[error("{value} out of bounds [{min}, {max}]")]
    OutOfBounds { value: i64, min: i64, max: i64 },

    /// An empty string where the column disallows it
    #[error("empty text not allowed")]
    EmptyText,
}

/// Validation failure for a single column
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column '{column}': {reason}")]
pub struct ValidationError {
    /// The offending column name
    pub column: String,
    /// Why the column was rejected
    pub reason: ValidationReason,
}

impl ValidationError {
    /// Create a missing required column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            reason: ValidationReason::MissingColumn,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self {
            column: column.into(),
            reason: ValidationReason::TypeMismatch { expected, actual },
        }
    }

    /// Create an out-of-bounds error
    pub fn out_of_bounds(column: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        Self {
            column: column.into(),
            reason: ValidationReason::OutOfBounds { value, min, max },
        }
    }

    /// Create an empty text error
    pub fn empty_text(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            reason: ValidationReason::EmptyText,
        }
    }
}
