//! Table error types.

use thiserror::Error;

use super::RowId;
use crate::schema::ValidationError;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised by table operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The row was rejected by the table's schema
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No row with the given id exists in the table
    #[error("row {0} not found")]
    RowNotFound(RowId),

    /// The column has no index
    #[error("no index on column '{0}'")]
    IndexNotFound(String),
}
