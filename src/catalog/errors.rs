//! Catalog error types.

use thiserror::Error;

use crate::table::TableError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by the catalog and the name-addressed operation surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No database registered under the given name
    #[error("database not found: {0}")]
    DatabaseNotFound(String),

    /// A database with the given name already exists.
    ///
    /// Duplicate registrations are rejected rather than silently
    /// overwriting the existing namespace.
    #[error("database already exists: {0}")]
    DatabaseExists(String),

    /// No table registered under the given name
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// A table with the given name already exists
    #[error("table already exists: {0}")]
    TableExists(String),

    /// An error from the resolved table
    #[error(transparent)]
    Table(#[from] TableError),
}
