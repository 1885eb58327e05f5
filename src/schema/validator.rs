//! Row validation against a schema.
//!
//! Validation semantics:
//! - Every required column must be present
//! - Every present declared column must pass its validator
//! - Columns not declared in the schema pass through unchecked
//!
//! The last rule is deliberate: rows are superset-tolerant structures,
//! and the engine itself writes the reserved `id` column without
//! requiring every schema to declare it.
//!
//! Validation is deterministic and never mutates the row.

use super::errors::SchemaResult;
use super::types::{Row, Schema};
use crate::schema::ValidationError;

impl Schema {
    /// Validates a complete row against the declared columns.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: a missing required
    /// column, or a present column whose value fails its validator.
    /// Declared columns are checked in name order so the reported
    /// failure does not depend on map iteration order.
    pub fn validate(&self, row: &Row) -> SchemaResult<()> {
        let mut declared: Vec<_> = self.columns().iter().collect();
        declared.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (name, def) in declared {
            match row.get(name) {
                Some(value) => def.column_type.validate(name, value)?,
                None if def.required => return Err(ValidationError::missing_column(name.as_str())),
                None => {}
            }
        }
        Ok(())
    }
}
