//! The row store.
//!
//! Locking discipline: one `RwLock` guards the row map, the id counter,
//! and the index map together. Insert/update/delete/create_index take
//! it exclusively; query and the read accessors share it. Keeping the
//! index map under the same lock as the rows means an index build
//! cannot race a mutation's index writes.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, instrument};

use super::errors::{TableError, TableResult};
use super::{RowId, ID_COLUMN};
use crate::index::Index;
use crate::query::Filter;
use crate::schema::{Row, Schema, Value};

/// Mutable table state guarded by the table lock
#[derive(Debug, Default)]
struct TableState {
    /// Stored rows by id
    rows: HashMap<RowId, Row>,
    /// Last assigned id; pre-incremented on insert
    next_id: RowId,
    /// Secondary indexes by column name
    indexes: HashMap<String, Index>,
}

/// A named, schema-validated row store with secondary indexes.
///
/// Rows are owned exclusively by the table; queries return clones.
/// All operations are synchronous and may block on the table lock.
#[derive(Debug)]
pub struct Table {
    name: String,
    schema: Schema,
    state: RwLock<TableState>,
}

impl Table {
    /// Creates an empty table with a fixed schema
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            state: RwLock::new(TableState::default()),
        }
    }

    /// The table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Inserts a row, assigning the next identifier.
    ///
    /// The id is written into the row under the reserved `id` column
    /// before validation, so a schema that declares `id` sees the
    /// engine-assigned value. Every existing index on a column present
    /// in the row gains a `(value, id)` entry.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] if the completed row fails
    /// the schema. The id counter stays advanced even then: identifiers
    /// are never reused, not even for rejected rows.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn insert(&self, mut row: Row) -> TableResult<RowId> {
        let mut guard = self.state.write().unwrap();
        let state = &mut *guard;

        state.next_id += 1;
        let id = state.next_id;
        row.insert(ID_COLUMN.to_string(), Value::Int(id as i64));

        self.schema.validate(&row)?;

        for (column, index) in state.indexes.iter_mut() {
            if let Some(value) = row.get(column) {
                index.add(value.clone(), id);
            }
        }
        state.rows.insert(id, row);

        debug!(id, "inserted row");
        Ok(id)
    }

    /// Applies a partial update to the row with the given id.
    ///
    /// The changes are merged into a copy of the stored row and the
    /// merged row is validated before anything is written back, so a
    /// rejected update leaves storage and indexes untouched. On
    /// success, every index on a changed column is repointed from the
    /// old value to the new one.
    ///
    /// # Errors
    ///
    /// [`TableError::RowNotFound`] if the id does not exist;
    /// [`TableError::Validation`] if the merged row fails the schema.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn update(&self, id: RowId, changes: Row) -> TableResult<()> {
        let mut guard = self.state.write().unwrap();
        let state = &mut *guard;

        let row = state
            .rows
            .get_mut(&id)
            .ok_or(TableError::RowNotFound(id))?;

        let mut merged = row.clone();
        for (column, value) in &changes {
            merged.insert(column.clone(), value.clone());
        }
        self.schema.validate(&merged)?;

        for (column, index) in state.indexes.iter_mut() {
            if !changes.contains_key(column) {
                continue;
            }
            if let Some(old) = row.get(column) {
                index.remove(old, id);
            }
            if let Some(new) = merged.get(column) {
                index.add(new.clone(), id);
            }
        }
        *row = merged;

        debug!(id, "updated row");
        Ok(())
    }

    /// Deletes the row with the given id.
    ///
    /// Every index on a column present in the row loses its
    /// `(value, id)` entry; emptied buckets are pruned. The id is not
    /// reused.
    ///
    /// # Errors
    ///
    /// [`TableError::RowNotFound`] if the id does not exist.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn delete(&self, id: RowId) -> TableResult<()> {
        let mut guard = self.state.write().unwrap();
        let state = &mut *guard;

        let row = state.rows.remove(&id).ok_or(TableError::RowNotFound(id))?;

        for (column, index) in state.indexes.iter_mut() {
            if let Some(value) = row.get(column) {
                index.remove(value, id);
            }
        }

        debug!(id, "deleted row");
        Ok(())
    }

    /// Builds an index over `column` from the current rows and
    /// registers it, replacing any previous index on that column.
    ///
    /// Runs under the table's write lock, so the build cannot miss a
    /// concurrent mutation. Future inserts, updates and deletes keep
    /// the index consistent.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn create_index(&self, column: &str) {
        let mut guard = self.state.write().unwrap();
        let state = &mut *guard;

        let mut index = Index::new(column);
        for (id, row) in &state.rows {
            if let Some(value) = row.get(column) {
                index.add(value.clone(), *id);
            }
        }
        debug!(column, values = index.len(), "built index");
        state.indexes.insert(column.to_string(), index);
    }

    /// Whether an index exists on `column`
    pub fn has_index(&self, column: &str) -> bool {
        self.state.read().unwrap().indexes.contains_key(column)
    }

    /// Number of distinct values the index on `column` currently maps.
    ///
    /// Emptied buckets are pruned, so this counts only values some
    /// live row actually holds.
    ///
    /// # Errors
    ///
    /// [`TableError::IndexNotFound`] if the column has no index.
    pub fn index_size(&self, column: &str) -> TableResult<usize> {
        let state = self.state.read().unwrap();
        state
            .indexes
            .get(column)
            .map(Index::len)
            .ok_or_else(|| TableError::IndexNotFound(column.to_string()))
    }

    /// The ids of rows whose indexed `column` holds `value`, ascending.
    ///
    /// # Errors
    ///
    /// [`TableError::IndexNotFound`] if the column has no index.
    pub fn index_lookup(&self, column: &str, value: &Value) -> TableResult<Vec<RowId>> {
        let state = self.state.read().unwrap();
        let index = state
            .indexes
            .get(column)
            .ok_or_else(|| TableError::IndexNotFound(column.to_string()))?;
        Ok(index
            .ids(value)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }

    /// Returns clones of every row matching the filter, in ascending
    /// id order.
    ///
    /// Always a full scan: indexes are maintenance-only and never
    /// consulted here. Row storage iterates in arbitrary order, so the
    /// matches are sorted by id before being returned.
    #[instrument(skip_all, fields(table = %self.name))]
    pub fn query(&self, filter: &Filter) -> Vec<Row> {
        let state = self.state.read().unwrap();

        let mut matches: Vec<(RowId, Row)> = state
            .rows
            .iter()
            .filter(|&(_, row)| filter.evaluate(row))
            .map(|(id, row)| (*id, row.clone()))
            .collect();
        matches.sort_unstable_by_key(|(id, _)| *id);

        debug!(matched = matches.len(), "query");
        matches.into_iter().map(|(_, row)| row).collect()
    }

    /// Returns clones of every row, in ascending id order
    pub fn scan(&self) -> Vec<Row> {
        self.query(&Filter::and(vec![]))
    }

    /// Returns a clone of the row with the given id, if present
    pub fn row(&self, id: RowId) -> Option<Row> {
        self.state.read().unwrap().rows.get(&id).cloned()
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.state.read().unwrap().rows.len()
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.state.read().unwrap().rows.is_empty()
    }
}
