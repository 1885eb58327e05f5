//! Secondary indexes: per-column inverted mappings from value to row ids.
//!
//! Indexes are maintenance-only in this engine: every mutation keeps
//! them consistent with the row store, but query execution never
//! consults them. The bucket shape is chosen so a later planner could
//! intersect buckets instead of scanning.

use std::collections::{BTreeMap, BTreeSet};

use crate::schema::Value;
use crate::table::RowId;

/// Inverted index over a single column.
///
/// Buckets map a column value to the set of ids of rows holding that
/// value. BTree containers keep bucket and id iteration deterministic.
///
/// Invariant: a bucket exists only while it is non-empty; removal
/// prunes emptied buckets so the map never accumulates dead values.
#[derive(Debug, Clone)]
pub struct Index {
    /// The indexed column
    column: String,
    /// value -> ids of rows holding it
    buckets: BTreeMap<Value, BTreeSet<RowId>>,
}

impl Index {
    /// Creates an empty index over the given column
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            buckets: BTreeMap::new(),
        }
    }

    /// The indexed column name
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Records that the row `id` holds `value`
    pub fn add(&mut self, value: Value, id: RowId) {
        self.buckets.entry(value).or_default().insert(id);
    }

    /// Removes the `(value, id)` entry, pruning the bucket if it empties.
    ///
    /// Removing an entry that was never added is a no-op.
    pub fn remove(&mut self, value: &Value, id: RowId) {
        if let Some(ids) = self.buckets.get_mut(value) {
            ids.remove(&id);
            if ids.is_empty() {
                self.buckets.remove(value);
            }
        }
    }

    /// The ids of rows holding `value`, if any
    pub fn ids(&self, value: &Value) -> Option<&BTreeSet<RowId>> {
        self.buckets.get(value)
    }

    /// Whether the index maps `value` to `id`
    pub fn contains(&self, value: &Value, id: RowId) -> bool {
        self.buckets.get(value).is_some_and(|ids| ids.contains(&id))
    }

    /// Number of distinct indexed values
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
