//! A database: a flat namespace of tables.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::errors::{CatalogError, CatalogResult};
use crate::schema::Schema;
use crate::table::Table;

/// A named collection of tables.
///
/// Tables are handed out as `Arc` handles, so callers operate on a
/// table without holding the namespace lock. A table lives until its
/// owning database is discarded; there is no explicit drop.
#[derive(Debug)]
pub struct Database {
    name: String,
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl Database {
    /// Creates an empty database
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// The database name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a new empty table under `name` and returns its handle.
    ///
    /// # Errors
    ///
    /// [`CatalogError::TableExists`] if the name is already registered.
    pub fn create_table(&self, name: impl Into<String>, schema: Schema) -> CatalogResult<Arc<Table>> {
        let name = name.into();
        let mut tables = self.tables.write().unwrap();
        if tables.contains_key(&name) {
            return Err(CatalogError::TableExists(name));
        }

        let table = Arc::new(Table::new(name.clone(), schema));
        tables.insert(name.clone(), Arc::clone(&table));
        debug!(db = %self.name, table = %name, "created table");
        Ok(table)
    }

    /// Fetches a handle to the named table.
    ///
    /// # Errors
    ///
    /// [`CatalogError::TableNotFound`] if no such table exists.
    pub fn table(&self, name: &str) -> CatalogResult<Arc<Table>> {
        self.tables
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::TableNotFound(name.to_string()))
    }

    /// Registered table names, sorted
    pub fn list_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().unwrap().keys().cloned().collect();
        names.sort();
        names
    }
}
