//! The server: a flat namespace of databases, plus the name-addressed
//! operation surface.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::database::Database;
use super::errors::{CatalogError, CatalogResult};
use crate::query::Filter;
use crate::schema::{Row, Schema};
use crate::table::{RowId, Table};

/// The engine entry point: a named collection of databases.
///
/// The convenience methods resolve `database/table` names on every call
/// and delegate to the table. Name resolution holds only the catalog
/// locks, which are released before any table lock is taken.
#[derive(Debug)]
pub struct Server {
    databases: RwLock<HashMap<String, Arc<Database>>>,
}

impl Server {
    /// Creates a server with no databases
    pub fn new() -> Self {
        Self {
            databases: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new empty database under `name` and returns its
    /// handle.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DatabaseExists`] if the name is already
    /// registered.
    pub fn create_database(&self, name: impl Into<String>) -> CatalogResult<Arc<Database>> {
        let name = name.into();
        let mut databases = self.databases.write().unwrap();
        if databases.contains_key(&name) {
            return Err(CatalogError::DatabaseExists(name));
        }

        let database = Arc::new(Database::new(name.clone()));
        databases.insert(name.clone(), Arc::clone(&database));
        debug!(db = %name, "created database");
        Ok(database)
    }

    /// Fetches a handle to the named database.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DatabaseNotFound`] if no such database exists.
    pub fn database(&self, name: &str) -> CatalogResult<Arc<Database>> {
        self.databases
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::DatabaseNotFound(name.to_string()))
    }

    /// Registered database names, sorted
    pub fn list_databases(&self) -> Vec<String> {
        let mut names: Vec<String> = self.databases.read().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    /// Creates a table in the named database
    pub fn create_table(
        &self,
        db: &str,
        table: impl Into<String>,
        schema: Schema,
    ) -> CatalogResult<Arc<Table>> {
        self.database(db)?.create_table(table, schema)
    }

    /// Builds (or replaces) an index in the named table
    pub fn create_index(&self, db: &str, table: &str, column: &str) -> CatalogResult<()> {
        self.database(db)?.table(table)?.create_index(column);
        Ok(())
    }

    /// Inserts a row into the named table
    pub fn insert(&self, db: &str, table: &str, row: Row) -> CatalogResult<RowId> {
        Ok(self.database(db)?.table(table)?.insert(row)?)
    }

    /// Applies a partial update to a row in the named table
    pub fn update(&self, db: &str, table: &str, id: RowId, changes: Row) -> CatalogResult<()> {
        Ok(self.database(db)?.table(table)?.update(id, changes)?)
    }

    /// Deletes a row from the named table
    pub fn delete(&self, db: &str, table: &str, id: RowId) -> CatalogResult<()> {
        Ok(self.database(db)?.table(table)?.delete(id)?)
    }

    /// Queries the named table, returning matches in ascending id order
    pub fn query(&self, db: &str, table: &str, filter: &Filter) -> CatalogResult<Vec<Row>> {
        Ok(self.database(db)?.table(table)?.query(filter))
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDef, Value};

    fn setup() -> Server {
        let server = Server::new();
        server.create_database("app").unwrap();
        server
            .create_table(
                "app",
                "users",
                Schema::new([
                    ("name", ColumnDef::required_text()),
                    ("age", ColumnDef::required_int(0, 150)),
                ]),
            )
            .unwrap();
        server
    }

    fn person(name: &str, age: i64) -> Row {
        [
            ("name".to_string(), Value::Text(name.into())),
            ("age".to_string(), Value::Int(age)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_duplicate_database_rejected() {
        let server = setup();
        let err = server.create_database("app").unwrap_err();
        assert_eq!(err, CatalogError::DatabaseExists("app".into()));
    }

    #[test]
    fn test_missing_database() {
        let server = setup();
        let err = server.insert("nope", "users", person("Alice", 30)).unwrap_err();
        assert_eq!(err, CatalogError::DatabaseNotFound("nope".into()));
    }

    #[test]
    fn test_missing_table() {
        let server = setup();
        let err = server.query("app", "ghosts", &Filter::and(vec![])).unwrap_err();
        assert_eq!(err, CatalogError::TableNotFound("ghosts".into()));
    }

    #[test]
    fn test_full_operation_surface() {
        let server = setup();

        let id = server.insert("app", "users", person("Alice", 30)).unwrap();
        assert_eq!(id, 1);

        server.create_index("app", "users", "name").unwrap();

        server
            .update(
                "app",
                "users",
                id,
                [("age".to_string(), Value::Int(31))].into_iter().collect(),
            )
            .unwrap();

        let rows = server.query("app", "users", &Filter::eq("age", 31)).unwrap();
        assert_eq!(rows.len(), 1);

        server.delete("app", "users", id).unwrap();
        assert!(server
            .query("app", "users", &Filter::and(vec![]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_list_databases_sorted() {
        let server = setup();
        server.create_database("analytics").unwrap();
        assert_eq!(server.list_databases(), vec!["analytics", "app"]);
    }

    #[test]
    fn test_table_error_propagates() {
        let server = setup();
        let err = server.delete("app", "users", 42).unwrap_err();
        assert!(matches!(err, CatalogError::Table(_)));
    }
}
