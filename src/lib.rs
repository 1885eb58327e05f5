//! rowdb - an embedded, schema-validated, in-memory tabular data engine
//!
//! A [`Server`] holds named [`Database`]s; a database holds named
//! [`Table`]s. Each table enforces a fixed [`Schema`] on insert and
//! update, maintains per-column inverted indexes, and answers
//! [`Filter`] queries by scanning rows under a shared lock.
//!
//! ## Quick start
//!
//! ```
//! use rowdb::{ColumnDef, Filter, Row, Schema, Server, Value};
//!
//! let server = Server::new();
//! server.create_database("app").unwrap();
//!
//! let schema = Schema::new([
//!     ("name", ColumnDef::required_text()),
//!     ("age", ColumnDef::required_int(0, 150)),
//! ]);
//! server.create_table("app", "users", schema).unwrap();
//!
//! let mut row = Row::new();
//! row.insert("name".to_string(), Value::Text("Alice".into()));
//! row.insert("age".to_string(), Value::Int(30));
//! let id = server.insert("app", "users", row).unwrap();
//! assert_eq!(id, 1);
//!
//! let adults = server.query("app", "users", &Filter::gte("age", 18)).unwrap();
//! assert_eq!(adults.len(), 1);
//! ```

pub mod catalog;
pub mod index;
pub mod query;
pub mod schema;
pub mod table;

// Re-exports for convenience.
pub use catalog::{CatalogError, CatalogResult, Database, Server};
pub use index::Index;
pub use query::{ComparisonOp, Condition, Filter};
pub use schema::{ColumnDef, ColumnType, Row, Schema, ValidationError, Value};
pub use table::{RowId, Table, TableError, ID_COLUMN};
