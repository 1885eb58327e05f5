//! Value and schema type definitions.
//!
//! Supported column types:
//! - int: 64-bit signed integer with inclusive min/max bounds
//! - text: UTF-8 string, optionally rejecting the empty string

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::errors::{SchemaResult, ValidationError};

/// A single dynamically-typed cell value.
///
/// A closed variant set rather than an open "any" type, so validators
/// and comparators pattern-match exhaustively instead of relying on
/// runtime type assertions. Ordered and hashable so values can key
/// index buckets deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// UTF-8 string
    Text(String),
}

impl Value {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Text(_) => "text",
        }
    }

    /// Converts a JSON value into an engine value.
    ///
    /// Returns `None` for JSON shapes the engine does not model:
    /// non-integer numbers, booleans, null, arrays, and objects.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Value::Int),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            _ => None,
        }
    }

    /// Converts this value into its JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(v) => serde_json::Value::Number((*v).into()),
            Value::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// A row as stored and returned by the engine: column name to value.
///
/// Sorted map so serialized rows have a stable column order.
pub type Row = BTreeMap<String, Value>;

/// Per-column validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer with inclusive bounds
    Int {
        /// Smallest accepted value
        min: i64,
        /// Largest accepted value
        max: i64,
    },
    /// UTF-8 string
    Text {
        /// Whether the empty string is accepted
        allow_empty: bool,
    },
}

impl ColumnType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Int { .. } => "int",
            ColumnType::Text { .. } => "text",
        }
    }

    /// Validates a single value against this column type
    pub fn validate(&self, column: &str, value: &Value) -> SchemaResult<()> {
        match self {
            ColumnType::Int { min, max } => match value {
                Value::Int(v) if v < min || v > max => {
                    Err(ValidationError::out_of_bounds(column, *v, *min, *max))
                }
                Value::Int(_) => Ok(()),
                other => Err(ValidationError::type_mismatch(
                    column,
                    "int",
                    other.type_name(),
                )),
            },
            ColumnType::Text { allow_empty } => match value {
                Value::Text(s) if s.is_empty() && !allow_empty => {
                    Err(ValidationError::empty_text(column))
                }
                Value::Text(_) => Ok(()),
                other => Err(ValidationError::type_mismatch(
                    column,
                    "text",
                    other.type_name(),
                )),
            },
        }
    }
}

/// Column definition: validator plus required-ness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column data type
    #[serde(flatten)]
    pub column_type: ColumnType,
    /// Whether the column must be present
    pub required: bool,
}

impl ColumnDef {
    /// Create a required int column with inclusive bounds
    pub fn required_int(min: i64, max: i64) -> Self {
        Self {
            column_type: ColumnType::Int { min, max },
            required: true,
        }
    }

    /// Create an optional int column with inclusive bounds
    pub fn optional_int(min: i64, max: i64) -> Self {
        Self {
            column_type: ColumnType::Int { min, max },
            required: false,
        }
    }

    /// Create a required text column that rejects the empty string
    pub fn required_text() -> Self {
        Self {
            column_type: ColumnType::Text { allow_empty: false },
            required: true,
        }
    }

    /// Create an optional text column that accepts the empty string
    pub fn optional_text() -> Self {
        Self {
            column_type: ColumnType::Text { allow_empty: true },
            required: false,
        }
    }
}

/// Declared column set a row must satisfy.
///
/// Immutable once the owning table is created; there is no migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Column definitions by name
    columns: HashMap<String, ColumnDef>,
}

impl Schema {
    /// Create a schema from a set of named column definitions
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnDef)>,
        S: Into<String>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|(name, def)| (name.into(), def))
                .collect(),
        }
    }

    /// Returns the definition of a declared column
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.get(name)
    }

    /// Declared columns by name
    pub fn columns(&self) -> &HashMap<String, ColumnDef> {
        &self.columns
    }

    /// Number of declared columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema declares no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
