//! Composite predicate tree evaluated against a single row.
//!
//! Filters match strictly: no type coercion, no expressions. A leaf
//! condition referencing a column absent from the row evaluates to
//! false under every operator.

use serde::{Deserialize, Serialize};

use crate::schema::{Row, Value};

/// Comparison operators for leaf conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOp {
    /// Equality: column == value
    Eq,
    /// Greater than: column > value
    Gt,
    /// Less than: column < value
    Lt,
    /// Greater than or equal: column >= value
    Gte,
    /// Less than or equal: column <= value
    Lte,
}

impl ComparisonOp {
    /// Returns the operator name for diagnostics
    pub fn op_name(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "eq",
            ComparisonOp::Gt => "gt",
            ComparisonOp::Lt => "lt",
            ComparisonOp::Gte => "gte",
            ComparisonOp::Lte => "lte",
        }
    }
}

/// A leaf comparison of one column against a constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Column name to compare
    pub column: String,
    /// Comparison operator
    pub op: ComparisonOp,
    /// Constant to compare against
    pub value: Value,
}

impl Condition {
    /// Create a condition
    pub fn new(column: impl Into<String>, op: ComparisonOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluates this condition against a row.
    ///
    /// A column absent from the row never matches, regardless of the
    /// operator.
    pub fn evaluate(&self, row: &Row) -> bool {
        match row.get(&self.column) {
            Some(actual) => compare(actual, &self.value, self.op),
            None => false,
        }
    }
}

/// Type-aware comparison.
///
/// - int vs int: all five operators
/// - text vs text: equality only; ordering operators never match
/// - mismatched types: never match, no coercion
fn compare(actual: &Value, expected: &Value, op: ComparisonOp) -> bool {
    match (actual, expected) {
        (Value::Int(a), Value::Int(b)) => match op {
            ComparisonOp::Eq => a == b,
            ComparisonOp::Gt => a > b,
            ComparisonOp::Lt => a < b,
            ComparisonOp::Gte => a >= b,
            ComparisonOp::Lte => a <= b,
        },
        (Value::Text(a), Value::Text(b)) => op == ComparisonOp::Eq && a == b,
        _ => false,
    }
}

/// A composite boolean predicate tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Leaf comparison
    Condition(Condition),
    /// True iff every child is true; vacuously true when empty
    And(Vec<Filter>),
    /// True iff at least one child is true; false when empty
    Or(Vec<Filter>),
}

impl Filter {
    /// Create an equality leaf
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Condition(Condition::new(column, ComparisonOp::Eq, value))
    }

    /// Create a greater-than leaf
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Condition(Condition::new(column, ComparisonOp::Gt, value))
    }

    /// Create a less-than leaf
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Condition(Condition::new(column, ComparisonOp::Lt, value))
    }

    /// Create a greater-than-or-equal leaf
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Condition(Condition::new(column, ComparisonOp::Gte, value))
    }

    /// Create a less-than-or-equal leaf
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Condition(Condition::new(column, ComparisonOp::Lte, value))
    }

    /// Combine children with AND semantics
    pub fn and(children: Vec<Filter>) -> Self {
        Filter::And(children)
    }

    /// Combine children with OR semantics
    pub fn or(children: Vec<Filter>) -> Self {
        Filter::Or(children)
    }

    /// Evaluates the tree against a row
    pub fn evaluate(&self, row: &Row) -> bool {
        match self {
            Filter::Condition(condition) => condition.evaluate(row),
            Filter::And(children) => children.iter().all(|child| child.evaluate(row)),
            Filter::Or(children) => children.iter().any(|child| child.evaluate(row)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn alice() -> Row {
        row(&[
            ("name", Value::Text("Alice".into())),
            ("age", Value::Int(30)),
        ])
    }

    #[test]
    fn test_int_operators() {
        let row = alice();
        assert!(Filter::eq("age", 30).evaluate(&row));
        assert!(Filter::gt("age", 25).evaluate(&row));
        assert!(!Filter::gt("age", 30).evaluate(&row));
        assert!(Filter::lt("age", 31).evaluate(&row));
        assert!(Filter::gte("age", 30).evaluate(&row));
        assert!(Filter::lte("age", 30).evaluate(&row));
        assert!(!Filter::lte("age", 29).evaluate(&row));
    }

    #[test]
    fn test_text_equality_only() {
        let row = alice();
        assert!(Filter::eq("name", "Alice").evaluate(&row));
        assert!(!Filter::eq("name", "Bob").evaluate(&row));

        // Ordering operators on text never match.
        assert!(!Filter::gt("name", "Aaron").evaluate(&row));
        assert!(!Filter::lt("name", "Zed").evaluate(&row));
        assert!(!Filter::gte("name", "Alice").evaluate(&row));
        assert!(!Filter::lte("name", "Alice").evaluate(&row));
    }

    #[test]
    fn test_no_type_coercion() {
        let row = alice();
        // Text "30" does not match int 30, in either direction.
        assert!(!Filter::eq("age", "30").evaluate(&row));
        assert!(!Filter::eq("name", 0).evaluate(&row));
    }

    #[test]
    fn test_missing_column_never_matches() {
        let row = alice();
        assert!(!Filter::eq("city", "Paris").evaluate(&row));
        assert!(!Filter::gt("city", 0).evaluate(&row));
        assert!(!Filter::lte("city", 0).evaluate(&row));
    }

    #[test]
    fn test_and_semantics() {
        let row = alice();
        assert!(Filter::and(vec![
            Filter::gt("age", 25),
            Filter::eq("name", "Alice"),
        ])
        .evaluate(&row));

        assert!(!Filter::and(vec![
            Filter::gt("age", 25),
            Filter::eq("name", "Bob"),
        ])
        .evaluate(&row));
    }

    #[test]
    fn test_or_semantics() {
        let row = alice();
        assert!(Filter::or(vec![
            Filter::eq("name", "Bob"),
            Filter::gt("age", 25),
        ])
        .evaluate(&row));

        assert!(!Filter::or(vec![
            Filter::eq("name", "Bob"),
            Filter::gt("age", 99),
        ])
        .evaluate(&row));
    }

    #[test]
    fn test_empty_and_is_vacuously_true() {
        assert!(Filter::and(vec![]).evaluate(&alice()));
    }

    #[test]
    fn test_empty_or_is_false() {
        assert!(!Filter::or(vec![]).evaluate(&alice()));
    }

    #[test]
    fn test_nested_composition() {
        // (name == "Alice" AND age > 30) OR (city == "Paris")
        let filter = Filter::or(vec![
            Filter::and(vec![Filter::eq("name", "Alice"), Filter::gt("age", 30)]),
            Filter::eq("city", "Paris"),
        ]);

        let alice_paris = row(&[
            ("name", Value::Text("Alice".into())),
            ("age", Value::Int(30)),
            ("city", Value::Text("Paris".into())),
        ]);
        let alice_berlin = row(&[
            ("name", Value::Text("Alice".into())),
            ("age", Value::Int(35)),
            ("city", Value::Text("Berlin".into())),
        ]);
        let bob_london = row(&[
            ("name", Value::Text("Bob".into())),
            ("age", Value::Int(25)),
            ("city", Value::Text("London".into())),
        ]);

        assert!(filter.evaluate(&alice_paris));
        assert!(filter.evaluate(&alice_berlin));
        assert!(!filter.evaluate(&bob_london));
    }

    #[test]
    fn test_filter_serde_round_trip() {
        let filter = Filter::and(vec![Filter::eq("name", "Alice"), Filter::gte("age", 18)]);
        let json = serde_json::to_string(&filter).unwrap();
        let back: Filter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filter);
    }
}
