//! Query predicates: composite boolean filter trees evaluated per row.

mod filter;

pub use filter::{ComparisonOp, Condition, Filter};
