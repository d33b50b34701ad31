//! Row filter evaluation
//!
//! Two independent evaluators, AND-composed by the projection pipeline:
//!
//! - [`evaluate_column`] - one column's [`ColumnFilter`](crate::ColumnFilter) against one cell
//! - [`evaluate_global`] - the cross-column numeric thresholds against the whole row

mod column;
mod global;

pub use column::{evaluate_column, matches_advanced, matches_values};
pub use global::evaluate_global;
