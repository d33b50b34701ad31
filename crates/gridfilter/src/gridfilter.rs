//! gridfilter - Row filtering and sorting engine for data tables
//!
//! Given rows, column declarations and a [`FilterState`], computes which rows
//! are visible and in what order. It provides:
//!
//! - Per-column filters, either "by values" (search text plus a selection
//!   checklist) or "advanced" (a typed comparison operator with operands)
//! - A global filter of numeric lower bounds across columns
//! - Stable single-column sorting
//! - `TableStateStore` - Owns a table's rows and filter state and republishes
//!   the projection after every change
//!
//! Malformed filter input never fails: operands that do not coerce simply do
//! not match.

mod config;
mod criteria;
mod error;
mod evaluate;
pub mod predicates;
mod projection;
mod sort;
mod store;
mod types;

pub use config::*;
pub use criteria::*;
pub use error::*;
pub use evaluate::*;
pub use projection::*;
pub use sort::*;
pub use store::*;
pub use types::*;
