//! Single-column row ordering
//!
//! Natural ordering per value type with configurable placement of missing
//! keys. Sorting is stable: rows with equal keys keep their relative order in
//! both directions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::criteria::SortDirection;
use crate::types::{Row, ValueType};

/// Configuration for missing-key handling in sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullPosition {
    /// Missing keys appear first in ascending order
    First,
    /// Missing keys appear last in ascending order
    #[default]
    Last,
}

/// Compares rows by one column
#[derive(Debug, Clone, Copy)]
pub struct RowComparator<'a> {
    column_id: &'a str,
    value_type: ValueType,
    direction: SortDirection,
    null_position: NullPosition,
}

impl<'a> RowComparator<'a> {
    pub fn new(column_id: &'a str, value_type: ValueType, direction: SortDirection) -> Self {
        Self {
            column_id,
            value_type,
            direction,
            null_position: NullPosition::default(),
        }
    }

    pub fn with_null_position(mut self, null_position: NullPosition) -> Self {
        self.null_position = null_position;
        self
    }

    fn compare_missing(&self, a_missing: bool, b_missing: bool) -> Option<Ordering> {
        match (a_missing, b_missing) {
            (false, false) => None,
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(match self.null_position {
                NullPosition::First => Ordering::Less,
                NullPosition::Last => Ordering::Greater,
            }),
            (false, true) => Some(match self.null_position {
                NullPosition::First => Ordering::Greater,
                NullPosition::Last => Ordering::Less,
            }),
        }
    }

    /// Ascending comparison before the direction is applied
    fn compare_ascending(&self, a: &Row, b: &Row) -> Ordering {
        let (a, b) = (a.get(self.column_id), b.get(self.column_id));
        match self.value_type {
            ValueType::Number => {
                let (na, nb) = (a.to_number(), b.to_number());
                if let Some(ordering) = self.compare_missing(na.is_none(), nb.is_none()) {
                    return ordering;
                }
                match (na, nb) {
                    (Some(na), Some(nb)) => na.total_cmp(&nb),
                    _ => Ordering::Equal,
                }
            }
            ValueType::String => {
                if let Some(ordering) = self.compare_missing(a.is_null(), b.is_null()) {
                    return ordering;
                }
                a.display_string().cmp(&b.display_string())
            }
        }
    }

    /// Compare two rows using the configured column and direction
    pub fn compare_rows(&self, a: &Row, b: &Row) -> Ordering {
        let ordering = self.compare_ascending(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable sort of row indices into `rows`
    pub fn sort_indices(&self, rows: &[Row], indices: &mut [usize]) {
        indices.sort_by(|&a, &b| self.compare_rows(&rows[a], &rows[b]));
    }
}
