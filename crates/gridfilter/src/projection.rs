//! Row projection pipeline
//!
//! Filter, then sort. The filter stage keeps a row only if every column filter
//! and the global filter pass; survivors keep their input order. The sort stage
//! then orders the survivors with a stable comparator. The stages never
//! interleave: sorting never sees excluded rows.

use crate::criteria::FilterState;
use crate::evaluate::{evaluate_column, evaluate_global};
use crate::sort::{NullPosition, RowComparator};
use crate::types::{ColumnSpec, Row};

/// Returns true if `row` passes every column filter and the global filter
pub fn row_passes(row: &Row, columns: &[ColumnSpec], state: &FilterState) -> bool {
    columns
        .iter()
        .all(|spec| evaluate_column(row, spec, state.column_filter(&spec.id)))
        && evaluate_global(row, &state.global)
}

/// Filter stage: indices of surviving rows, in input order
pub fn filter_rows(rows: &[Row], columns: &[ColumnSpec], state: &FilterState) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_passes(row, columns, state))
        .map(|(idx, _)| idx)
        .collect()
}

/// Sort stage over filter survivors.
///
/// A sort on a column missing from `columns` leaves the order unchanged.
pub fn sort_survivors(
    rows: &[Row],
    columns: &[ColumnSpec],
    state: &FilterState,
    null_position: NullPosition,
    survivors: &mut [usize],
) {
    let Some(sort) = &state.sort else {
        return;
    };
    let Some(spec) = columns.iter().find(|spec| spec.id == sort.column_id) else {
        tracing::trace!(column = %sort.column_id, "sort column not declared, order unchanged");
        return;
    };

    RowComparator::new(&spec.id, spec.value_type, sort.direction)
        .with_null_position(null_position)
        .sort_indices(rows, survivors);
}

/// Project rows through `state`, returning indices into `rows`
pub fn project(rows: &[Row], columns: &[ColumnSpec], state: &FilterState) -> Vec<usize> {
    project_with_null_position(rows, columns, state, NullPosition::default())
}

pub fn project_with_null_position(
    rows: &[Row],
    columns: &[ColumnSpec],
    state: &FilterState,
    null_position: NullPosition,
) -> Vec<usize> {
    let mut survivors = filter_rows(rows, columns, state);
    if survivors.is_empty() {
        return survivors;
    }
    sort_survivors(rows, columns, state, null_position, &mut survivors);
    survivors
}

/// Like [`project`], returning the rows themselves
pub fn project_rows<'a>(
    rows: &'a [Row],
    columns: &[ColumnSpec],
    state: &FilterState,
) -> Vec<&'a Row> {
    project(rows, columns, state)
        .into_iter()
        .map(|idx| &rows[idx])
        .collect()
}
