//! Table state store
//!
//! Owns the rows, the column declarations and the [`FilterState`] of one table.
//! Every mutator validates its argument, applies it, and recomputes the
//! projection before returning, so the next read always reflects it. A
//! rejected mutation leaves the state untouched.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::{TableConfig, validate_columns};
use crate::criteria::{ColumnFilter, FilterState, GlobalCriteria, SortCriterion};
use crate::error::{GridFilterError, Result};
use crate::projection::project_with_null_position;
use crate::sort::NullPosition;
use crate::types::{ColumnSpec, Row};

/// Callback invoked after every recomputation with the new state and projection
pub type Listener = Box<dyn FnMut(&FilterState, &[usize]) + Send>;

/// Handle returned by [`TableStateStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct TableStateStore {
    columns: Vec<ColumnSpec>,
    rows: Vec<Row>,
    state: FilterState,
    null_position: NullPosition,
    projection: Vec<usize>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for TableStateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableStateStore")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("state", &self.state)
            .field("null_position", &self.null_position)
            .field("projection", &self.projection.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TableStateStore {
    /// Create a store with empty filters and no sort.
    ///
    /// Columns must be non-empty with unique, non-blank ids.
    pub fn new(columns: Vec<ColumnSpec>, rows: Vec<Row>) -> Result<Self> {
        validate_columns(&columns)?;

        let mut store = Self {
            columns,
            rows,
            state: FilterState::new(),
            null_position: NullPosition::default(),
            projection: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        };
        store.recompute();
        Ok(store)
    }

    /// Create a store from a table configuration
    pub fn from_config(config: TableConfig, rows: Vec<Row>) -> Result<Self> {
        let null_position = config.null_position;
        Ok(Self::new(config.columns, rows)?.with_null_position(null_position))
    }

    pub fn with_null_position(mut self, null_position: NullPosition) -> Self {
        self.null_position = null_position;
        self.recompute();
        self
    }

    fn column(&self, column_id: &str) -> Result<&ColumnSpec> {
        self.columns
            .iter()
            .find(|spec| spec.id == column_id)
            .ok_or_else(|| {
                tracing::warn!(column = column_id, "rejected request for unknown column");
                GridFilterError::UnknownColumn(column_id.to_string())
            })
    }

    fn recompute(&mut self) {
        self.projection =
            project_with_null_position(&self.rows, &self.columns, &self.state, self.null_position);

        tracing::debug!(
            rows = self.rows.len(),
            visible = self.projection.len(),
            active_filters = self.state.active_filter_count(),
            sort = ?self.state.sort,
            "projection recomputed"
        );

        for (_, listener) in &mut self.listeners {
            listener(&self.state, &self.projection);
        }
    }

    // ============ Mutators ============

    /// Replace the filter of exactly one column
    pub fn set_column_filter(&mut self, column_id: &str, filter: ColumnFilter) -> Result<()> {
        let spec = self.column(column_id)?;
        let filter = if spec.filterable {
            filter
        } else if filter.is_active() {
            tracing::warn!(column = column_id, "rejected filter on non-filterable column");
            return Err(GridFilterError::NotFilterable(column_id.to_string()));
        } else {
            ColumnFilter::None
        };

        tracing::trace!(column = column_id, kind = filter.kind(), "set column filter");
        if filter == ColumnFilter::None {
            self.state.column_filters.remove(column_id);
        } else {
            self.state
                .column_filters
                .insert(column_id.to_string(), filter);
        }
        self.recompute();
        Ok(())
    }

    pub fn clear_column_filter(&mut self, column_id: &str) -> Result<()> {
        self.set_column_filter(column_id, ColumnFilter::None)
    }

    /// Replace the whole global filter.
    ///
    /// Every field must be the threshold field of a numeric column.
    pub fn set_global_criteria(&mut self, criteria: GlobalCriteria) -> Result<()> {
        if let Some(field) = criteria.fields().find(|field| !self.accepts_global_field(field)) {
            tracing::warn!(field, "rejected unknown global filter field");
            return Err(GridFilterError::UnknownGlobalField(field.to_string()));
        }

        tracing::trace!(fields = criteria.len(), "set global criteria");
        self.state.global = criteria;
        self.recompute();
        Ok(())
    }

    /// Header click on a column: asc → desc → none, or asc for a new column
    pub fn set_sort(&mut self, column_id: &str) -> Result<()> {
        self.ensure_sortable(column_id)?;
        self.state.sort = SortCriterion::cycle(self.state.sort.as_ref(), column_id);
        tracing::trace!(column = column_id, sort = ?self.state.sort, "sort toggled");
        self.recompute();
        Ok(())
    }

    /// Replace the sort directly
    pub fn set_sort_criterion(&mut self, sort: Option<SortCriterion>) -> Result<()> {
        if let Some(sort) = &sort {
            self.ensure_sortable(&sort.column_id)?;
        }
        self.state.sort = sort;
        self.recompute();
        Ok(())
    }

    fn ensure_sortable(&self, column_id: &str) -> Result<()> {
        if self.column(column_id)?.sortable {
            return Ok(());
        }
        tracing::warn!(column = column_id, "rejected sort on non-sortable column");
        Err(GridFilterError::NotSortable(column_id.to_string()))
    }

    /// Reset every column filter, the global filter and the sort
    pub fn clear_all(&mut self) {
        tracing::trace!("clearing all filters and sort");
        self.state = FilterState::new();
        self.recompute();
    }

    /// Replace the rows (data refresh), keeping the current filter state
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.recompute();
    }

    // ============ Reads ============

    /// Indices into [`rows`](Self::rows) of the visible rows, in display order
    pub fn projection(&self) -> &[usize] {
        &self.projection
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.projection.iter().map(|&idx| &self.rows[idx])
    }

    pub fn visible_count(&self) -> usize {
        self.projection.len()
    }

    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    pub fn column_filter(&self, column_id: &str) -> Result<&ColumnFilter> {
        self.column(column_id)?;
        Ok(self.state.column_filter(column_id))
    }

    pub fn is_column_filtered(&self, column_id: &str) -> bool {
        self.state.column_filter(column_id).is_active()
    }

    pub fn active_filter_count(&self) -> usize {
        self.state.active_filter_count()
    }

    pub fn sort(&self) -> Option<&SortCriterion> {
        self.state.sort.as_ref()
    }

    pub fn null_position(&self) -> NullPosition {
        self.null_position
    }

    /// Sorted distinct display strings of a column over all rows, nulls skipped.
    ///
    /// These are the checklist entries of a "by values" filter.
    pub fn distinct_values(&self, column_id: &str) -> Result<Vec<String>> {
        self.column(column_id)?;
        let values: BTreeSet<String> = self
            .rows
            .iter()
            .map(|row| row.get(column_id))
            .filter(|value| !value.is_null())
            .map(|value| value.display_string().into_owned())
            .collect();
        Ok(values.into_iter().collect())
    }

    /// Threshold field names accepted by [`set_global_criteria`](Self::set_global_criteria)
    pub fn global_fields(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|spec| spec.is_numeric())
            .map(|spec| GlobalCriteria::field_for_column(&spec.id))
            .collect()
    }

    fn accepts_global_field(&self, field: &str) -> bool {
        GlobalCriteria::column_for_field(field).is_some_and(|column_id| {
            self.columns
                .iter()
                .any(|spec| spec.id == column_id && spec.is_numeric())
        })
    }

    // ============ Subscriptions ============

    /// Register a listener called after every recomputation
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&FilterState, &[usize]) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

#[cfg(test)]
mod tests;
