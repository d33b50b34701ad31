use super::*;
use crate::criteria::{AdvancedCriteria, Operator, SortDirection, ValuesCriteria};
use crate::types::Value;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::number("id").not_filterable(),
        ColumnSpec::string("name").not_sortable(),
        ColumnSpec::number("weight"),
    ]
}

fn rows() -> Vec<Row> {
    vec![
        Row::new().with("id", 1).with("name", "Object A").with("weight", 100),
        Row::new().with("id", 2).with("name", "Object B").with("weight", 200),
        Row::new().with("id", 3).with("name", "Object C").with("weight", 150),
    ]
}

fn store() -> TableStateStore {
    TableStateStore::new(columns(), rows()).unwrap()
}

fn visible_ids(store: &TableStateStore) -> Vec<f64> {
    store
        .visible_rows()
        .filter_map(|row| row.get("id").to_number())
        .collect()
}

#[test]
fn test_new_store_shows_every_row() {
    let store = store();
    assert_eq!(store.projection(), &[0, 1, 2]);
    assert_eq!(store.visible_count(), 3);
    assert_eq!(store.total_count(), 3);
    assert!(store.filter_state().is_pristine());
}

#[test]
fn test_duplicate_columns_rejected() {
    let err = TableStateStore::new(
        vec![ColumnSpec::string("a"), ColumnSpec::string("a")],
        Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(err, GridFilterError::DuplicateColumn(id) if id == "a"));
}

#[test]
fn test_set_column_filter_recomputes_synchronously() {
    let mut store = store();
    store
        .set_column_filter(
            "weight",
            ColumnFilter::advanced(AdvancedCriteria::new(Operator::GreaterThan, "120")),
        )
        .unwrap();
    assert_eq!(visible_ids(&store), vec![2.0, 3.0]);
    assert!(store.is_column_filtered("weight"));
    assert_eq!(store.active_filter_count(), 1);

    store.clear_column_filter("weight").unwrap();
    assert_eq!(visible_ids(&store), vec![1.0, 2.0, 3.0]);
    assert!(!store.is_column_filtered("weight"));
    assert_eq!(store.column_filter("weight").unwrap(), &ColumnFilter::None);
}

#[test]
fn test_set_column_filter_replaces_only_that_column() {
    let mut store = store();
    store
        .set_column_filter(
            "name",
            ColumnFilter::values(ValuesCriteria::new().with_search("object")),
        )
        .unwrap();
    store
        .set_column_filter(
            "weight",
            ColumnFilter::values(ValuesCriteria::new().with_selected(["150"])),
        )
        .unwrap();
    assert_eq!(visible_ids(&store), vec![3.0]);
    assert!(store.is_column_filtered("name"));
    assert_eq!(store.active_filter_count(), 2);
}

#[test]
fn test_rejected_mutations_leave_state_unchanged() {
    let mut store = store();
    store.set_sort("weight").unwrap();
    let before = store.filter_state().clone();

    let filter = ColumnFilter::advanced(AdvancedCriteria::unary(Operator::NotEmpty));
    assert!(matches!(
        store.set_column_filter("color", filter.clone()),
        Err(GridFilterError::UnknownColumn(_))
    ));
    assert!(matches!(
        store.set_column_filter("id", filter),
        Err(GridFilterError::NotFilterable(_))
    ));
    assert!(matches!(store.set_sort("name"), Err(GridFilterError::NotSortable(_))));
    assert!(matches!(
        store.set_sort_criterion(Some(SortCriterion::asc("color"))),
        Err(GridFilterError::UnknownColumn(_))
    ));
    assert!(matches!(
        store.set_global_criteria(GlobalCriteria::new().with_threshold("nameMin", 1.0)),
        Err(GridFilterError::UnknownGlobalField(_))
    ));
    assert!(matches!(
        store.set_global_criteria(GlobalCriteria::new().with_threshold("speedMin", 1.0)),
        Err(GridFilterError::UnknownGlobalField(_))
    ));

    assert_eq!(store.filter_state(), &before);
    assert_eq!(store.projection(), &[0, 2, 1]);
}

#[test]
fn test_empty_and_blank_columns_rejected() {
    assert!(matches!(
        TableStateStore::new(Vec::new(), rows()),
        Err(GridFilterError::Config(_))
    ));
    assert!(matches!(
        TableStateStore::new(vec![ColumnSpec::string(" ")], rows()),
        Err(GridFilterError::Config(_))
    ));
}

#[test]
fn test_clearing_non_filterable_column_is_allowed() {
    let mut store = store();
    assert!(store.clear_column_filter("id").is_ok());
}

#[test]
fn test_inactive_filter_on_non_filterable_column_is_a_clear() {
    let mut store = store();
    store
        .set_column_filter("id", ColumnFilter::values(ValuesCriteria::default()))
        .unwrap();
    store
        .set_column_filter(
            "id",
            ColumnFilter::advanced(AdvancedCriteria::new(Operator::GreaterThan, " ")),
        )
        .unwrap();
    assert_eq!(store.column_filter("id").unwrap(), &ColumnFilter::None);
    assert!(store.filter_state().is_pristine());
    assert_eq!(store.visible_count(), 3);
}

#[test]
fn test_sort_cycles_asc_desc_none() {
    let mut store = store();
    store.set_sort("weight").unwrap();
    assert_eq!(store.sort(), Some(&SortCriterion::asc("weight")));
    assert_eq!(visible_ids(&store), vec![1.0, 3.0, 2.0]);

    store.set_sort("weight").unwrap();
    assert_eq!(store.sort().map(|s| s.direction), Some(SortDirection::Desc));
    assert_eq!(visible_ids(&store), vec![2.0, 3.0, 1.0]);

    store.set_sort("weight").unwrap();
    assert_eq!(store.sort(), None);
    assert_eq!(visible_ids(&store), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_sort_on_other_column_starts_ascending() {
    let mut store = store();
    store
        .set_sort_criterion(Some(SortCriterion::desc("weight")))
        .unwrap();
    store.set_sort("id").unwrap();
    assert_eq!(store.sort(), Some(&SortCriterion::asc("id")));
}

#[test]
fn test_global_criteria_and_fields() {
    let mut store = store();
    assert_eq!(store.global_fields(), vec!["idMin", "weightMin"]);

    store
        .set_global_criteria(GlobalCriteria::new().with_threshold("weightMin", 150.0))
        .unwrap();
    assert_eq!(visible_ids(&store), vec![2.0, 3.0]);
    assert_eq!(store.active_filter_count(), 1);

    store.set_global_criteria(GlobalCriteria::new()).unwrap();
    assert_eq!(store.visible_count(), 3);
}

#[test]
fn test_clear_all_restores_original_order() {
    let mut store = store();
    store
        .set_column_filter(
            "weight",
            ColumnFilter::advanced(AdvancedCriteria::between("100", "150")),
        )
        .unwrap();
    store.set_sort_criterion(Some(SortCriterion::desc("weight"))).unwrap();
    assert_eq!(visible_ids(&store), vec![3.0, 1.0]);

    store.clear_all();
    assert_eq!(store.projection(), &[0, 1, 2]);
    assert!(store.filter_state().is_pristine());
}

#[test]
fn test_set_rows_keeps_filter_state() {
    let mut store = store();
    store
        .set_global_criteria(GlobalCriteria::new().with_threshold("weightMin", 150.0))
        .unwrap();

    let mut refreshed = rows();
    refreshed.push(Row::new().with("id", 4).with("name", "Object D").with("weight", "300"));
    store.set_rows(refreshed);

    assert_eq!(store.total_count(), 4);
    assert_eq!(visible_ids(&store), vec![2.0, 3.0, 4.0]);
}

#[test]
fn test_distinct_values_sorted_without_nulls() {
    let mut store = store();
    let mut data = rows();
    data.push(Row::new().with("id", 4).with("name", "Object A").with("weight", Value::Null));
    store.set_rows(data);

    assert_eq!(
        store.distinct_values("name").unwrap(),
        vec!["Object A", "Object B", "Object C"]
    );
    assert_eq!(store.distinct_values("weight").unwrap(), vec!["100", "150", "200"]);
    assert!(matches!(
        store.distinct_values("color"),
        Err(GridFilterError::UnknownColumn(_))
    ));
}

#[test]
fn test_subscribers_receive_each_recomputation() {
    let mut store = store();
    let seen: Arc<Mutex<Vec<usize>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let id = store.subscribe(move |_, projection| {
        sink.lock().unwrap().push(projection.len());
    });

    store
        .set_global_criteria(GlobalCriteria::new().with_threshold("weightMin", 150.0))
        .unwrap();
    store.clear_all();
    assert!(store.set_sort("name").is_err());
    assert_eq!(*seen.lock().unwrap(), vec![2, 3]);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.set_sort("weight").unwrap();
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn test_from_config_applies_null_position() {
    let config = TableConfig::new(vec![ColumnSpec::number("weight")])
        .with_null_position(NullPosition::First);
    let mut store = TableStateStore::from_config(
        config,
        vec![
            Row::new().with("weight", 5),
            Row::new().with("weight", Value::Null),
        ],
    )
    .unwrap();
    store.set_sort("weight").unwrap();
    assert_eq!(store.projection(), &[1, 0]);
    assert_eq!(store.null_position(), NullPosition::First);
}
