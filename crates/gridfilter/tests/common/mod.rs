//! Shared fixtures for integration tests

#![allow(dead_code)]

use gridfilter::{ColumnSpec, Row, TableStateStore};
use serde_json::json;

/// Initialize test logging once per process.
///
/// Honors `RUST_LOG`; gridfilter defaults to debug.
pub fn initialize_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("gridfilter=debug".parse().unwrap()),
            )
            .with_test_writer()
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

pub fn rows_from_json(value: serde_json::Value) -> Vec<Row> {
    serde_json::from_value(value).unwrap()
}

/// Three rows keyed by `id` with numeric `weight`
pub fn weight_rows() -> Vec<Row> {
    rows_from_json(json!([
        {"id": 1, "weight": 100},
        {"id": 2, "weight": 200},
        {"id": 3, "weight": 150},
    ]))
}

pub fn weight_store() -> TableStateStore {
    initialize_logging();
    TableStateStore::new(
        vec![ColumnSpec::number("id"), ColumnSpec::number("weight")],
        weight_rows(),
    )
    .unwrap()
}

/// The demo inventory: string `name`, numeric fields stored as strings
pub fn inventory_rows() -> Vec<Row> {
    rows_from_json(json!([
        {"id": 1, "name": "Object A", "weight": "100", "speed": "50", "length": "10"},
        {"id": 2, "name": "Object B", "weight": "200", "speed": "30", "length": "20"},
        {"id": 3, "name": "Object C", "weight": "150", "speed": "70", "length": "15"},
        {"id": 4, "name": "Object D", "weight": "80", "speed": "90", "length": "25"},
        {"id": 5, "name": "Object E", "weight": "250", "speed": "40", "length": "30"},
        {"id": 6, "name": "Object F", "weight": "120", "speed": "60", "length": null},
    ]))
}

pub fn inventory_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::number("id"),
        ColumnSpec::string("name"),
        ColumnSpec::number("weight"),
        ColumnSpec::number("speed"),
        ColumnSpec::number("length"),
    ]
}

pub fn inventory_store() -> TableStateStore {
    initialize_logging();
    TableStateStore::new(inventory_columns(), inventory_rows()).unwrap()
}

pub fn visible_ids(store: &TableStateStore) -> Vec<i64> {
    store
        .visible_rows()
        .filter_map(|row| row.get("id").to_number())
        .map(|id| id as i64)
        .collect()
}
