//! Error types for gridfilter
//!
//! Malformed filter input never produces an error: bad operands simply stop
//! matching. These variants cover programming errors at the store boundary and
//! configuration loading.

use thiserror::Error;

/// Core error type for gridfilter operations
#[derive(Error, Debug)]
pub enum GridFilterError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown global filter field: {0}")]
    UnknownGlobalField(String),

    #[error("Column is not filterable: {0}")]
    NotFilterable(String),

    #[error("Column is not sortable: {0}")]
    NotSortable(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gridfilter operations
pub type Result<T> = std::result::Result<T, GridFilterError>;
