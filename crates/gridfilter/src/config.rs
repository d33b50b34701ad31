//! Table configuration
//!
//! Column declarations and sort options for one table, loadable from TOML or
//! JSON.
//!
//! ```toml
//! nullPosition = "last"
//!
//! [[columns]]
//! id = "name"
//! valueType = "string"
//!
//! [[columns]]
//! id = "weight"
//! valueType = "number"
//! sortable = false
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{GridFilterError, Result};
use crate::sort::NullPosition;
use crate::types::ColumnSpec;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub null_position: NullPosition,
}

impl TableConfig {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            null_position: NullPosition::default(),
        }
    }

    pub fn with_null_position(mut self, null_position: NullPosition) -> Self {
        self.null_position = null_position;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, picking the format from its extension (`.json`, else TOML)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading table config");

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Check that columns are non-empty with unique, non-blank ids
    pub fn validate(&self) -> Result<()> {
        validate_columns(&self.columns)
    }
}

pub(crate) fn validate_columns(columns: &[ColumnSpec]) -> Result<()> {
    if columns.is_empty() {
        return Err(GridFilterError::Config(
            "table must declare at least one column".to_string(),
        ));
    }

    let mut seen = BTreeSet::new();
    for spec in columns {
        if spec.id.trim().is_empty() {
            return Err(GridFilterError::Config("column id must not be blank".to_string()));
        }
        if !seen.insert(spec.id.as_str()) {
            return Err(GridFilterError::DuplicateColumn(spec.id.clone()));
        }
    }
    Ok(())
}
