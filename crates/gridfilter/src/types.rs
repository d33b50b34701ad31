//! Core types for gridfilter
//!
//! Cells are primitive values (string, number, or absent). Rows keep their
//! column order, and each column declares the type its cells coerce to.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

static NULL: Value = Value::Null;

/// A primitive cell value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or null cell
    #[default]
    Null,
    /// IEEE-754 number
    Number(f64),
    /// UTF-8 string
    String(String),
}

impl Value {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerce to a finite number.
    ///
    /// Strings are trimmed and parsed as decimal floats; blank strings, `NaN`
    /// and infinities fail coercion.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Number(n) => n.is_finite().then_some(*n),
            Value::String(s) => parse_number(s),
        }
    }

    /// The string shown in a grid cell. Null displays as the empty string.
    pub fn display_string(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            // -0 displays as "0"
            Value::Number(n) if *n == 0.0 => Cow::Borrowed("0"),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::String(s) => Cow::Borrowed(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Parse user or cell text as a finite number.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A row of cells keyed by column id, in column order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, Value>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell insertion
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Get a cell by column id. Absent cells read as [`Value::Null`].
    pub fn get(&self, column: &str) -> &Value {
        self.cells.get(column).unwrap_or(&NULL)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The type a column's cells are coerced to before filtering and sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Number,
}

fn default_true() -> bool {
    true
}

/// Column declaration, fixed for the lifetime of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Column id, used as the key into [`Row`]
    pub id: String,
    /// Coercion applied to cells of this column
    #[serde(default)]
    pub value_type: ValueType,
    /// Whether the column accepts a filter
    #[serde(default = "default_true")]
    pub filterable: bool,
    /// Whether the column accepts a sort
    #[serde(default = "default_true")]
    pub sortable: bool,
}

impl ColumnSpec {
    pub fn new(id: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            id: id.into(),
            value_type,
            filterable: true,
            sortable: true,
        }
    }

    /// Create a string column
    pub fn string(id: impl Into<String>) -> Self {
        Self::new(id, ValueType::String)
    }

    /// Create a numeric column
    pub fn number(id: impl Into<String>) -> Self {
        Self::new(id, ValueType::Number)
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.value_type == ValueType::Number
    }
}
