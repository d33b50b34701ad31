//! Filter and sort criteria
//!
//! Typed data for a single column's filter, the global threshold filter, and
//! the single-column sort. These carry no evaluation logic; see
//! [`crate::evaluate`] for that.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{ValueType, parse_number};

/// Suffix appended to a numeric column id to name its global threshold field
pub const THRESHOLD_SUFFIX: &str = "Min";

static NO_FILTER: ColumnFilter = ColumnFilter::None;

/// "By values" criteria: free-text search plus an explicit checklist.
///
/// Each half is switched off by being empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuesCriteria {
    /// Case-insensitive substring the cell must contain
    pub search_text: String,
    /// Display strings the cell must be one of
    pub selected_values: BTreeSet<String>,
}

impl ValuesCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_selected<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if neither the search text nor the checklist constrains anything
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.selected_values.is_empty()
    }
}

/// Operators available to an advanced column filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    #[default]
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    Between,
    Empty,
    NotEmpty,
    List,
    /// Any operator name this engine does not know. Evaluates as no constraint.
    #[serde(other)]
    Unrecognized,
}

const STRING_OPERATORS: &[Operator] = &[
    Operator::Contains,
    Operator::Equals,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Empty,
    Operator::NotEmpty,
    Operator::List,
];

const NUMBER_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::GreaterThan,
    Operator::LessThan,
    Operator::Between,
    Operator::Empty,
    Operator::NotEmpty,
    Operator::List,
];

impl Operator {
    /// Parse a wire name such as `"startsWith"`. Unknown names map to
    /// [`Operator::Unrecognized`].
    pub fn parse(name: &str) -> Self {
        match name {
            "contains" => Self::Contains,
            "equals" => Self::Equals,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            "greaterThan" => Self::GreaterThan,
            "lessThan" => Self::LessThan,
            "between" => Self::Between,
            "empty" => Self::Empty,
            "notEmpty" => Self::NotEmpty,
            "list" => Self::List,
            _ => Self::Unrecognized,
        }
    }

    /// Wire name of the operator
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::Between => "between",
            Self::Empty => "empty",
            Self::NotEmpty => "notEmpty",
            Self::List => "list",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Get the display label for the operator
    pub fn label(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::StartsWith => "starts with",
            Self::EndsWith => "ends with",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::Between => "is between",
            Self::Empty => "is empty",
            Self::NotEmpty => "is not empty",
            Self::List => "is in list",
            Self::Unrecognized => "[unrecognized]",
        }
    }

    /// Returns true if this operator requires a value input
    pub fn requires_value(&self) -> bool {
        !matches!(self, Self::Empty | Self::NotEmpty)
    }

    /// Returns true if this operator requires two values (for BETWEEN)
    pub fn requires_two_values(&self) -> bool {
        matches!(self, Self::Between)
    }

    /// Operators offered for a column of the given type, in menu order
    pub fn for_value_type(value_type: ValueType) -> &'static [Operator] {
        match value_type {
            ValueType::String => STRING_OPERATORS,
            ValueType::Number => NUMBER_OPERATORS,
        }
    }

    pub fn supports(&self, value_type: ValueType) -> bool {
        Self::for_value_type(value_type).contains(self)
    }
}

/// Operator-based criteria for a single column
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedCriteria {
    pub operator: Operator,
    #[serde(default)]
    pub operand1: String,
    /// Upper bound; only read by [`Operator::Between`]
    #[serde(default)]
    pub operand2: String,
}

impl AdvancedCriteria {
    pub fn new(operator: Operator, operand1: impl Into<String>) -> Self {
        Self {
            operator,
            operand1: operand1.into(),
            operand2: String::new(),
        }
    }

    pub fn between(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            operator: Operator::Between,
            operand1: low.into(),
            operand2: high.into(),
        }
    }

    /// Criteria for an operator that takes no operand (`empty` / `notEmpty`)
    pub fn unary(operator: Operator) -> Self {
        Self::new(operator, "")
    }

    /// Returns true if these criteria can reject a row.
    ///
    /// Value operators with a blank `operand1` never filter, and neither do
    /// unrecognized operators.
    pub fn constrains(&self) -> bool {
        if self.operator == Operator::Unrecognized {
            return false;
        }
        !self.operator.requires_value() || !self.operand1.trim().is_empty()
    }
}

/// The filter held by one column: nothing, "by values", or an operator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "criteria", rename_all = "lowercase")]
pub enum ColumnFilter {
    #[default]
    None,
    Values(ValuesCriteria),
    Advanced(AdvancedCriteria),
}

impl ColumnFilter {
    pub fn values(criteria: ValuesCriteria) -> Self {
        Self::Values(criteria)
    }

    pub fn advanced(criteria: AdvancedCriteria) -> Self {
        Self::Advanced(criteria)
    }

    /// Returns true if this filter can hide rows (drives the header's active indicator)
    pub fn is_active(&self) -> bool {
        match self {
            Self::None => false,
            Self::Values(criteria) => !criteria.is_empty(),
            Self::Advanced(criteria) => criteria.constrains(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Values(_) => "values",
            Self::Advanced(_) => "advanced",
        }
    }
}

/// Cross-column numeric lower bounds, keyed by threshold field (`weightMin`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalCriteria {
    thresholds: BTreeMap<String, f64>,
}

impl GlobalCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw user text per field.
    ///
    /// Blank text leaves the field absent. Text that is not a number is kept
    /// as a threshold no row can satisfy.
    pub fn from_raw<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut criteria = Self::new();
        for (field, raw) in fields {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            criteria.insert(field, parse_number(raw).unwrap_or(f64::NAN));
        }
        criteria
    }

    /// Threshold field name for a numeric column
    pub fn field_for_column(column_id: &str) -> String {
        format!("{column_id}{THRESHOLD_SUFFIX}")
    }

    /// Column id a threshold field refers to, or `None` if the name lacks the suffix
    pub fn column_for_field(field: &str) -> Option<&str> {
        field
            .strip_suffix(THRESHOLD_SUFFIX)
            .filter(|column| !column.is_empty())
    }

    pub fn with_threshold(mut self, field: impl Into<String>, min: f64) -> Self {
        self.insert(field, min);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, min: f64) {
        self.thresholds.insert(field.into(), min);
    }

    pub fn remove(&mut self, field: &str) -> Option<f64> {
        self.thresholds.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.thresholds.get(field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.thresholds.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.thresholds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// The single active sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortCriterion {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    pub fn asc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Asc)
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Desc)
    }

    /// Next sort after a header click on `column_id`.
    ///
    /// The sorted column cycles asc → desc → none; any other column starts at asc.
    pub fn cycle(current: Option<&SortCriterion>, column_id: &str) -> Option<SortCriterion> {
        match current {
            Some(sort) if sort.column_id == column_id => match sort.direction {
                SortDirection::Asc => Some(Self::desc(column_id)),
                SortDirection::Desc => None,
            },
            _ => Some(Self::asc(column_id)),
        }
    }
}

/// Everything a table's filter UI can change
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub column_filters: BTreeMap<String, ColumnFilter>,
    pub global: GlobalCriteria,
    pub sort: Option<SortCriterion>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter for a column; columns without an entry have [`ColumnFilter::None`]
    pub fn column_filter(&self, column_id: &str) -> &ColumnFilter {
        self.column_filters.get(column_id).unwrap_or(&NO_FILTER)
    }

    pub fn with_column_filter(mut self, column_id: impl Into<String>, filter: ColumnFilter) -> Self {
        self.column_filters.insert(column_id.into(), filter);
        self
    }

    pub fn with_global(mut self, global: GlobalCriteria) -> Self {
        self.global = global;
        self
    }

    pub fn with_sort(mut self, sort: SortCriterion) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Active column filters plus present global thresholds
    pub fn active_filter_count(&self) -> usize {
        self.column_filters
            .values()
            .filter(|f| f.is_active())
            .count()
            + self.global.len()
    }

    /// Returns true if nothing filters or sorts
    pub fn is_pristine(&self) -> bool {
        self.active_filter_count() == 0 && self.sort.is_none()
    }
}
