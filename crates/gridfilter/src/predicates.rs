//! Predicate library
//!
//! One pure test per operator. Text predicates take the cell's display string,
//! numeric predicates take the cell's coerced number (`None` when coercion
//! failed). Operands arrive as raw user text.
//!
//! Every value operator treats a blank `operand1` as "no constraint" and
//! passes the row. `empty`/`notEmpty` take no operand.

use crate::types::parse_number;

/// Returns true if the text is empty or whitespace-only
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn ascii_contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let (hay, needle) = (haystack.as_bytes(), needle.as_bytes());
    if needle.len() > hay.len() {
        return false;
    }
    hay.windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

fn ascii_starts_with_case_insensitive(haystack: &str, needle: &str) -> bool {
    let (hay, needle) = (haystack.as_bytes(), needle.as_bytes());
    if needle.len() > hay.len() {
        return false;
    }
    hay[..needle.len()].eq_ignore_ascii_case(needle)
}

fn ascii_ends_with_case_insensitive(haystack: &str, needle: &str) -> bool {
    let (hay, needle) = (haystack.as_bytes(), needle.as_bytes());
    if needle.len() > hay.len() {
        return false;
    }
    hay[hay.len() - needle.len()..].eq_ignore_ascii_case(needle)
}

/// Case-insensitive substring test with no blank-operand rule.
///
/// Used by the "by values" search box, where an empty search matches everything.
pub fn contains_ignore_case(value: &str, needle: &str) -> bool {
    ascii_contains_case_insensitive(value, needle)
}

pub fn contains(value: &str, operand: &str) -> bool {
    is_blank(operand) || ascii_contains_case_insensitive(value, operand)
}

pub fn equals_text(value: &str, operand: &str) -> bool {
    is_blank(operand) || value.eq_ignore_ascii_case(operand)
}

pub fn starts_with(value: &str, operand: &str) -> bool {
    is_blank(operand) || ascii_starts_with_case_insensitive(value, operand)
}

pub fn ends_with(value: &str, operand: &str) -> bool {
    is_blank(operand) || ascii_ends_with_case_insensitive(value, operand)
}

pub fn equals_number(value: Option<f64>, operand: &str) -> bool {
    if is_blank(operand) {
        return true;
    }
    matches!((value, parse_number(operand)), (Some(v), Some(o)) if v == o)
}

/// `value > operand`; false when either side is not a number
pub fn greater_than(value: Option<f64>, operand: &str) -> bool {
    if is_blank(operand) {
        return true;
    }
    matches!((value, parse_number(operand)), (Some(v), Some(o)) if v > o)
}

/// `value < operand`; false when either side is not a number
pub fn less_than(value: Option<f64>, operand: &str) -> bool {
    if is_blank(operand) {
        return true;
    }
    matches!((value, parse_number(operand)), (Some(v), Some(o)) if v < o)
}

/// Inclusive `low <= value <= high`.
///
/// Bounds are never swapped: `low > high` matches nothing.
pub fn between(value: Option<f64>, low: &str, high: &str) -> bool {
    if is_blank(low) {
        return true;
    }
    match (value, parse_number(low), parse_number(high)) {
        (Some(v), Some(lo), Some(hi)) => lo <= v && v <= hi,
        _ => false,
    }
}

pub fn empty_text(value: &str) -> bool {
    is_blank(value)
}

pub fn empty_number(value: Option<f64>) -> bool {
    value.is_none()
}

/// Comma-separated tokens of a list operand, trimmed, empty tokens kept
pub fn list_tokens(operand: &str) -> impl Iterator<Item = &str> {
    operand.split(',').map(str::trim)
}

/// Numeric match candidates of a list operand. Unparseable tokens are `None`
/// and never match.
pub fn numeric_list_candidates(operand: &str) -> Vec<Option<f64>> {
    list_tokens(operand).map(parse_number).collect()
}

/// Exact (case-sensitive) membership of the display string in the list
pub fn in_text_list(value: &str, operand: &str) -> bool {
    is_blank(operand) || list_tokens(operand).any(|token| token == value)
}

pub fn in_number_list(value: Option<f64>, operand: &str) -> bool {
    if is_blank(operand) {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    list_tokens(operand)
        .filter_map(parse_number)
        .any(|candidate| candidate == value)
}
