use crate::criteria::{AdvancedCriteria, ColumnFilter, Operator, ValuesCriteria};
use crate::predicates;
use crate::types::{ColumnSpec, Row, Value, ValueType};

/// Evaluate a column filter against the cell of `row` under `spec`.
///
/// Never fails: operators the column's type does not offer, and unrecognized
/// operators, impose no constraint.
pub fn evaluate_column(row: &Row, spec: &ColumnSpec, filter: &ColumnFilter) -> bool {
    match filter {
        ColumnFilter::None => true,
        ColumnFilter::Values(criteria) => matches_values(row.get(&spec.id), criteria),
        ColumnFilter::Advanced(criteria) => {
            matches_advanced(row.get(&spec.id), spec.value_type, criteria)
        }
    }
}

/// "By values" test on the cell's display string
pub fn matches_values(cell: &Value, criteria: &ValuesCriteria) -> bool {
    if criteria.is_empty() {
        return true;
    }

    let text = cell.display_string();
    let search_ok = criteria.search_text.is_empty()
        || predicates::contains_ignore_case(&text, &criteria.search_text);
    let selected_ok = criteria.selected_values.is_empty()
        || criteria.selected_values.contains(&*text);

    search_ok && selected_ok
}

/// Operator test on the cell coerced to `value_type`
pub fn matches_advanced(cell: &Value, value_type: ValueType, criteria: &AdvancedCriteria) -> bool {
    let operator = criteria.operator;
    if !operator.supports(value_type) {
        return true;
    }

    let operand = criteria.operand1.as_str();
    match value_type {
        ValueType::String => {
            let text = cell.display_string();
            match operator {
                Operator::Contains => predicates::contains(&text, operand),
                Operator::Equals => predicates::equals_text(&text, operand),
                Operator::StartsWith => predicates::starts_with(&text, operand),
                Operator::EndsWith => predicates::ends_with(&text, operand),
                Operator::Empty => predicates::empty_text(&text),
                Operator::NotEmpty => !predicates::empty_text(&text),
                Operator::List => predicates::in_text_list(&text, operand),
                _ => true,
            }
        }
        ValueType::Number => {
            let number = cell.to_number();
            match operator {
                Operator::Equals => predicates::equals_number(number, operand),
                Operator::GreaterThan => predicates::greater_than(number, operand),
                Operator::LessThan => predicates::less_than(number, operand),
                Operator::Between => predicates::between(number, operand, &criteria.operand2),
                Operator::Empty => predicates::empty_number(number),
                Operator::NotEmpty => !predicates::empty_number(number),
                Operator::List => predicates::in_number_list(number, operand),
                _ => true,
            }
        }
    }
}
