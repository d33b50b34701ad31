use crate::criteria::GlobalCriteria;
use crate::types::Row;

/// Evaluate the global threshold filter against a row.
///
/// Each present field `<column>Min` requires `row[column] >= threshold`. A cell
/// that is not a number fails its test, as does a `NaN` threshold. Field names
/// without the suffix impose nothing.
pub fn evaluate_global(row: &Row, criteria: &GlobalCriteria) -> bool {
    criteria.iter().all(|(field, threshold)| {
        let Some(column) = GlobalCriteria::column_for_field(field) else {
            return true;
        };
        row.get(column)
            .to_number()
            .is_some_and(|value| value >= threshold)
    })
}
