//! Per-column profiling: type inference, distinct/empty counts, and
//! numeric summaries. Derived values only; callers recompute whenever the
//! source data or column list changes.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::data::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Number,
    Text,
}

impl ColumnKind {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Number => "Number",
            ColumnKind::Text => "Text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    /// Unrounded mean; presentation layers round for display.
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub kind: ColumnKind,
    pub unique_count: usize,
    pub empty_count: usize,
    pub numeric: Option<NumericStats>,
}

/// Profiles each named column across `rows`.
///
/// A column is `Number` iff every non-empty value coerces numerically; a
/// column with no non-empty values at all also classifies as `Number`
/// (inherited default), but reports no numeric summary. Distinct counting
/// runs over all values, with null/missing collapsing to a single distinct
/// value.
pub fn compute_stats(rows: &[Row], columns: &[String]) -> BTreeMap<String, ColumnStats> {
    columns
        .iter()
        .map(|column| (column.clone(), profile_column(rows, column)))
        .collect()
}

fn profile_column(rows: &[Row], column: &str) -> ColumnStats {
    let values: Vec<_> = rows.iter().map(|row| row.get(column)).collect();
    let non_empty: Vec<_> = values
        .iter()
        .filter(|value| !value.is_empty_value())
        .collect();

    let numbers: Option<Vec<f64>> = non_empty.iter().map(|value| value.as_number()).collect();
    let kind = if numbers.is_some() {
        ColumnKind::Number
    } else {
        ColumnKind::Text
    };

    let distinct: HashSet<Option<String>> =
        values.iter().map(|value| value.identity()).collect();

    let numeric = numbers.filter(|nums| !nums.is_empty()).map(|nums| {
        let min = nums.iter().copied().fold(f64::INFINITY, f64::min);
        let max = nums.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = nums.iter().sum::<f64>() / nums.len() as f64;
        NumericStats { min, max, avg }
    });

    ColumnStats {
        kind,
        unique_count: distinct.len(),
        empty_count: values.len() - non_empty.len(),
        numeric,
    }
}
