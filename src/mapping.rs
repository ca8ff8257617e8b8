//! Field mapping and per-field transformations.
//!
//! A mapping list converts source rows into a target shape: each mapping
//! reads one source field, optionally transforms it, and writes one target
//! field. Mappings apply in list order, so a later mapping targeting the
//! same field wins.

use std::path::Path;

use anyhow::{Context, Result};
use heck::ToTitleCase;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::{parse_naive_date, Row, Value};
use crate::error::MappingError;
use crate::generate::format_date;

/// Closed set of named transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transformation {
    ToUpperCase,
    ToLowerCase,
    Trim,
    NumberFormat,
    DateFormat,
    Concatenate,
    Substring,
    Replace,
}

impl Transformation {
    pub const ALL: [Transformation; 8] = [
        Transformation::ToUpperCase,
        Transformation::ToLowerCase,
        Transformation::Trim,
        Transformation::NumberFormat,
        Transformation::DateFormat,
        Transformation::Concatenate,
        Transformation::Substring,
        Transformation::Replace,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Transformation::ToUpperCase => "toUpperCase",
            Transformation::ToLowerCase => "toLowerCase",
            Transformation::Trim => "trim",
            Transformation::NumberFormat => "numberFormat",
            Transformation::DateFormat => "dateFormat",
            Transformation::Concatenate => "concatenate",
            Transformation::Substring => "substring",
            Transformation::Replace => "replace",
        }
    }

    /// Human-readable label derived from the identifier.
    pub fn label(&self) -> String {
        self.id().to_title_case()
    }
}

/// Catalog of transformation identifiers with display labels.
pub fn transformations() -> Vec<(&'static str, String)> {
    Transformation::ALL
        .iter()
        .map(|t| (t.id(), t.label()))
        .collect()
}

/// Per-transformation options. Which fields apply depends on the
/// transformation; unset fields fall back to the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    pub decimals: Option<u32>,
    pub thousands_sep: Option<String>,
    pub format: Option<String>,
    pub fields: Option<Vec<String>>,
    pub separator: Option<String>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub find: Option<String>,
    pub replace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    #[serde(default)]
    pub source_field: String,
    #[serde(default)]
    pub target_field: String,
    #[serde(default)]
    pub transformation: Option<Transformation>,
    #[serde(default)]
    pub options: TransformOptions,
}

impl FieldMapping {
    /// A mapping participates only when both endpoints are named.
    pub fn is_complete(&self) -> bool {
        !self.source_field.is_empty() && !self.target_field.is_empty()
    }
}

/// Loads field mappings from a YAML or JSON file, chosen by extension.
pub fn load_field_mappings(path: &Path) -> Result<Vec<FieldMapping>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Reading field mappings from {path:?}"))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let mappings = if is_json {
        serde_json::from_str(&raw)
            .with_context(|| format!("Parsing JSON field mappings in {path:?}"))?
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Parsing YAML field mappings in {path:?}"))?
    };
    Ok(mappings)
}

/// Applies the mapping list to every source row.
///
/// Incomplete mappings are skipped; missing source fields read as null.
/// Replace patterns are compiled once up front, so a bad pattern fails the
/// whole run before any row is produced.
pub fn apply_mapping(
    source: &[Row],
    mappings: &[FieldMapping],
) -> Result<Vec<Row>, MappingError> {
    if source.is_empty() {
        return Err(MappingError::EmptySource);
    }
    if mappings.is_empty() {
        return Err(MappingError::NoMappings);
    }

    let patterns = compile_patterns(mappings)?;

    let mut output = Vec::with_capacity(source.len());
    for row in source {
        let mut target = Row::new();
        for (mapping, pattern) in mappings.iter().zip(&patterns) {
            if !mapping.is_complete() {
                continue;
            }
            let value = row.get(&mapping.source_field);
            let value = match mapping.transformation {
                Some(transformation) => {
                    apply_transformation(transformation, value, row, &mapping.options, pattern)
                }
                None => value,
            };
            target.insert(mapping.target_field.clone(), value);
        }
        output.push(target);
    }
    Ok(output)
}

/// The `find` option is compiled directly as a regex pattern, not escaped
/// as a literal. Metacharacters in user input therefore keep their regex
/// meaning; changing that would silently alter observable behavior.
fn compile_patterns(mappings: &[FieldMapping]) -> Result<Vec<Option<Regex>>, MappingError> {
    mappings
        .iter()
        .map(|mapping| {
            let uses_replace = mapping.is_complete()
                && mapping.transformation == Some(Transformation::Replace);
            match mapping.options.find.as_deref() {
                Some(find) if uses_replace && !find.is_empty() => Regex::new(find)
                    .map(Some)
                    .map_err(|source| MappingError::InvalidPattern {
                        pattern: find.to_string(),
                        source,
                    }),
                _ => Ok(None),
            }
        })
        .collect()
}

fn apply_transformation(
    transformation: Transformation,
    value: Value,
    row: &Row,
    options: &TransformOptions,
    pattern: &Option<Regex>,
) -> Value {
    match transformation {
        Transformation::ToUpperCase => Value::String(value.as_display().to_uppercase()),
        Transformation::ToLowerCase => Value::String(value.as_display().to_lowercase()),
        Transformation::Trim => Value::String(value.as_display().trim().to_string()),
        Transformation::NumberFormat => match value.as_number() {
            Some(number) => {
                let decimals = options.decimals.unwrap_or(2);
                let separator = options.thousands_sep.as_deref().unwrap_or(",");
                Value::String(format_thousands(number, decimals, separator))
            }
            None => value,
        },
        Transformation::DateFormat => match parse_naive_date(&value.as_display()) {
            Some(date) => {
                let format = options.format.as_deref().unwrap_or("YYYY-MM-DD");
                Value::String(format_date(date, format))
            }
            None => value,
        },
        Transformation::Concatenate => {
            let fields = options.fields.as_deref().unwrap_or(&[]);
            if fields.is_empty() {
                return value;
            }
            let separator = options.separator.as_deref().unwrap_or(" ");
            let joined = fields
                .iter()
                .map(|field| row.get(field).as_display())
                .collect::<Vec<_>>()
                .join(separator);
            Value::String(joined)
        }
        Transformation::Substring => Value::String(substring(
            &value.as_display(),
            options.start.unwrap_or(0),
            options.end,
        )),
        Transformation::Replace => match pattern {
            Some(regex) => {
                let replacement = options.replace.as_deref().unwrap_or("");
                Value::String(
                    regex
                        .replace_all(&value.as_display(), replacement)
                        .into_owned(),
                )
            }
            // Empty find is a no-op.
            None => value,
        },
    }
}

/// Character-indexed substring with start/end clamped and swapped when
/// reversed, so it stays UTF-8 safe and tolerant of loose inputs.
fn substring(value: &str, start: usize, end: Option<usize>) -> String {
    let chars: Vec<char> = value.chars().collect();
    let end = end.unwrap_or(chars.len()).min(chars.len());
    let start = start.min(chars.len());
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    chars[lo..hi].iter().collect()
}

fn format_thousands(value: f64, decimals: u32, separator: &str) -> String {
    let fixed = format!("{value:.precision$}", precision = decimals as usize);
    let (sign, magnitude) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = match magnitude.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (magnitude, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }

    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(source: &str, target: &str, transformation: Option<Transformation>) -> FieldMapping {
        FieldMapping {
            source_field: source.to_string(),
            target_field: target.to_string(),
            transformation,
            options: TransformOptions::default(),
        }
    }

    #[test]
    fn upper_cases_a_mapped_field() {
        let rows = vec![Row::from_iter([("first", "john"), ("last", "doe")])];
        let mapped = apply_mapping(
            &rows,
            &[mapping("first", "FIRST", Some(Transformation::ToUpperCase))],
        )
        .unwrap();
        assert_eq!(mapped[0].get("FIRST"), Value::from("JOHN"));
        assert_eq!(mapped[0].len(), 1);
    }

    #[test]
    fn later_mapping_to_same_target_wins() {
        let rows = vec![Row::from_iter([("a", "1"), ("b", "2")])];
        let mapped = apply_mapping(
            &rows,
            &[mapping("a", "x", None), mapping("b", "x", None)],
        )
        .unwrap();
        assert_eq!(mapped[0].get("x"), Value::from("2"));
    }

    #[test]
    fn incomplete_mappings_are_skipped() {
        let rows = vec![Row::from_iter([("a", "1")])];
        let mapped = apply_mapping(
            &rows,
            &[mapping("a", "", None), mapping("a", "out", None)],
        )
        .unwrap();
        assert!(!mapped[0].contains(""));
        assert_eq!(mapped[0].get("out"), Value::from("1"));
    }

    #[test]
    fn missing_source_field_maps_to_null() {
        let rows = vec![Row::from_iter([("a", "1")])];
        let mapped = apply_mapping(&rows, &[mapping("ghost", "out", None)]).unwrap();
        assert_eq!(mapped[0].get("out"), Value::Null);
    }

    #[test]
    fn number_format_groups_thousands() {
        let rows = vec![Row::from_iter([("n", "1234567.891"), ("t", "abc")])];
        let mut with_format = mapping("n", "out", Some(Transformation::NumberFormat));
        with_format.options.decimals = Some(2);
        let passthrough = mapping("t", "raw", Some(Transformation::NumberFormat));
        let mapped = apply_mapping(&rows, &[with_format, passthrough]).unwrap();
        assert_eq!(mapped[0].get("out"), Value::from("1,234,567.89"));
        // Non-numeric input passes through unchanged.
        assert_eq!(mapped[0].get("raw"), Value::from("abc"));
    }

    #[test]
    fn number_format_handles_negatives_and_custom_separator() {
        assert_eq!(format_thousands(-1234.5, 2, ","), "-1,234.50");
        assert_eq!(format_thousands(1000000.0, 0, " "), "1 000 000");
        assert_eq!(format_thousands(999.0, 2, ","), "999.00");
    }

    #[test]
    fn date_format_renders_and_passes_through_invalid_dates() {
        let rows = vec![Row::from_iter([("d", "2024-05-06"), ("junk", "soon")])];
        let mut formatted = mapping("d", "out", Some(Transformation::DateFormat));
        formatted.options.format = Some("MM/DD/YYYY".into());
        let passthrough = mapping("junk", "raw", Some(Transformation::DateFormat));
        let mapped = apply_mapping(&rows, &[formatted, passthrough]).unwrap();
        assert_eq!(mapped[0].get("out"), Value::from("05/06/2024"));
        assert_eq!(mapped[0].get("raw"), Value::from("soon"));
    }

    #[test]
    fn concatenate_joins_row_fields() {
        let rows = vec![Row::from_iter([("first", "john"), ("last", "doe")])];
        let mut concat = mapping("first", "full", Some(Transformation::Concatenate));
        concat.options.fields = Some(vec!["first".into(), "last".into(), "ghost".into()]);
        let mapped = apply_mapping(&rows, &[concat]).unwrap();
        assert_eq!(mapped[0].get("full"), Value::from("john doe "));
    }

    #[test]
    fn concatenate_without_fields_keeps_the_original_value() {
        let rows = vec![Row::from_iter([("a", "keep")])];
        let concat = mapping("a", "out", Some(Transformation::Concatenate));
        let mapped = apply_mapping(&rows, &[concat]).unwrap();
        assert_eq!(mapped[0].get("out"), Value::from("keep"));
    }

    #[test]
    fn substring_uses_character_indices() {
        assert_eq!(substring("hello", 1, Some(3)), "el");
        assert_eq!(substring("hello", 3, Some(1)), "el");
        assert_eq!(substring("héllo", 0, Some(2)), "hé");
        assert_eq!(substring("abc", 10, None), "");
    }

    #[test]
    fn replace_treats_find_as_a_regex_pattern() {
        let rows = vec![Row::from_iter([("v", "a1b22c")])];
        let mut replace = mapping("v", "out", Some(Transformation::Replace));
        replace.options.find = Some("[0-9]+".into());
        replace.options.replace = Some("#".into());
        let mapped = apply_mapping(&rows, &[replace]).unwrap();
        assert_eq!(mapped[0].get("out"), Value::from("a#b#c"));
    }

    #[test]
    fn replace_with_empty_find_is_a_no_op() {
        let rows = vec![Row::from_iter([("v", "abc")])];
        let mut replace = mapping("v", "out", Some(Transformation::Replace));
        replace.options.find = Some(String::new());
        let mapped = apply_mapping(&rows, &[replace]).unwrap();
        assert_eq!(mapped[0].get("out"), Value::from("abc"));
    }

    #[test]
    fn invalid_replace_pattern_fails_the_run() {
        let rows = vec![Row::from_iter([("v", "abc")])];
        let mut replace = mapping("v", "out", Some(Transformation::Replace));
        replace.options.find = Some("[unclosed".into());
        let err = apply_mapping(&rows, &[replace]).unwrap_err();
        assert!(matches!(err, MappingError::InvalidPattern { .. }));
    }

    #[test]
    fn empty_source_and_empty_mappings_are_errors() {
        let rows = vec![Row::from_iter([("a", "1")])];
        assert!(matches!(
            apply_mapping(&[], &[mapping("a", "b", None)]),
            Err(MappingError::EmptySource)
        ));
        assert!(matches!(
            apply_mapping(&rows, &[]),
            Err(MappingError::NoMappings)
        ));
    }

    #[test]
    fn catalog_labels_are_title_cased() {
        let catalog = transformations();
        assert_eq!(catalog.len(), Transformation::ALL.len());
        assert!(catalog.contains(&("toUpperCase", "To Upper Case".to_string())));
        assert!(catalog.contains(&("numberFormat", "Number Format".to_string())));
    }

    #[test]
    fn transformation_ids_round_trip_through_serde() {
        for transformation in Transformation::ALL {
            let encoded = serde_json::to_string(&transformation).unwrap();
            assert_eq!(encoded, format!("\"{}\"", transformation.id()));
            let decoded: Transformation = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, transformation);
        }
    }
}
