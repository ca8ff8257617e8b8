//! Column-type-driven synthetic dataset generation.
//!
//! Rows are built sequentially and, within a row, columns evaluate in
//! declaration order. Later columns may read earlier columns' values of
//! the same row; the `email` type relies on this to derive addresses from
//! a previously generated name column. That ordering is part of the
//! public contract.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use rand::{Rng, RngCore};
use regex::Regex;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::{parse_naive_date, Dataset, Row, Value};
use crate::error::GenerationError;
use crate::provider::{Gender, RealisticDataProvider, WordListProvider};

pub const MAX_ROW_COUNT: usize = 10_000;

/// Closed set of generator types. Unrecognised `type` strings in a spec
/// file deserialize to `Unknown`, which generates an empty string instead
/// of failing the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneratorType {
    Id,
    FullName,
    FirstName,
    LastName,
    Email,
    Date,
    Number,
    Price,
    Boolean,
    OneOf,
    String,
    Paragraph,
    Uuid,
    Color,
    Company,
    JobTitle,
    Phone,
    Address,
    Street,
    City,
    State,
    ZipCode,
    Country,
    ProductName,
    #[serde(other)]
    Unknown,
}

/// Per-type options. All fields are optional; which ones apply depends on
/// the generator type, matching the `{ name, type, options }` spec shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub start_at: Option<i64>,
    pub gender: Option<Gender>,
    pub use_name_column: Option<String>,
    pub domain: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub format: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub decimals: Option<u32>,
    pub true_probability: Option<f64>,
    pub values: Option<Vec<String>>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GeneratorType,
    #[serde(default)]
    pub options: GeneratorOptions,
}

/// Loads column definitions from a YAML or JSON file, chosen by extension.
pub fn load_column_definitions(path: &Path) -> Result<Vec<ColumnDefinition>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Reading column definitions from {path:?}"))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let definitions = if is_json {
        serde_json::from_str(&raw)
            .with_context(|| format!("Parsing JSON column definitions in {path:?}"))?
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Parsing YAML column definitions in {path:?}"))?
    };
    Ok(definitions)
}

/// Generates `row_count` rows using the built-in provider and thread RNG.
pub fn generate(
    columns: &[ColumnDefinition],
    row_count: usize,
) -> Result<Dataset, GenerationError> {
    generate_with(columns, row_count, &WordListProvider, &mut rand::thread_rng())
}

/// Generates a dataset with an injected provider and RNG.
///
/// Fails fast on an empty definition list, an out-of-range row count, or a
/// missing/duplicate column name; no partial dataset is ever returned.
pub fn generate_with(
    columns: &[ColumnDefinition],
    row_count: usize,
    provider: &dyn RealisticDataProvider,
    rng: &mut dyn RngCore,
) -> Result<Dataset, GenerationError> {
    if columns.is_empty() {
        return Err(GenerationError::NoColumns);
    }
    if row_count == 0 || row_count > MAX_ROW_COUNT {
        return Err(GenerationError::RowCountOutOfRange {
            requested: row_count,
            max: MAX_ROW_COUNT,
        });
    }
    let mut seen = Vec::with_capacity(columns.len());
    for column in columns {
        if column.name.is_empty() {
            return Err(GenerationError::EmptyColumnName);
        }
        if seen.contains(&column.name.as_str()) {
            return Err(GenerationError::DuplicateColumnName(column.name.clone()));
        }
        seen.push(column.name.as_str());
    }

    let mut rows = Vec::with_capacity(row_count);
    for index in 0..row_count {
        let mut row = Row::new();
        for column in columns {
            let value = generate_value(column, index, &row, provider, rng);
            row.insert(column.name.clone(), value);
        }
        rows.push(row);
    }

    let column_names = columns.iter().map(|c| c.name.clone()).collect();
    Ok(Dataset::new(column_names, rows))
}

fn generate_value(
    column: &ColumnDefinition,
    index: usize,
    row: &Row,
    provider: &dyn RealisticDataProvider,
    rng: &mut dyn RngCore,
) -> Value {
    let options = &column.options;
    match column.kind {
        GeneratorType::Id => {
            let prefix = options.prefix.as_deref().unwrap_or("");
            let start_at = options.start_at.unwrap_or(1);
            Value::String(format!("{prefix}{}", start_at + index as i64))
        }
        GeneratorType::FullName => Value::String(provider.full_name(rng, options.gender)),
        GeneratorType::FirstName => Value::String(provider.first_name(rng, options.gender)),
        GeneratorType::LastName => Value::String(provider.last_name(rng)),
        GeneratorType::Email => Value::String(generate_email(options, row, provider, rng)),
        GeneratorType::Date => Value::String(generate_date(options, rng)),
        GeneratorType::Number => {
            Value::Number(generate_number(options, options.decimals.unwrap_or(0), rng))
        }
        GeneratorType::Price => {
            Value::Number(generate_number(options, options.decimals.unwrap_or(2), rng))
        }
        GeneratorType::Boolean => {
            let threshold = options.true_probability.unwrap_or(50.0);
            Value::Boolean(rng.gen_range(0.0..100.0) < threshold)
        }
        GeneratorType::OneOf => {
            let values = options.values.as_deref().unwrap_or(&[]);
            if values.is_empty() {
                Value::String(String::new())
            } else {
                Value::String(values[rng.gen_range(0..values.len())].clone())
            }
        }
        GeneratorType::String => Value::String(generate_string(options, rng)),
        GeneratorType::Paragraph => Value::String(provider.paragraph(rng)),
        GeneratorType::Uuid => Value::String(Uuid::new_v4().to_string()),
        GeneratorType::Color => Value::String(provider.color(rng)),
        GeneratorType::Company => Value::String(provider.company(rng)),
        GeneratorType::JobTitle => Value::String(provider.job_title(rng)),
        GeneratorType::Phone => Value::String(provider.phone(rng)),
        GeneratorType::Address => Value::String(provider.address(rng)),
        GeneratorType::Street => Value::String(provider.street(rng)),
        GeneratorType::City => Value::String(provider.city(rng)),
        GeneratorType::State => Value::String(provider.state(rng)),
        GeneratorType::ZipCode => Value::String(provider.zip_code(rng)),
        GeneratorType::Country => Value::String(provider.country(rng)),
        GeneratorType::ProductName => Value::String(provider.product_name(rng)),
        GeneratorType::Unknown => Value::String(String::new()),
    }
}

fn generate_email(
    options: &GeneratorOptions,
    row: &Row,
    provider: &dyn RealisticDataProvider,
    rng: &mut dyn RngCore,
) -> String {
    let domain = options.domain.as_deref().unwrap_or("example.com");
    if let Some(name_column) = &options.use_name_column {
        let prior = row.get(name_column);
        if !prior.is_empty_value() {
            return format!("{}@{domain}", slugify(&prior.as_display()));
        }
    }
    let first = provider.first_name(rng, None).to_lowercase();
    let last = provider.last_name(rng).to_lowercase();
    let digits = rng.gen_range(1..100);
    format!("{first}.{last}{digits}@{domain}")
}

/// Lowercases and collapses every non-alphanumeric run into a single dot.
fn slugify(input: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let pattern = NON_ALNUM.get_or_init(|| Regex::new("[^a-z0-9]+").unwrap());
    pattern.replace_all(&input.to_lowercase(), ".").into_owned()
}

fn generate_date(options: &GeneratorOptions, rng: &mut dyn RngCore) -> String {
    let default_start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let start = options
        .start_date
        .as_deref()
        .and_then(parse_naive_date)
        .unwrap_or(default_start);
    let end = options
        .end_date
        .as_deref()
        .and_then(parse_naive_date)
        .unwrap_or_else(|| Local::now().date_naive());
    let span = (end - start).num_days().max(0);
    let date = start + chrono::Duration::days(rng.gen_range(0..=span));
    format_date(date, options.format.as_deref().unwrap_or("YYYY-MM-DD"))
}

/// Renders a date through token substitution, with the three canonical
/// formats special-cased so they stay exact regardless of token handling.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let (year, month, day) = (date.year(), date.month(), date.day());
    match format {
        "MM/DD/YYYY" => format!("{month:02}/{day:02}/{year:04}"),
        "DD/MM/YYYY" => format!("{day:02}/{month:02}/{year:04}"),
        "YYYY-MM-DD" => format!("{year:04}-{month:02}-{day:02}"),
        other => other
            .replace("YYYY", &format!("{year:04}"))
            .replace("YY", &format!("{:02}", year.rem_euclid(100)))
            .replace("MM", &format!("{month:02}"))
            .replace("DD", &format!("{day:02}"))
            .replace('M', &month.to_string())
            .replace('D', &day.to_string()),
    }
}

/// Resolves the effective numeric range with the historical fallback chain
/// (`min` → `max` → default), where zero counts as unset. A legitimate
/// `min: 0` therefore falls through; see DESIGN.md for why this stays.
fn resolve_range(options: &GeneratorOptions) -> (f64, f64) {
    let truthy = |value: Option<f64>| value.filter(|v| *v != 0.0);
    let min = truthy(options.min).or_else(|| truthy(options.max)).unwrap_or(5.0);
    let max = truthy(options.max).or_else(|| truthy(options.min)).unwrap_or(10.0);
    (min, max)
}

fn generate_number(options: &GeneratorOptions, decimals: u32, rng: &mut dyn RngCore) -> f64 {
    let (min, max) = resolve_range(options);
    let raw = min + rng.gen::<f64>() * (max - min);
    if decimals == 0 {
        raw.floor()
    } else {
        round_to(raw, decimals)
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(decimals))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

fn generate_string(options: &GeneratorOptions, rng: &mut dyn RngCore) -> String {
    let truthy = |value: Option<usize>| value.filter(|v| *v != 0);
    let lo = truthy(options.min_length)
        .or_else(|| truthy(options.max_length))
        .unwrap_or(5);
    let hi = truthy(options.max_length)
        .or_else(|| truthy(options.min_length))
        .unwrap_or(10);
    let length = rng.gen_range(lo.min(hi)..=lo.max(hi));
    let body: String = (0..length)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();
    format!(
        "{}{body}{}",
        options.prefix.as_deref().unwrap_or(""),
        options.suffix.as_deref().unwrap_or("")
    )
}
