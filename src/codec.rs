//! CSV text codec.
//!
//! The parser splits on line boundaries first and only then tokenizes each
//! line with a quote-aware scan. Consequence: when `skip_empty_lines` is
//! enabled, a blank line inside a quoted multi-line field is dropped before
//! the tokenizer ever sees it. Known limitation; exported datasets never
//! embed newlines so the round-trip guarantee is unaffected.

use crate::data::{Row, Value};

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Treat the first row as column names.
    pub header: bool,
    /// Drop lines that are empty after trimming, before tokenization.
    pub skip_empty_lines: bool,
    pub delimiter: char,
    pub quote: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            header: true,
            skip_empty_lines: true,
            delimiter: ',',
            quote: '"',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub rows: Vec<Row>,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SerializeOptions {
    pub delimiter: char,
    pub include_header: bool,
    /// Explicit output column order; falls back to the first row's key order.
    pub columns: Option<Vec<String>>,
    /// Wrap string values in quotes with internal quotes doubled.
    pub quote_strings: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
            columns: None,
            quote_strings: true,
        }
    }
}

/// Parses raw CSV text into rows plus an ordered column list.
///
/// With `header`, row 0 supplies column names verbatim: duplicate names are
/// kept in the column list, and positional assignment means the later
/// duplicate overwrites the earlier one's value on every row. Without
/// `header`, synthetic names `Column 1..N` are sized from the first line.
/// Short rows leave trailing columns unset; long rows drop the extras.
/// Empty input yields an empty result rather than an error.
pub fn parse(text: &str, options: &ParseOptions) -> Parsed {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !options.skip_empty_lines || !line.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Parsed::default();
    }

    let (columns, data_lines) = if options.header {
        let columns = tokenize(lines[0], options.delimiter, options.quote);
        (columns, &lines[1..])
    } else {
        let width = tokenize(lines[0], options.delimiter, options.quote).len();
        let columns = (1..=width).map(|i| format!("Column {i}")).collect();
        (columns, &lines[..])
    };

    let rows = data_lines
        .iter()
        .map(|line| {
            let fields = tokenize(line, options.delimiter, options.quote);
            let mut row = Row::new();
            for (column, field) in columns.iter().zip(fields) {
                row.insert(column.clone(), Value::String(field));
            }
            row
        })
        .collect();

    Parsed { rows, columns }
}

/// Single left-to-right scan with RFC 4180 quoting: a doubled quote inside
/// a quoted field emits one literal quote; the delimiter only terminates a
/// field outside quotes. Quote characters themselves are never emitted.
fn tokenize(line: &str, delimiter: char, quote: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let chars: Vec<char> = line.chars().collect();
    let mut idx = 0;

    while idx < chars.len() {
        let ch = chars[idx];
        if ch == quote {
            if in_quotes && chars.get(idx + 1) == Some(&quote) {
                field.push(quote);
                idx += 2;
                continue;
            }
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
        idx += 1;
    }
    fields.push(field);
    fields
}

/// Serializes rows back to CSV text.
///
/// Null renders as an empty field; strings are quoted (internal quotes
/// doubled) when `quote_strings` is on; numbers and booleans are written
/// bare. Lines join with `\n` so the output is bit-compatible with what
/// [`parse`] re-reads.
pub fn serialize(rows: &[Row], options: &SerializeOptions) -> String {
    let columns: Vec<String> = match &options.columns {
        Some(columns) => columns.clone(),
        None => match rows.first() {
            Some(first) => first.keys().map(str::to_string).collect(),
            None => return String::new(),
        },
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    if options.include_header {
        lines.push(columns.join(&options.delimiter.to_string()));
    }
    for row in rows {
        let fields: Vec<String> = columns
            .iter()
            .map(|column| render_field(&row.get(column), options))
            .collect();
        lines.push(fields.join(&options.delimiter.to_string()));
    }
    lines.join("\n")
}

fn render_field(value: &Value, options: &SerializeOptions) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) if options.quote_strings => {
            format!("\"{}\"", s.replace('"', "\"\""))
        }
        other => other.as_display(),
    }
}
