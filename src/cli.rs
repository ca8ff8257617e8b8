use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate, map, and profile CSV datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a synthetic CSV dataset from a column-definition file
    Generate(GenerateArgs),
    /// Transform a CSV file through a field-mapping file
    Map(MapArgs),
    /// Profile columns: type, distinct/empty counts, numeric summary
    Stats(StatsArgs),
    /// Re-parse and re-serialize a CSV file with different options
    Convert(ConvertArgs),
    /// List the available field transformations
    Transforms,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Column-definition file (.yml or .json)
    #[arg(short = 's', long = "spec")]
    pub spec: PathBuf,
    /// Number of rows to generate (1..=10000)
    #[arg(short = 'r', long = "rows", default_value_t = 100)]
    pub rows: usize,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Delimiter for the output (defaults by extension)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<char>,
}

#[derive(Debug, Args)]
pub struct MapArgs {
    /// Input CSV file (use '-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Field-mapping file (.yml or .json)
    #[arg(short = 'm', long = "mappings")]
    pub mappings: PathBuf,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,
    /// Delimiter to use for output (defaults to input delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<char>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Input CSV file to profile (use '-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Columns to include (defaults to all)
    #[arg(short = 'C', long = "columns", action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input CSV file (use '-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character for reading input
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,
    /// Delimiter to use for output (defaults to input delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<char>,
    /// Treat the input as headerless (synthesizes Column 1..N)
    #[arg(long = "no-header")]
    pub no_header: bool,
    /// Keep lines that are empty after trimming
    #[arg(long = "keep-empty-lines")]
    pub keep_empty_lines: bool,
    /// Write string fields without surrounding quotes
    #[arg(long = "no-quotes")]
    pub no_quotes: bool,
    /// Omit the header row from the output
    #[arg(long = "skip-output-header")]
    pub skip_output_header: bool,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<char, String> {
    match value {
        "tab" | "\t" => Ok('\t'),
        "comma" | "," => Ok(','),
        "|" | "pipe" => Ok('|'),
        ";" | "semicolon" => Ok(';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first)
        }
    }
}
