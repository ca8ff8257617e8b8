pub mod cli;
pub mod codec;
pub mod data;
pub mod error;
pub mod generate;
pub mod io_utils;
pub mod mapping;
pub mod provider;
pub mod stats;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use crate::cli::{Cli, Commands};
use crate::codec::{ParseOptions, SerializeOptions};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_forge", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => handle_generate(&args),
        Commands::Map(args) => handle_map(&args),
        Commands::Stats(args) => handle_stats(&args),
        Commands::Convert(args) => handle_convert(&args),
        Commands::Transforms => handle_transforms(),
    }
}

fn handle_generate(args: &cli::GenerateArgs) -> Result<()> {
    let columns = generate::load_column_definitions(&args.spec)
        .with_context(|| format!("Loading column definitions from {:?}", args.spec))?;
    let dataset = generate::generate(&columns, args.rows)
        .with_context(|| format!("Generating {} row(s)", args.rows))?;

    let delimiter = io_utils::resolve_output_delimiter(
        args.output.as_deref(),
        args.output_delimiter,
        io_utils::DEFAULT_CSV_DELIMITER,
    );
    let text = codec::serialize(
        &dataset.rows,
        &SerializeOptions {
            delimiter,
            columns: Some(dataset.columns.clone()),
            ..SerializeOptions::default()
        },
    );
    io_utils::write_output(args.output.as_deref(), &text)?;
    info!(
        "Generated {} row(s) across {} column(s)",
        dataset.rows.len(),
        dataset.columns.len()
    );
    Ok(())
}

fn handle_map(args: &cli::MapArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let text = io_utils::read_input(&args.input, encoding)?;
    let parsed = codec::parse(
        &text,
        &ParseOptions {
            delimiter,
            ..ParseOptions::default()
        },
    );

    let mappings = mapping::load_field_mappings(&args.mappings)
        .with_context(|| format!("Loading field mappings from {:?}", args.mappings))?;
    let mapped = mapping::apply_mapping(&parsed.rows, &mappings)
        .with_context(|| format!("Applying mappings to {:?}", args.input))?;

    let output_delimiter = io_utils::resolve_output_delimiter(
        args.output.as_deref(),
        args.output_delimiter,
        delimiter,
    );
    let text = codec::serialize(
        &mapped,
        &SerializeOptions {
            delimiter: output_delimiter,
            ..SerializeOptions::default()
        },
    );
    io_utils::write_output(args.output.as_deref(), &text)?;
    info!(
        "Mapped {} row(s) through {} mapping rule(s)",
        mapped.len(),
        mappings.len()
    );
    Ok(())
}

fn handle_stats(args: &cli::StatsArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let text = io_utils::read_input(&args.input, encoding)?;
    let parsed = codec::parse(
        &text,
        &ParseOptions {
            delimiter,
            ..ParseOptions::default()
        },
    );

    let columns: Vec<String> = if args.columns.is_empty() {
        parsed.columns.clone()
    } else {
        for column in &args.columns {
            if !parsed.columns.contains(column) {
                return Err(anyhow!("Column '{column}' not found in {:?}", args.input));
            }
        }
        args.columns.clone()
    };

    let profiles = stats::compute_stats(&parsed.rows, &columns);
    let headers = ["column", "type", "unique", "empty", "min", "max", "avg"]
        .map(str::to_string)
        .to_vec();
    let rows: Vec<Vec<String>> = columns
        .iter()
        .filter_map(|column| profiles.get(column).map(|profile| (column, profile)))
        .map(|(column, profile)| {
            let numeric = profile.numeric;
            vec![
                column.clone(),
                profile.kind.label().to_string(),
                profile.unique_count.to_string(),
                profile.empty_count.to_string(),
                numeric.map(|n| display_metric(n.min)).unwrap_or_default(),
                numeric.map(|n| display_metric(n.max)).unwrap_or_default(),
                numeric.map(|n| display_metric(n.avg)).unwrap_or_default(),
            ]
        })
        .collect();
    table::print_table(&headers, &rows);
    info!("Profiled {} column(s) over {} row(s)", rows.len(), parsed.rows.len());
    Ok(())
}

// Display-layer rounding only; the engine keeps full precision.
fn display_metric(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn handle_convert(args: &cli::ConvertArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let text = io_utils::read_input(&args.input, encoding)?;
    let parsed = codec::parse(
        &text,
        &ParseOptions {
            header: !args.no_header,
            skip_empty_lines: !args.keep_empty_lines,
            delimiter,
            ..ParseOptions::default()
        },
    );

    let output_delimiter = io_utils::resolve_output_delimiter(
        args.output.as_deref(),
        args.output_delimiter,
        delimiter,
    );
    let output = codec::serialize(
        &parsed.rows,
        &SerializeOptions {
            delimiter: output_delimiter,
            include_header: !args.skip_output_header,
            columns: Some(parsed.columns.clone()),
            quote_strings: !args.no_quotes,
        },
    );
    io_utils::write_output(args.output.as_deref(), &output)?;
    info!(
        "Converted {} row(s) across {} column(s)",
        parsed.rows.len(),
        parsed.columns.len()
    );
    Ok(())
}

fn handle_transforms() -> Result<()> {
    let headers = vec!["id".to_string(), "label".to_string()];
    let rows: Vec<Vec<String>> = mapping::transformations()
        .into_iter()
        .map(|(id, label)| vec![id.to_string(), label])
        .collect();
    table::print_table(&headers, &rows);
    Ok(())
}
