//! File and stream plumbing for the CLI layer.
//!
//! The core codec operates on strings; this module owns getting bytes in
//! and out: `-` routes through stdin/stdout, input decoding goes through
//! `encoding_rs` (UTF-8 by default), and delimiters resolve from the file
//! extension (`.tsv` means tab) unless overridden.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use anyhow::{anyhow, Context, Result};
use encoding_rs::{Encoding, UTF_8};

use crate::error::ParseError;

pub const DEFAULT_CSV_DELIMITER: char = ',';
pub const DEFAULT_TSV_DELIMITER: char = '\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<char>) -> char {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn resolve_output_delimiter(path: Option<&Path>, provided: Option<char>, fallback: char) -> char {
    if let Some(delimiter) = provided {
        return delimiter;
    }
    if let Some(path) = path {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => return DEFAULT_TSV_DELIMITER,
            Some(ext) if ext.eq_ignore_ascii_case("csv") => return DEFAULT_CSV_DELIMITER,
            _ => {}
        }
    }
    fallback
}

/// Reads the whole input (file or stdin) and decodes it to a string.
pub fn read_input(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let mut bytes = Vec::new();
    if is_dash(path) {
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Reading from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Opening input file {path:?}"))?
            .read_to_end(&mut bytes)
            .with_context(|| format!("Reading input file {path:?}"))?;
    }
    decode_bytes(&bytes, encoding)
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(ParseError::InvalidInput {
            encoding: encoding.name(),
        }
        .into())
    } else {
        Ok(text.into_owned())
    }
}

/// Writes serialized CSV text to a file or stdout, ending with a newline.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    let mut sink: Box<dyn Write> = match path {
        Some(p) if !is_dash(p) => Box::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        ),
        _ => Box::new(std::io::stdout()),
    };
    sink.write_all(text.as_bytes()).context("Writing output")?;
    if !text.is_empty() && !text.ends_with('\n') {
        sink.write_all(b"\n").context("Writing trailing newline")?;
    }
    sink.flush().context("Flushing output")?;
    Ok(())
}
