use thiserror::Error;

/// Errors raised while turning raw input into parseable CSV text.
///
/// Malformed-but-decodable CSV never errors: the parser degrades to an
/// empty dataset instead. Only input that is not text at all surfaces
/// here.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Input is not valid {encoding} text")]
    InvalidInput { encoding: &'static str },
}

/// Errors raised by the synthetic data generator. Generation never
/// partially completes: either the full dataset is returned or one of
/// these surfaces before any rows are handed back.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("At least one column definition is required")]
    NoColumns,
    #[error("Row count must be between 1 and {max}, got {requested}")]
    RowCountOutOfRange { requested: usize, max: usize },
    #[error("Column name must not be empty")]
    EmptyColumnName,
    #[error("Duplicate column name '{0}'")]
    DuplicateColumnName(String),
}

/// Errors raised by the field-mapping pipeline.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Source data is empty; nothing to map")]
    EmptySource,
    #[error("At least one field mapping is required")]
    NoMappings,
    #[error("Invalid pattern '{pattern}' in replace transformation: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
