use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path} as CSV: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("row {row} is missing required column '{column}'")]
    MissingColumn { row: usize, column: &'static str },
    #[error("row {row} has unparsable date '{value}'")]
    Date { row: usize, value: String },
    #[error("row {row}: column '{column}' has unparsable numeric value '{value}'")]
    Number {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("storage failure: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, EtlError>;
