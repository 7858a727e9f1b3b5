use std::path::PathBuf;

use thiserror::Error;

/// Anything that prevents a dataset from being built. Raised once at startup;
/// queries on a loaded dataset never fail.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("column '{column}' has unsupported type {found}")]
    ColumnType { column: &'static str, found: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
