//! Error types for the hopemarket library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hopemarket operations.
#[derive(Debug, Error)]
pub enum HopeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no header to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A table is present but lacks the columns a step needs.
    #[error("Missing columns for {dataset}: expected {}", expected.join(", "))]
    MissingColumns {
        dataset: String,
        expected: Vec<String>,
    },

    /// The concentration table has no row for the requested year.
    #[error("Malformed data: no row for year {year}")]
    NoMatchingRow { year: i64 },

    /// Failure while writing an export.
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HopeError {
    /// Shorthand for a [`HopeError::MissingColumns`] error.
    pub fn missing_columns(dataset: impl Into<String>, expected: &[&str]) -> Self {
        HopeError::MissingColumns {
            dataset: dataset.into(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Result type alias for hopemarket operations.
pub type Result<T> = std::result::Result<T, HopeError>;
