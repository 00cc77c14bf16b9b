//! Error types for the biasrx library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum BiasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    #[error("Duplicate column '{0}' in dataset")]
    DuplicateColumn(String),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    DimensionMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column '{0}' has no non-missing values to classify")]
    EmptyDistribution(String),

    #[error(
        "Column '{column}' has {distinct} distinct values, label columns must have fewer than {max_cardinality}"
    )]
    NotEligibleLabel {
        column: String,
        distinct: usize,
        max_cardinality: usize,
    },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, BiasError>;
