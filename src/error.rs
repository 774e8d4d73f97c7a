//! Error types for the missingness mining core.
//!
//! The pipeline and the result collection report contract violations through
//! `MiningError`. Outer layers (loader, CLI, exports) wrap these in `anyhow`.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the mining core.
#[derive(Debug, Error)]
pub enum MiningError {
    /// A column name was looked up that the dataset (or encoder) does not hold.
    #[error("Column '{0}' not found in dataset")]
    UnknownColumn(String),

    /// An item offered to a `ResultCollection` is not a `ResultRecord`.
    #[error("Expected item of type '{expected}', but received a value of another type")]
    TypeMismatch {
        /// Name of the type the collection accepts
        expected: &'static str,
    },

    /// Feature columns being combined do not share a row count.
    #[error("Feature '{feature}' has {actual} rows, expected {expected}")]
    RowMismatch {
        feature: String,
        expected: usize,
        actual: usize,
    },

    /// Not enough rows to produce non-empty train and test partitions.
    #[error("Cannot split {rows} row(s) into train/test partitions with test fraction {test_fraction}")]
    InsufficientRows { rows: usize, test_fraction: f64 },

    /// A model was asked to fit on zero rows.
    #[error("Cannot fit a model on an empty training set")]
    EmptyTrainingSet,

    /// A configuration value is outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Result alias used throughout the mining core.
pub type MiningResult<T> = std::result::Result<T, MiningError>;
