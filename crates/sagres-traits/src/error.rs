//! Error types for sagres.
//!
//! Only structural problems are errors: a missing input table or column, a
//! cross-section that cannot be split into the requested number of buckets,
//! or malformed data at the load boundary. Missing values for individual
//! companies are never errors; they surface as `None` and the affected
//! company is left out of the strategy.

use thiserror::Error;

/// The main error type for sagres operations.
#[derive(Debug, Error)]
pub enum SagresError {
    /// A required input table was not supplied.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A required column is missing from an input table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A ranked field has fewer distinct values than requested buckets.
    #[error(
        "Degenerate distribution: {distinct} distinct values cannot fill {buckets} quantile buckets"
    )]
    DegenerateDistribution {
        /// Number of distinct values in the cross-section.
        distinct: usize,
        /// Number of buckets requested.
        buckets: usize,
    },

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a date cannot be parsed or is out of range.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error when a strategy name is not known.
    #[error("Strategy not found: {0}")]
    StrategyNotFound(String),

    /// Filesystem error while reading or writing a table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error while parsing a JSON configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for SagresError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for SagresError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for sagres operations.
pub type Result<T> = std::result::Result<T, SagresError>;
