//! Error types for feature preparation.

use thiserror::Error;

/// Result type for feature operations.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors that can occur while splitting, fitting or encoding features.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Transform requested from an encoder that was never fit
    #[error("Feature encoder used before fitting")]
    NotFitted,

    /// Fit requested on an encoder whose statistics are already frozen
    #[error("Feature encoder is already fit; build a new encoder to refit")]
    AlreadyFitted,

    /// Column required by the encoder is absent
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Column has no observed value to learn statistics from
    #[error("Column {0} has no non-null values in the training data")]
    EmptyColumn(String),

    /// Training partition has no rows
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Split configuration out of range
    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    /// Target contains a value the log transform cannot take
    #[error("Invalid target value: {0}")]
    InvalidTarget(f64),
}
