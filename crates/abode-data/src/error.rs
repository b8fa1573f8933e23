//! Error types for listing data operations.

use thiserror::Error;

/// Result type for listing data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or cleaning listings.
#[derive(Debug, Error)]
pub enum DataError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is absent from the dataset
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column has a type the stage cannot work with
    #[error("Column {column} has unexpected type {dtype}")]
    UnexpectedType {
        /// Column name
        column: String,
        /// Type found in the frame
        dtype: String,
    },

    /// The input file holds no listings
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),
}
