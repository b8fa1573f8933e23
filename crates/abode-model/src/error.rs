//! Error types for model fitting and scoring.

use thiserror::Error;

/// Result alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while fitting, predicting or scoring.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Shapes of the inputs do not line up
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Prediction requested before fitting
    #[error("Model has not been fit")]
    NotFitted,

    /// Nothing to fit or score
    #[error("No observations")]
    EmptyData,

    /// Normal equations could not be solved
    #[error("Normal equations are singular; increase alpha")]
    Singular,

    /// Invalid hyperparameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
