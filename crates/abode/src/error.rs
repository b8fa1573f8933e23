//! Errors surfaced by training and prediction.

use abode_data::DataError;
use abode_features::FeatureError;
use abode_model::ModelError;
use thiserror::Error;

/// Result type for the prediction surface.
pub type Result<T> = std::result::Result<T, PredictError>;

/// Errors that can occur while training, persisting or serving a model.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Cleaning or loading failed
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Feature preparation or encoding failed
    #[error("Feature error: {0}")]
    Features(#[from] FeatureError),

    /// Fitting or prediction failed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Polars error while building a request frame
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Artifact could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A form field is missing or malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
