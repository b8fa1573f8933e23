//! Hand-off from the cleaned frame to model training.

use crate::encoder::{FeatureColumns, FeatureEncoder, FeatureMatrix};
use crate::error::Result;
use crate::split::{SplitConfig, train_test_split};
use crate::target::log_target;
use ndarray::Array1;
use polars::prelude::*;
use tracing::info;

/// Everything a training collaborator needs: the frozen encoder plus encoded
/// train and test partitions with their log-price targets.
#[derive(Debug, Clone)]
pub struct PreparedData {
    /// Encoder fit on the training partition only
    pub encoder: FeatureEncoder,
    /// Encoded training features
    pub x_train: FeatureMatrix,
    /// Encoded test features
    pub x_test: FeatureMatrix,
    /// `ln(1 + price)` of the training rows
    pub y_train: Array1<f64>,
    /// `ln(1 + price)` of the test rows
    pub y_test: Array1<f64>,
}

/// Split a cleaned frame, fit the encoder on the training rows and encode
/// both partitions.
pub fn prepare_features(
    cleaned: &DataFrame,
    split: &SplitConfig,
    columns: FeatureColumns,
) -> Result<PreparedData> {
    let parts = train_test_split(cleaned, split)?;

    let mut encoder = FeatureEncoder::new(columns);
    let x_train = encoder.fit_transform(&parts.train)?;
    let x_test = encoder.transform(&parts.test)?;

    info!(
        train = parts.train.height(),
        test = parts.test.height(),
        features = x_train.columns.len(),
        "features prepared"
    );

    Ok(PreparedData {
        encoder,
        x_train,
        x_test,
        y_train: log_target(&parts.train)?,
        y_test: log_target(&parts.test)?,
    })
}
