//! From a cleaned frame to a persisted model.

use crate::artifact::ModelArtifact;
use crate::error::Result;
use abode_features::{FeatureColumns, SplitConfig, prepare_features};
use abode_model::{RidgeConfig, RidgeRegression, train_and_evaluate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Settings for one training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Train/test split
    pub split: SplitConfig,
    /// Encoder input columns
    pub columns: FeatureColumns,
    /// Ridge hyperparameters
    pub ridge: RidgeConfig,
}

/// Split, encode, fit and score a ridge model on a cleaned frame.
pub fn train(cleaned: &DataFrame, config: &TrainConfig) -> Result<ModelArtifact> {
    let data = prepare_features(cleaned, &config.split, config.columns.clone())?;
    let mut model = RidgeRegression::new(config.ridge.clone());
    let metrics = train_and_evaluate(&mut model, &data)?;
    Ok(ModelArtifact::new(data.encoder, model, metrics))
}
