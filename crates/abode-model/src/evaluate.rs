//! Training and scoring on prepared partitions.

use crate::error::Result;
use crate::metrics::{EvaluationMetrics, mean_squared_error, r2_score};
use crate::regressor::Regressor;
use abode_features::PreparedData;
use tracing::info;

/// Fit `model` on the training partition and score it on both partitions.
pub fn train_and_evaluate<R: Regressor + ?Sized>(
    model: &mut R,
    data: &PreparedData,
) -> Result<EvaluationMetrics> {
    model.fit(&data.x_train.values, &data.y_train)?;

    let train_pred = model.predict(&data.x_train.values)?;
    let test_pred = model.predict(&data.x_test.values)?;
    let metrics = EvaluationMetrics {
        train_mse: mean_squared_error(&data.y_train, &train_pred)?,
        train_r2: r2_score(&data.y_train, &train_pred)?,
        test_mse: mean_squared_error(&data.y_test, &test_pred)?,
        test_r2: r2_score(&data.y_test, &test_pred)?,
    };

    info!(model = model.name(), %metrics, "model evaluated");
    Ok(metrics)
}
