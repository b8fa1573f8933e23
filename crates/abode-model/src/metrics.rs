//! Regression metrics.

use crate::error::{ModelError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores of a fit model on both partitions, in log-price space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Mean squared error on the training partition
    #[serde(rename = "Train_MSE")]
    pub train_mse: f64,
    /// R² on the training partition
    #[serde(rename = "Train_R2")]
    pub train_r2: f64,
    /// Mean squared error on the test partition
    #[serde(rename = "Test_MSE")]
    pub test_mse: f64,
    /// R² on the test partition
    #[serde(rename = "Test_R2")]
    pub test_r2: f64,
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train MSE {:.4}, R² {:.4} | test MSE {:.4}, R² {:.4}",
            self.train_mse, self.train_r2, self.test_mse, self.test_r2
        )
    }
}

fn check(actual: &Array1<f64>, predicted: &Array1<f64>) -> Result<()> {
    if actual.is_empty() {
        return Err(ModelError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(ModelError::DimensionMismatch {
            expected: actual.len(),
            actual: predicted.len(),
        });
    }
    Ok(())
}

/// Mean of squared residuals.
pub fn mean_squared_error(actual: &Array1<f64>, predicted: &Array1<f64>) -> Result<f64> {
    check(actual, predicted)?;
    Ok((actual - predicted).mapv(|r| r * r).sum() / actual.len() as f64)
}

/// Coefficient of determination.
///
/// A constant target scores 1 when predicted exactly and 0 otherwise.
pub fn r2_score(actual: &Array1<f64>, predicted: &Array1<f64>) -> Result<f64> {
    check(actual, predicted)?;
    let mean = actual.sum() / actual.len() as f64;
    let ss_res = (actual - predicted).mapv(|r| r * r).sum();
    let ss_tot = actual.mapv(|v| (v - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mse() {
        let mse = mean_squared_error(&array![1.0, 2.0, 3.0], &array![1.0, 2.0, 5.0]).unwrap();
        assert_relative_eq!(mse, 4.0 / 3.0);
    }

    #[test]
    fn test_r2() {
        let y = array![1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(r2_score(&y, &y).unwrap(), 1.0);
        // predicting the mean scores zero
        assert_relative_eq!(r2_score(&y, &array![2.5, 2.5, 2.5, 2.5]).unwrap(), 0.0);
        // 1 - 1 / 5
        assert_relative_eq!(
            r2_score(&y, &array![1.0, 2.0, 3.0, 3.0]).unwrap(),
            0.8,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_r2_constant_target() {
        let y = array![2.0, 2.0];
        assert_relative_eq!(r2_score(&y, &y).unwrap(), 1.0);
        assert_relative_eq!(r2_score(&y, &array![1.0, 2.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch_and_empty() {
        assert!(matches!(
            mean_squared_error(&array![1.0], &array![1.0, 2.0]),
            Err(ModelError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            r2_score(&Array1::zeros(0), &Array1::zeros(0)),
            Err(ModelError::EmptyData)
        ));
    }

    #[test]
    fn test_serialized_keys() {
        let metrics = EvaluationMetrics {
            train_mse: 0.1,
            train_r2: 0.9,
            test_mse: 0.2,
            test_r2: 0.8,
        };
        let value = serde_json::to_value(metrics).unwrap();
        for key in ["Train_MSE", "Train_R2", "Test_MSE", "Test_R2"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
