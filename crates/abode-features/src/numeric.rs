//! Numeric sub-transform: mean imputation followed by standardization.

use crate::error::{FeatureError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Learned statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    /// Column name
    pub column: String,
    /// Training mean, also the fill value for nulls
    pub mean: f64,
    /// Training standard deviation (population); 1 for constant columns
    pub scale: f64,
}

impl NumericStats {
    /// Learn mean and scale from the non-null values of a column.
    pub fn fit(column: &str, values: &[Option<f64>]) -> Result<Self> {
        let observed: Vec<f64> = values.iter().flatten().copied().collect();
        if observed.is_empty() {
            return Err(FeatureError::EmptyColumn(column.to_string()));
        }
        let n = observed.len() as f64;
        let mean = observed.iter().sum::<f64>() / n;
        let variance = observed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let scale = if std > f64::EPSILON && std.is_finite() {
            std
        } else {
            1.0
        };
        Ok(Self {
            column: column.to_string(),
            mean,
            scale,
        })
    }

    /// Standardized value; nulls take the training mean and so encode as 0.
    pub fn transform(&self, value: Option<f64>) -> f64 {
        (value.unwrap_or(self.mean) - self.mean) / self.scale
    }
}

/// Values of a column as `f64`, casting integer or text columns.
pub(crate) fn column_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let values = df
        .column(column)
        .map_err(|_| FeatureError::MissingColumn(column.to_string()))?
        .cast(&DataType::Float64)?;
    Ok(values.as_materialized_series().f64()?.into_iter().collect())
}
