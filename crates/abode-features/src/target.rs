//! Log-price target transform.
//!
//! Prices are fit as `ln(1 + price)` so the regression sees a multiplicative
//! error; predictions go back through `exp(y) - 1`.

use crate::error::{FeatureError, Result};
use abode_data::schema::PRICE;
use ndarray::Array1;
use polars::prelude::*;

/// `ln(1 + price)`.
pub fn log_price(price: f64) -> f64 {
    price.ln_1p()
}

/// `exp(y) - 1`, the inverse of [`log_price`].
pub fn inverse_log_price(y: f64) -> f64 {
    y.exp_m1()
}

/// Log-transformed `Price` column of a cleaned frame.
///
/// Fails on a null or negative price.
pub fn log_target(df: &DataFrame) -> Result<Array1<f64>> {
    let prices = df
        .column(PRICE)
        .map_err(|_| FeatureError::MissingColumn(PRICE.to_string()))?
        .cast(&DataType::Float64)?;
    prices
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|p| match p {
            Some(p) if p >= 0.0 => Ok(log_price(p)),
            Some(p) => Err(FeatureError::InvalidTarget(p)),
            None => Err(FeatureError::InvalidTarget(f64::NAN)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip() {
        let price = 1_500_000.0;
        assert_relative_eq!(inverse_log_price(log_price(price)), price, max_relative = 1e-12);
        assert_relative_eq!(inverse_log_price(log_price(0.0)), 0.0);
    }

    #[test]
    fn test_log_target() {
        let df = df!("Price" => [0.0, 99.0]).unwrap();
        let y = log_target(&df).unwrap();
        assert_relative_eq!(y[0], 0.0);
        assert_relative_eq!(y[1], 100.0_f64.ln());
    }

    #[test]
    fn test_log_target_rejects_nulls_and_negatives() {
        let df = df!("Price" => [Some(10.0), None]).unwrap();
        assert!(matches!(log_target(&df), Err(FeatureError::InvalidTarget(_))));

        let df = df!("Price" => [-5.0]).unwrap();
        assert!(matches!(log_target(&df), Err(FeatureError::InvalidTarget(p)) if p == -5.0));
    }
}
