//! Read-only prediction service.

use crate::artifact::ModelArtifact;
use crate::error::Result;
use crate::request::PredictionRequest;
use abode_features::{FeatureEncoder, FeatureError, inverse_log_price};
use abode_model::{ModelError, Regressor, RidgeRegression};
use polars::prelude::*;
use tracing::debug;

/// A fit encoder and a fit regressor, frozen together.
///
/// Built once per process and shared by reference; predicting mutates
/// nothing, so the same request always yields the same price.
#[derive(Debug, Clone)]
pub struct PricePredictor<R: Regressor = RidgeRegression> {
    encoder: FeatureEncoder,
    model: R,
}

impl<R: Regressor> PricePredictor<R> {
    /// Pair a fit encoder with a fit model.
    pub fn new(encoder: FeatureEncoder, model: R) -> Result<Self> {
        if !encoder.is_fit() {
            return Err(FeatureError::NotFitted.into());
        }
        if !model.is_fit() {
            return Err(ModelError::NotFitted.into());
        }
        Ok(Self { encoder, model })
    }

    /// The frozen encoder.
    pub const fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// The fit model.
    pub const fn model(&self) -> &R {
        &self.model
    }

    /// Predicted price of one listing, never negative.
    pub fn predict(&self, request: &PredictionRequest) -> Result<f64> {
        let prices = self.predict_frame(&request.to_frame()?)?;
        Ok(prices.first().copied().unwrap_or_default())
    }

    /// Predicted prices of every row of a frame carrying the encoder's
    /// input columns.
    pub fn predict_frame(&self, df: &DataFrame) -> Result<Vec<f64>> {
        let features = self.encoder.transform(df)?;
        let log_prices = self.model.predict(&features.values)?;
        debug!(rows = df.height(), model = self.model.name(), "predicted");
        Ok(log_prices
            .iter()
            .map(|y| inverse_log_price(*y).max(0.0))
            .collect())
    }
}

impl PricePredictor<RidgeRegression> {
    /// Serve a persisted ridge model.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        Self::new(artifact.encoder, artifact.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictError;
    use abode_features::FeatureColumns;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2};

    fn columns() -> FeatureColumns {
        FeatureColumns {
            numeric: vec!["Area".to_string()],
            categorical: vec!["Type".to_string()],
        }
    }

    fn train() -> DataFrame {
        df!(
            "Type" => ["Apartment", "Villa", "Apartment", "Villa"],
            "Area" => [100.0, 300.0, 120.0, 250.0]
        )
        .unwrap()
    }

    /// Predicts a fixed log price.
    #[derive(Debug)]
    struct Fixed(f64);

    impl Regressor for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fit(&mut self, _x: &Array2<f64>, _y: &Array1<f64>) -> abode_model::Result<()> {
            Ok(())
        }

        fn predict(&self, x: &Array2<f64>) -> abode_model::Result<Array1<f64>> {
            Ok(Array1::from_elem(x.nrows(), self.0))
        }

        fn is_fit(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_unfit_parts_are_rejected() {
        let encoder = FeatureEncoder::new(columns());
        assert!(matches!(
            PricePredictor::new(encoder, Fixed(1.0)),
            Err(PredictError::Features(FeatureError::NotFitted))
        ));

        let mut encoder = FeatureEncoder::new(columns());
        encoder.fit(&train()).unwrap();
        assert!(matches!(
            PricePredictor::new(encoder, RidgeRegression::default()),
            Err(PredictError::Model(ModelError::NotFitted))
        ));
    }

    #[test]
    fn test_prices_are_inverse_transformed() {
        let mut encoder = FeatureEncoder::new(columns());
        encoder.fit(&train()).unwrap();
        let predictor = PricePredictor::new(encoder, Fixed(1_500_000_f64.ln_1p())).unwrap();

        let prices = predictor.predict_frame(&train()).unwrap();
        assert_eq!(prices.len(), 4);
        for price in prices {
            assert_relative_eq!(price, 1_500_000.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_prices_are_never_negative() {
        let mut encoder = FeatureEncoder::new(columns());
        encoder.fit(&train()).unwrap();
        let predictor = PricePredictor::new(encoder, Fixed(-3.0)).unwrap();
        let prices = predictor.predict_frame(&train()).unwrap();
        assert!(prices.iter().all(|p| *p == 0.0));
    }
}
