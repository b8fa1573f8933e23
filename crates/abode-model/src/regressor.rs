//! Estimator seam.

use crate::error::Result;
use ndarray::{Array1, Array2};

/// A regression model over encoded feature matrices.
///
/// Implementations learn from `(x, y)` pairs in `fit` and must reject
/// `predict` until fit. Rows of `x` are observations and columns follow the
/// encoder's output layout.
pub trait Regressor {
    /// Short human-readable name
    fn name(&self) -> &str;

    /// Learn parameters from a training matrix and target vector
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Predict one target per row of `x`
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Whether `fit` has succeeded
    fn is_fit(&self) -> bool;
}
