//! Ridge regression solved through the normal equations.
//!
//! With `fit_intercept` the columns of `x` and the target are centered first,
//! so the intercept is not penalized:
//!
//! (Xcᵀ Xc + α I) w = Xcᵀ yc,   b = ȳ − x̄ · w

use crate::error::{ModelError, Result};
use crate::regressor::Regressor;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ridge hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeConfig {
    /// L2 penalty, `>= 0`
    pub alpha: f64,

    /// Learn an unpenalized intercept
    pub fit_intercept: bool,
}

impl Default for RidgeConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fit_intercept: true,
        }
    }
}

impl RidgeConfig {
    /// Check the penalty.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(ModelError::InvalidParameter(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// L2-regularized linear regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeRegression {
    config: RidgeConfig,
    coefficients: Option<Array1<f64>>,
    intercept: f64,
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self::new(RidgeConfig::default())
    }
}

impl RidgeRegression {
    /// Create an unfit model.
    pub const fn new(config: RidgeConfig) -> Self {
        Self {
            config,
            coefficients: None,
            intercept: 0.0,
        }
    }

    /// Hyperparameters.
    pub const fn config(&self) -> &RidgeConfig {
        &self.config
    }

    /// Learned weights, one per feature column.
    pub const fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    /// Learned intercept; 0 when unfit or fit without intercept.
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for RidgeRegression {
    fn name(&self) -> &str {
        "ridge"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        self.config.validate()?;
        let (n, p) = x.dim();
        if n == 0 {
            return Err(ModelError::EmptyData);
        }
        if y.len() != n {
            return Err(ModelError::DimensionMismatch {
                expected: n,
                actual: y.len(),
            });
        }

        let (x_mean, y_mean) = if self.config.fit_intercept {
            let x_mean = x.mean_axis(Axis(0)).ok_or(ModelError::EmptyData)?;
            (x_mean, y.mean().ok_or(ModelError::EmptyData)?)
        } else {
            (Array1::zeros(p), 0.0)
        };
        let xc = x - &x_mean;
        let yc = y - y_mean;

        let mut gram = xc.t().dot(&xc);
        for i in 0..p {
            gram[[i, i]] += self.config.alpha;
        }
        let rhs = xc.t().dot(&yc);
        let weights = cholesky_solve(&gram, &rhs).ok_or(ModelError::Singular)?;

        self.intercept = y_mean - x_mean.dot(&weights);
        debug!(rows = n, features = p, intercept = self.intercept, "ridge fit");
        self.coefficients = Some(weights);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let weights = self.coefficients.as_ref().ok_or(ModelError::NotFitted)?;
        if x.ncols() != weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: weights.len(),
                actual: x.ncols(),
            });
        }
        Ok(x.dot(weights) + self.intercept)
    }

    fn is_fit(&self) -> bool {
        self.coefficients.is_some()
    }
}

/// Solve `a · x = b` for symmetric positive-definite `a`.
///
/// Returns `None` when `a` is not numerically positive definite.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    let tolerance = 1e-12 * a.diag().iter().fold(1.0_f64, |m, v| m.max(v.abs()));

    // a = l · lᵀ
    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= tolerance {
                    return None;
                }
                l[[i, i]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // l · z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let sum: f64 = (0..i).map(|k| l[[i, k]] * z[k]).sum();
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    // lᵀ · x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let sum: f64 = ((i + 1)..n).map(|k| l[[k, i]] * x[k]).sum();
        x[i] = (z[i] - sum) / l[[i, i]];
    }
    Some(x)
}
