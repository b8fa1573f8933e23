//! Seeded train/test split.

use crate::error::{FeatureError, Result};
use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Configuration for the train/test split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Fraction of rows held out for testing, in `(0, 1)`
    pub test_size: f64,

    /// Seed of the row shuffle
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
        }
    }
}

impl SplitConfig {
    /// Check the test fraction.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(FeatureError::InvalidSplit(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        Ok(())
    }

    /// Number of test rows for a frame of `n` rows.
    pub fn test_rows(&self, n: usize) -> usize {
        (self.test_size * n as f64).ceil() as usize
    }
}

/// Disjoint train and test partitions of one frame.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    /// Training rows
    pub train: DataFrame,
    /// Held-out rows
    pub test: DataFrame,
}

/// Shuffle the rows with a seeded generator and hold out the first
/// `ceil(test_size · n)` of them for testing.
///
/// The same frame and config always produce the same split.
pub fn train_test_split(df: &DataFrame, config: &SplitConfig) -> Result<TrainTestSplit> {
    config.validate()?;
    let n = df.height();
    let n_test = config.test_rows(n);
    if n_test >= n {
        return Err(FeatureError::InvalidSplit(format!(
            "{n} rows leave nothing to train on with test_size {}",
            config.test_size
        )));
    }

    let mut order: Vec<IdxSize> = (0..n).map(|i| i as IdxSize).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    order.shuffle(&mut rng);

    let test_idx = IdxCa::from_vec("idx".into(), order[..n_test].to_vec());
    let train_idx = IdxCa::from_vec("idx".into(), order[n_test..].to_vec());

    Ok(TrainTestSplit {
        train: df.take(&train_idx)?,
        test: df.take(&test_idx)?,
    })
}
