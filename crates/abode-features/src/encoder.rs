//! Feature encoder combining the numeric and categorical sub-transforms.
//!
//! The encoder has two states. A freshly built encoder is unfit and refuses
//! to transform. Fitting learns every statistic from the training partition
//! and freezes it: a fit encoder refuses a second fit, so the exact same
//! statistics serve the test partition and every later prediction.

use crate::categorical::{BinaryEncoding, column_labels};
use crate::error::{FeatureError, Result};
use crate::numeric::{NumericStats, column_values};
use abode_data::schema::{
    AREA, BATHROOMS, BEDROOMS, CITY, COMPOUND, DELIVERY_DATE, DELIVERY_TERM, FURNISHED, LEVEL,
    PAYMENT_OPTION, TYPE,
};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which input columns feed the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureColumns {
    /// Columns standardized as numbers
    pub numeric: Vec<String>,
    /// Columns binary encoded as categories
    pub categorical: Vec<String>,
}

impl Default for FeatureColumns {
    fn default() -> Self {
        Self {
            numeric: [BEDROOMS, BATHROOMS, AREA, LEVEL, DELIVERY_DATE]
                .map(str::to_string)
                .to_vec(),
            categorical: [TYPE, FURNISHED, COMPOUND, PAYMENT_OPTION, DELIVERY_TERM, CITY]
                .map(str::to_string)
                .to_vec(),
        }
    }
}

/// Frozen statistics of a fit encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedTransform {
    /// Categorical encodings, in output order
    pub categorical: Vec<BinaryEncoding>,
    /// Numeric statistics, in output order
    pub numeric: Vec<NumericStats>,
}

impl FittedTransform {
    /// Names of the output columns: categorical bits first, then numerics.
    pub fn output_names(&self) -> Vec<String> {
        self.categorical
            .iter()
            .flat_map(BinaryEncoding::output_names)
            .chain(self.numeric.iter().map(|s| s.column.clone()))
            .collect()
    }

    /// Number of output columns.
    pub fn width(&self) -> usize {
        self.categorical.iter().map(|c| c.width).sum::<usize>() + self.numeric.len()
    }
}

/// Encoder state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncoderState {
    /// Built, nothing learned yet
    Unfit,
    /// Statistics learned and frozen
    Fit(FittedTransform),
}

/// Encoded feature matrix with its column names.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    /// Output column names
    pub columns: Vec<String>,
    /// Values, one row per listing
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }
}

/// Numeric scaling plus categorical encoding, fit once on training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoder {
    columns: FeatureColumns,
    state: EncoderState,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new(FeatureColumns::default())
    }
}

impl FeatureEncoder {
    /// Create an unfit encoder over the given columns.
    pub const fn new(columns: FeatureColumns) -> Self {
        Self {
            columns,
            state: EncoderState::Unfit,
        }
    }

    /// Input columns.
    pub const fn columns(&self) -> &FeatureColumns {
        &self.columns
    }

    /// Current state.
    pub const fn state(&self) -> &EncoderState {
        &self.state
    }

    /// Whether statistics have been learned.
    pub const fn is_fit(&self) -> bool {
        matches!(self.state, EncoderState::Fit(_))
    }

    /// Learned statistics, if fit.
    pub const fn fitted(&self) -> Option<&FittedTransform> {
        match &self.state {
            EncoderState::Fit(fitted) => Some(fitted),
            EncoderState::Unfit => None,
        }
    }

    /// Learn statistics from the training partition and freeze them.
    pub fn fit(&mut self, train: &DataFrame) -> Result<()> {
        if self.is_fit() {
            return Err(FeatureError::AlreadyFitted);
        }
        if train.height() == 0 {
            return Err(FeatureError::EmptyTrainingSet);
        }

        let categorical = self
            .columns
            .categorical
            .iter()
            .map(|c| BinaryEncoding::fit(c, &column_labels(train, c)?))
            .collect::<Result<Vec<_>>>()?;
        let numeric = self
            .columns
            .numeric
            .iter()
            .map(|c| NumericStats::fit(c, &column_values(train, c)?))
            .collect::<Result<Vec<_>>>()?;

        let fitted = FittedTransform {
            categorical,
            numeric,
        };
        debug!(rows = train.height(), width = fitted.width(), "feature encoder fit");
        self.state = EncoderState::Fit(fitted);
        Ok(())
    }

    /// Fit on `train` and transform it in one step.
    pub fn fit_transform(&mut self, train: &DataFrame) -> Result<FeatureMatrix> {
        self.fit(train)?;
        self.transform(train)
    }

    /// Encode a frame with the frozen statistics.
    ///
    /// Nulls are imputed from training statistics and unseen labels encode as
    /// all-zero bits, so any frame carrying the input columns transforms.
    pub fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        let fitted = self.fitted().ok_or(FeatureError::NotFitted)?;
        let rows = df.height();
        let mut values = Array2::<f64>::zeros((rows, fitted.width()));

        let mut offset = 0;
        for encoding in &fitted.categorical {
            let labels = column_labels(df, &encoding.column)?;
            for (row, label) in labels.iter().enumerate() {
                for (bit, v) in encoding.encode(label.as_deref()).into_iter().enumerate() {
                    values[[row, offset + bit]] = v;
                }
            }
            offset += encoding.width;
        }
        for stats in &fitted.numeric {
            let column = column_values(df, &stats.column)?;
            for (row, value) in column.into_iter().enumerate() {
                values[[row, offset]] = stats.transform(value);
            }
            offset += 1;
        }

        Ok(FeatureMatrix {
            columns: fitted.output_names(),
            values,
        })
    }
}
