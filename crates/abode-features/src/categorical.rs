//! Categorical sub-transform: most-frequent imputation followed by binary
//! encoding.
//!
//! Labels get ordinals `1..=n` in order of first appearance in the training
//! data and each ordinal is written as `width` bits, most significant first.
//! Ordinal 0 is reserved for labels never seen during fitting, so an unseen
//! label encodes as all zeros instead of failing.

use crate::error::{FeatureError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Learned vocabulary of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryEncoding {
    /// Column name
    pub column: String,
    /// Fill value for nulls: the most frequent training label
    pub mode: String,
    /// Training labels; the label at index `i` has ordinal `i + 1`
    pub vocabulary: Vec<String>,
    /// Number of output columns
    pub width: usize,
}

impl BinaryEncoding {
    /// Learn the vocabulary and mode from the non-null values of a column.
    ///
    /// Ties for the most frequent label go to the lexicographically smallest.
    pub fn fit(column: &str, values: &[Option<String>]) -> Result<Self> {
        let mut vocabulary: Vec<String> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in values.iter().flatten() {
            let count = counts.entry(value.as_str()).or_insert(0);
            if *count == 0 {
                vocabulary.push(value.clone());
            }
            *count += 1;
        }

        let mode = counts
            .iter()
            .max_by(|(a_label, a_count), (b_label, b_count)| {
                a_count.cmp(b_count).then_with(|| b_label.cmp(a_label))
            })
            .map(|(label, _)| (*label).to_string())
            .ok_or_else(|| FeatureError::EmptyColumn(column.to_string()))?;

        let width = bit_width(vocabulary.len());
        Ok(Self {
            column: column.to_string(),
            mode,
            vocabulary,
            width,
        })
    }

    /// Ordinal of a label after imputation; 0 for unseen labels.
    pub fn ordinal(&self, value: Option<&str>) -> usize {
        let label = value.unwrap_or(&self.mode);
        self.vocabulary
            .iter()
            .position(|v| v == label)
            .map_or(0, |i| i + 1)
    }

    /// Binary code of a label, most significant bit first.
    pub fn encode(&self, value: Option<&str>) -> Vec<f64> {
        let ordinal = self.ordinal(value);
        (0..self.width)
            .rev()
            .map(|bit| ((ordinal >> bit) & 1) as f64)
            .collect()
    }

    /// Output column names, `<column>_0` through `<column>_<width-1>`.
    pub fn output_names(&self) -> Vec<String> {
        (0..self.width)
            .map(|i| format!("{}_{i}", self.column))
            .collect()
    }
}

/// Bits needed to write ordinals `0..=n`.
fn bit_width(n: usize) -> usize {
    ((usize::BITS - n.leading_zeros()) as usize).max(1)
}

/// Values of a column as text, casting non-text columns.
pub(crate) fn column_labels(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    let values = df
        .column(column)
        .map_err(|_| FeatureError::MissingColumn(column.to_string()))?
        .cast(&DataType::String)?;
    Ok(values
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}
