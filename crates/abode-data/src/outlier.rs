//! IQR outlier filtering within property-type groups.

use crate::error::{DataError, Result};
use crate::schema::{NumericField, OutlierPolicy, TYPE};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Default fence width in interquartile ranges.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Linearly interpolated percentile of sorted values, `q` in `[0, 1]`.
///
/// Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Tukey fence `[Q1 - k·IQR, Q3 + k·IQR]` over the given values.
pub fn iqr_fence(values: &[f64], multiplier: f64) -> Option<(f64, f64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = percentile(&sorted, 0.25)?;
    let q3 = percentile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - multiplier * iqr, q3 + multiplier * iqr))
}

/// Filter IQR outliers of `field` within each property type.
///
/// Fences are computed per type over the non-null values of the field. Price
/// outliers remove their listing; outliers of any other field are nulled so
/// the imputer can fill them. Rows with a null type or value are never
/// outliers, and types without observations are skipped.
pub fn filter_outliers(df: &DataFrame, field: NumericField, multiplier: f64) -> Result<DataFrame> {
    let name = field.column();
    let values = df.column(name)?.as_materialized_series().f64().map_err(|_| {
        DataError::UnexpectedType {
            column: name.to_string(),
            dtype: df
                .column(name)
                .map(|c| c.dtype().to_string())
                .unwrap_or_default(),
        }
    })?;
    let types = df.column(TYPE)?.as_materialized_series().str()?;

    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for (ty, value) in types.into_iter().zip(values.into_iter()) {
        if let (Some(ty), Some(value)) = (ty, value) {
            groups.entry(ty).or_default().push(value);
        }
    }
    let fences: HashMap<&str, (f64, f64)> = groups
        .iter()
        .filter_map(|(ty, group)| iqr_fence(group, multiplier).map(|fence| (*ty, fence)))
        .collect();

    let outside: Vec<bool> = types
        .into_iter()
        .zip(values.into_iter())
        .map(|(ty, value)| match (ty.and_then(|t| fences.get(t)), value) {
            (Some((low, high)), Some(v)) => v < *low || v > *high,
            _ => false,
        })
        .collect();
    let flagged = outside.iter().filter(|o| **o).count();

    let out = match field.outlier_policy() {
        OutlierPolicy::DropRow => {
            let keep: Vec<bool> = outside.iter().map(|o| !o).collect();
            df.filter(&BooleanChunked::from_slice("keep".into(), &keep))?
        }
        OutlierPolicy::NullValue => {
            let cleaned: Vec<Option<f64>> = values
                .into_iter()
                .zip(&outside)
                .map(|(value, out)| if *out { None } else { value })
                .collect();
            let mut out = df.clone();
            out.with_column(Column::new(name.into(), cleaned))?;
            out
        }
    };

    debug!(field = %field, groups = fences.len(), flagged, "outlier filter");
    Ok(out)
}
