//! Hierarchical median imputation.
//!
//! Missing values are filled with the median of their group, first within the
//! most specific grouping and then with progressively coarser ones. Each pass
//! only touches cells that are still null.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Fill nulls in `columns` with the median of the group sharing `keys`.
///
/// Non-null cells are never modified. A row with a null in any key belongs to
/// no group and keeps its nulls, as does a row whose group has no observed
/// value for that column.
pub fn fill_group_median(df: &DataFrame, columns: &[&str], keys: &[&str]) -> Result<DataFrame> {
    if columns.is_empty() || keys.is_empty() {
        return Ok(df.clone());
    }
    let partition: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
    let keyed = keys
        .iter()
        .fold(lit(true), |acc, k| acc.and(col(*k).is_not_null()));

    let exprs: Vec<Expr> = columns
        .iter()
        .map(|c| {
            let group_median = when(keyed.clone())
                .then(col(*c).median().over(partition.clone()))
                .otherwise(lit(NULL).cast(DataType::Float64));
            col(*c).fill_null(group_median).alias(*c)
        })
        .collect();

    Ok(df.clone().lazy().with_columns(exprs).collect()?)
}

/// Grouping levels from most to least specific: every prefix of `keys`,
/// longest first.
pub fn grouping_levels<'a>(keys: &[&'a str]) -> Vec<Vec<&'a str>> {
    (1..=keys.len()).rev().map(|n| keys[..n].to_vec()).collect()
}

/// Fill nulls level by level, from `keys` down to its first key alone.
pub fn impute_hierarchical(df: &DataFrame, columns: &[&str], keys: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();
    for level in grouping_levels(keys) {
        out = fill_group_median(&out, columns, &level)?;
        debug!(
            keys = ?level,
            remaining = null_cells(&out, columns)?,
            "median imputation pass"
        );
    }
    Ok(out)
}

/// Remove every row that still holds a null in any column.
pub fn drop_incomplete(df: &DataFrame) -> Result<DataFrame> {
    let mut complete = BooleanChunked::full("complete".into(), true, df.height());
    for column in df.get_columns() {
        complete = &complete & &column.is_not_null();
    }
    Ok(df.filter(&complete)?)
}

fn null_cells(df: &DataFrame, columns: &[&str]) -> Result<usize> {
    let mut total = 0;
    for c in columns {
        total += df.column(c)?.null_count();
    }
    Ok(total)
}
