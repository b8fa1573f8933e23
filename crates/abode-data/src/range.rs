//! Repair of bedroom, bathroom and area values against property-type ranges.
//!
//! Values within `margin` (relative) outside a type's range are snapped onto
//! the nearest bound. Values further out mark the whole listing as corrupt:
//! every column of that row, `Type` included, is nulled, so the row can no
//! longer join any imputation group and is removed by the final null drop.

use crate::error::Result;
use crate::schema::{NumericField, PropertyType, TYPE};
use polars::prelude::*;
use tracing::debug;

/// Relative margin within which out-of-range values are snapped to the bound.
pub const DEFAULT_MARGIN: f64 = 0.1;

/// Repair `field` against the range of each property type.
///
/// Fields without fixed ranges (`Price`, `Level`, `Delivery_Date`) and rows
/// whose type is not one of the known property types are returned untouched.
pub fn repair_range(df: &DataFrame, field: NumericField, margin: f64) -> Result<DataFrame> {
    if !field.has_bounds() {
        return Ok(df.clone());
    }
    let name = field.column();
    let value = col(name);

    let mut repaired = value.clone();
    let mut corrupt = lit(false);
    for ty in PropertyType::all() {
        let Some(bounds) = ty.bounds(field) else {
            continue;
        };
        let is_type = col(TYPE).eq(lit(ty.name()));
        let low = bounds.lower_tolerance(margin);
        let high = bounds.upper_tolerance(margin);

        repaired = when(
            is_type
                .clone()
                .and(value.clone().lt(lit(bounds.min)))
                .and(value.clone().gt_eq(lit(low))),
        )
        .then(lit(bounds.min))
        .when(
            is_type
                .clone()
                .and(value.clone().gt(lit(bounds.max)))
                .and(value.clone().lt_eq(lit(high))),
        )
        .then(lit(bounds.max))
        .otherwise(repaired);

        corrupt = corrupt.or(is_type.and(
            value
                .clone()
                .lt(lit(low))
                .or(value.clone().gt(lit(high))),
        ));
    }
    // Null comparisons leave the flag null, which `when` treats as false.
    let corrupt = corrupt.fill_null(lit(false));

    let exprs: Vec<Expr> = df
        .get_columns()
        .iter()
        .map(|column| {
            let column_name = column.name().as_str();
            let kept = if column_name == name {
                repaired.clone()
            } else {
                col(column_name)
            };
            when(corrupt.clone())
                .then(lit(NULL).cast(column.dtype().clone()))
                .otherwise(kept)
                .alias(column_name)
        })
        .collect();

    let before = df.column(name)?.null_count();
    let out = df.clone().lazy().with_columns(exprs).collect()?;
    debug!(
        field = %field,
        nulled = out.column(name)?.null_count().saturating_sub(before),
        "range repair"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AREA, BEDROOMS, PRICE};
    use rstest::rstest;

    fn frame(types: &[&str], bedrooms: &[Option<f64>]) -> DataFrame {
        let n = types.len();
        df!(
            "Type" => types,
            "Price" => vec![1_000_000.0; n],
            "Bedrooms" => bedrooms,
            "Area" => vec![Some(100.0); n],
            "City" => vec!["Giza"; n]
        )
        .unwrap()
    }

    fn f64_at(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .get(row)
    }

    #[rstest]
    // apartment bedrooms range is 1..=4, tolerance 0.9..=4.4
    #[case(0.95, Some(1.0))]
    #[case(4.4, Some(4.0))]
    #[case(4.2, Some(4.0))]
    #[case(3.0, Some(3.0))]
    #[case(1.0, Some(1.0))]
    #[case(5.0, None)]
    #[case(0.5, None)]
    fn test_apartment_bedrooms(#[case] raw: f64, #[case] expected: Option<f64>) {
        let df = frame(&["Apartment"], &[Some(raw)]);
        let out = repair_range(&df, NumericField::Bedrooms, DEFAULT_MARGIN).unwrap();
        assert_eq!(f64_at(&out, BEDROOMS, 0), expected);
    }

    #[test]
    fn test_corrupt_value_nulls_entire_row() {
        // Intentional: a single far-out field discards every column of the listing.
        let df = frame(&["Studio", "Apartment"], &[Some(10.0), Some(3.0)]);
        let out = repair_range(&df, NumericField::Bedrooms, DEFAULT_MARGIN).unwrap();

        assert_eq!(out.height(), 2);
        for column in out.get_columns() {
            assert!(column.get(0).unwrap().is_null(), "{} kept", column.name());
            assert!(!column.get(1).unwrap().is_null());
        }
    }

    #[test]
    fn test_ranges_are_per_type() {
        // 5 bedrooms is corrupt for a studio but valid for a villa
        let df = frame(&["Stand Alone Villa", "Studio"], &[Some(5.0), Some(2.0)]);
        let out = repair_range(&df, NumericField::Bedrooms, DEFAULT_MARGIN).unwrap();
        assert_eq!(f64_at(&out, BEDROOMS, 0), Some(5.0));
        assert_eq!(f64_at(&out, BEDROOMS, 1), Some(2.0));
    }

    #[test]
    fn test_nulls_and_unknown_types_untouched() {
        let df = frame(&["Apartment", "Villa"], &[None, Some(40.0)]);
        let out = repair_range(&df, NumericField::Bedrooms, DEFAULT_MARGIN).unwrap();
        assert_eq!(f64_at(&out, BEDROOMS, 0), None);
        assert_eq!(f64_at(&out, PRICE, 0), Some(1_000_000.0));
        assert_eq!(f64_at(&out, BEDROOMS, 1), Some(40.0));
    }

    #[test]
    fn test_area_snaps_to_bounds() {
        let df = df!(
            "Type" => ["Apartment", "Apartment"],
            "Area" => [56.0, 270.0]
        )
        .unwrap();
        let out = repair_range(&df, NumericField::Area, DEFAULT_MARGIN).unwrap();
        assert_eq!(f64_at(&out, AREA, 0), Some(60.0));
        assert_eq!(f64_at(&out, AREA, 1), Some(250.0));
    }

    #[test]
    fn test_price_is_exempt() {
        let df = frame(&["Studio"], &[Some(1.0)]);
        let out = repair_range(&df, NumericField::Price, DEFAULT_MARGIN).unwrap();
        assert!(out.equals_missing(&df));
    }

    #[test]
    fn test_repaired_values_lie_in_bounds() {
        let types = ["Chalet", "Duplex", "Town House", "Penthouse", "Studio", "Twin House"];
        let raw = [0.2, 2.7, 9.0, 4.3, 2.1, 3.0];
        let df = frame(&types, &raw.map(Some));
        let out = repair_range(&df, NumericField::Bedrooms, DEFAULT_MARGIN).unwrap();

        for (row, ty) in types.iter().enumerate() {
            let bounds = PropertyType::from_name(ty)
                .and_then(|t| t.bounds(NumericField::Bedrooms))
                .unwrap();
            match f64_at(&out, BEDROOMS, row) {
                Some(v) => assert!(bounds.contains(v), "{ty}: {v}"),
                None => assert!(out.column(TYPE).unwrap().get(row).unwrap().is_null()),
            }
        }
    }
}
