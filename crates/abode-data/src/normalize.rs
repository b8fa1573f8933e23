//! Normalization of raw listing values.
//!
//! Maps synonym labels onto one canonical label, turns the scraper's text
//! markers (`Unknown`, `10+`, `Ground`, delivery phrases) into numbers or
//! nulls, and assigns `Float64` to every numeric column.

use crate::error::Result;
use crate::schema::{
    AREA, BATHROOMS, BEDROOMS, CITY, COMPOUND, DELIVERY_DATE, DELIVERY_TERM, FURNISHED, LEVEL,
    PAYMENT_OPTION, PRICE, TYPE, UNKNOWN,
};
use polars::prelude::*;

/// Raw property type labels and the canonical label they collapse to.
pub const TYPE_SYNONYMS: [(&str, &str); 2] = [
    ("Standalone Villa", "Stand Alone Villa"),
    ("Twin house", "Twin House"),
];

/// Raw city labels that carry no location.
pub const CITY_PLACEHOLDERS: [&str; 1] = ["(View phone number)"];

/// Delivery phrases and their offset in months.
pub const DELIVERY_MONTHS: [(&str, f64); 9] = [
    ("Ready to move", 0.0),
    ("soon", 3.0),
    ("within 6 months", 6.0),
    ("2022", 12.0),
    ("2023", 24.0),
    ("2024", 36.0),
    ("2025", 48.0),
    ("2026", 60.0),
    ("2027", 72.0),
];

/// Ceiling marker used for bedrooms, bathrooms and level.
pub const CEILING: &str = "10+";

/// Value substituted for the bedroom and bathroom ceiling marker.
pub const CEILING_COUNT: f64 = 10.0;

/// Ground floor label.
pub const GROUND: &str = "Ground";

/// Drop exact duplicates and listings whose price or type is unknown.
pub fn drop_invalid_listings(df: &DataFrame) -> Result<DataFrame> {
    let out = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .filter(
            text(PRICE)
                .neq_missing(lit(UNKNOWN))
                .and(text(TYPE).neq_missing(lit(UNKNOWN))),
        )
        .collect()?;
    Ok(out)
}

/// Normalize raw listing values.
///
/// Output columns keep their names. `Price`, `Bedrooms`, `Bathrooms`, `Area`,
/// `Level` and `Delivery_Date` become `Float64`; the categorical columns stay
/// text, with `Type` and `City` rewritten to canonical labels.
///
/// A `10+` level resolves to the highest known level of the same property
/// type, or null when that type has no known level.
pub fn normalize(df: &DataFrame) -> Result<DataFrame> {
    let out = df
        .clone()
        .lazy()
        .with_columns([
            canonical_type(),
            canonical_city(),
            text(COMPOUND).alias(COMPOUND),
            text(FURNISHED).alias(FURNISHED),
            text(PAYMENT_OPTION).alias(PAYMENT_OPTION),
            text(DELIVERY_TERM).alias(DELIVERY_TERM),
            numeric(PRICE),
            capped_count(BEDROOMS),
            capped_count(BATHROOMS),
            numeric(AREA),
            delivery_months(),
        ])
        // Level depends on the canonical type, so it runs after the first pass.
        .with_column(level())
        .collect()?;
    Ok(out)
}

/// Column read as text whatever type it arrived with.
fn text(name: &str) -> Expr {
    col(name).cast(DataType::String)
}

fn null_f64() -> Expr {
    lit(NULL).cast(DataType::Float64)
}

/// `Unknown` becomes null, everything else is parsed; unparsable text is null too.
fn parse_number(name: &str) -> Expr {
    when(text(name).eq(lit(UNKNOWN)))
        .then(lit(NULL))
        .otherwise(text(name))
        .cast(DataType::Float64)
}

fn numeric(name: &str) -> Expr {
    parse_number(name).alias(name)
}

fn capped_count(name: &str) -> Expr {
    when(text(name).eq(lit(CEILING)))
        .then(lit(CEILING_COUNT))
        .otherwise(parse_number(name))
        .alias(name)
}

fn canonical_type() -> Expr {
    TYPE_SYNONYMS
        .iter()
        .fold(text(TYPE), |acc, (raw, canonical)| {
            when(text(TYPE).eq(lit(*raw)))
                .then(lit(*canonical))
                .otherwise(acc)
        })
        .alias(TYPE)
}

fn canonical_city() -> Expr {
    CITY_PLACEHOLDERS
        .iter()
        .fold(text(CITY), |acc, raw| {
            when(text(CITY).eq(lit(*raw)))
                .then(lit(UNKNOWN))
                .otherwise(acc)
        })
        .alias(CITY)
}

fn delivery_months() -> Expr {
    DELIVERY_MONTHS
        .iter()
        .fold(null_f64(), |acc, (phrase, months)| {
            when(text(DELIVERY_DATE).eq(lit(*phrase)))
                .then(lit(*months))
                .otherwise(acc)
        })
        .alias(DELIVERY_DATE)
}

fn level() -> Expr {
    let raw = text(LEVEL);
    let known = when(raw.clone().eq(lit(GROUND)))
        .then(lit(0.0))
        .when(raw.clone().eq(lit(CEILING)))
        .then(null_f64())
        .otherwise(parse_number(LEVEL));
    let highest_known = known.clone().max().over([col(TYPE)]);

    when(raw.eq(lit(CEILING)))
        .then(highest_known)
        .otherwise(known)
        .alias(LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_at(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .get(row)
    }

    fn str_at(df: &DataFrame, column: &str, row: usize) -> Option<String> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .get(row)
            .map(str::to_string)
    }

    fn raw_frame() -> DataFrame {
        df!(
            "Type" => ["Apartment", "Standalone Villa", "Twin house", "Apartment", "Apartment"],
            "Price" => ["1500000", "Unknown", "4000000", "900000", "1200000"],
            "Bedrooms" => ["3", "10+", "4", "Unknown", "2"],
            "Bathrooms" => ["2", "10+", "3", "1", "1"],
            "Area" => ["120", "350", "Unknown", "90", "80"],
            "Furnished" => ["No", "Yes", "No", "Unknown", "No"],
            "Level" => ["Ground", "10+", "2", "7", "10+"],
            "Compound" => ["Not in Compound", "Mivida", "Mivida", "Not in Compound", "Madinaty"],
            "Payment_Option" => ["Cash", "Installment", "Cash", "Cash", "Cash"],
            "Delivery_Date" => ["Ready to move", "2024", "soon", "Unknown", "someday"],
            "Delivery_Term" => ["Finished", "Semi Finished", "Core & Shell", "Finished", "Finished"],
            "City" => ["Unknown", "New Cairo", "(View phone number)", "Giza", "Madinaty"]
        )
        .unwrap()
    }

    #[test]
    fn test_normalization_scenario() {
        let df = normalize(&raw_frame()).unwrap();
        assert_eq!(f64_at(&df, LEVEL, 0), Some(0.0));
        assert_eq!(f64_at(&df, DELIVERY_DATE, 0), Some(0.0));
        assert_eq!(str_at(&df, CITY, 0).as_deref(), Some("Unknown"));
        assert_eq!(str_at(&df, TYPE, 0).as_deref(), Some("Apartment"));
        assert_eq!(f64_at(&df, BEDROOMS, 0), Some(3.0));
        assert_eq!(f64_at(&df, AREA, 0), Some(120.0));
    }

    #[test]
    fn test_synonym_types_collapse() {
        let df = normalize(&raw_frame()).unwrap();
        assert_eq!(str_at(&df, TYPE, 1).as_deref(), Some("Stand Alone Villa"));
        assert_eq!(str_at(&df, TYPE, 2).as_deref(), Some("Twin House"));
    }

    #[test]
    fn test_ceiling_counts_become_ten() {
        let df = normalize(&raw_frame()).unwrap();
        assert_eq!(f64_at(&df, BEDROOMS, 1), Some(10.0));
        assert_eq!(f64_at(&df, BATHROOMS, 1), Some(10.0));
    }

    #[test]
    fn test_unknown_numbers_become_null() {
        let df = normalize(&raw_frame()).unwrap();
        assert_eq!(f64_at(&df, PRICE, 1), None);
        assert_eq!(f64_at(&df, BEDROOMS, 3), None);
        assert_eq!(f64_at(&df, AREA, 2), None);
        assert_eq!(df.column(PRICE).unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_unknown_categories_stay_as_labels() {
        let df = normalize(&raw_frame()).unwrap();
        assert_eq!(str_at(&df, FURNISHED, 3).as_deref(), Some("Unknown"));
        assert_eq!(str_at(&df, CITY, 2).as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_delivery_phrases() {
        let df = normalize(&raw_frame()).unwrap();
        assert_eq!(f64_at(&df, DELIVERY_DATE, 1), Some(36.0));
        assert_eq!(f64_at(&df, DELIVERY_DATE, 2), Some(3.0));
        assert_eq!(f64_at(&df, DELIVERY_DATE, 3), None);
        // unrecognized phrase
        assert_eq!(f64_at(&df, DELIVERY_DATE, 4), None);
    }

    #[test]
    fn test_ceiling_level_takes_type_maximum() {
        let df = normalize(&raw_frame()).unwrap();
        // apartments know levels 0 and 7
        assert_eq!(f64_at(&df, LEVEL, 4), Some(7.0));
        // the only villa is itself the ceiling marker, so no known level exists
        assert_eq!(f64_at(&df, LEVEL, 1), None);
        assert_eq!(f64_at(&df, LEVEL, 2), Some(2.0));
    }

    #[test]
    fn test_drop_invalid_listings() {
        let df = df!(
            "Type" => ["Apartment", "Unknown", "Apartment", "Apartment"],
            "Price" => ["100", "200", "Unknown", "100"],
            "Area" => ["90", "80", "70", "90"]
        )
        .unwrap();
        let out = drop_invalid_listings(&df).unwrap();
        // duplicate, unknown type and unknown price all removed
        assert_eq!(out.height(), 1);
    }
}
