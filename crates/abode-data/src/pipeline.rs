//! The listing cleaning pipeline.
//!
//! Cleaning runs as an explicit, ordered list of [`Stage`]s. Every stage is a
//! pure function from one frame to the next, so the order below is the only
//! coupling between them:
//!
//! 1. [`Stage::DropInvalid`]: duplicates, unknown price or type
//! 2. [`Stage::Normalize`]: canonical labels and numeric columns
//! 3. [`Stage::Outliers`] per configured field: range repair, then IQR filter
//! 4. [`Stage::Impute`]: hierarchical group medians
//! 5. [`Stage::DropIncomplete`]: anything still null

use crate::error::Result;
use crate::impute::{drop_incomplete, impute_hierarchical};
use crate::load::read_listings;
use crate::normalize::{drop_invalid_listings, normalize};
use crate::outlier::{DEFAULT_IQR_MULTIPLIER, filter_outliers};
use crate::range::{DEFAULT_MARGIN, repair_range};
use crate::schema::{CITY, COMPOUND, NumericField, TYPE};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Configuration for the cleaning pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Relative margin for snapping near-range values onto the range bounds
    pub margin: f64,

    /// Fence width in interquartile ranges
    pub iqr_multiplier: f64,

    /// Fields passed through range repair and outlier filtering, in order
    pub outlier_fields: Vec<NumericField>,

    /// Fields filled by the imputer
    pub impute_fields: Vec<NumericField>,

    /// Grouping keys from most to least specific
    pub grouping_keys: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            outlier_fields: vec![
                NumericField::Price,
                NumericField::Bedrooms,
                NumericField::Bathrooms,
                NumericField::Area,
            ],
            impute_fields: NumericField::all(),
            grouping_keys: vec![TYPE.to_string(), COMPOUND.to_string(), CITY.to_string()],
        }
    }
}

/// One step of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Drop duplicates and listings with an unknown price or type
    DropInvalid,

    /// Normalize raw labels and parse numeric columns
    Normalize,

    /// Repair the field against type ranges, then filter IQR outliers
    Outliers(NumericField),

    /// Fill gaps with hierarchical group medians
    Impute,

    /// Drop listings that are still incomplete
    DropIncomplete,
}

impl Stage {
    /// Apply this stage to a frame.
    pub fn apply(&self, df: &DataFrame, config: &PipelineConfig) -> Result<DataFrame> {
        match self {
            Self::DropInvalid => drop_invalid_listings(df),
            Self::Normalize => normalize(df),
            Self::Outliers(field) => {
                let repaired = repair_range(df, *field, config.margin)?;
                filter_outliers(&repaired, *field, config.iqr_multiplier)
            }
            Self::Impute => {
                let columns: Vec<&str> =
                    config.impute_fields.iter().map(|f| f.column()).collect();
                let keys: Vec<&str> = config.grouping_keys.iter().map(String::as_str).collect();
                impute_hierarchical(df, &columns, &keys)
            }
            Self::DropIncomplete => drop_incomplete(df),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropInvalid => write!(f, "drop invalid"),
            Self::Normalize => write!(f, "normalize"),
            Self::Outliers(field) => write!(f, "outliers({field})"),
            Self::Impute => write!(f, "impute"),
            Self::DropIncomplete => write!(f, "drop incomplete"),
        }
    }
}

/// Deterministic cleaning pass over a listing frame.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    stages: Vec<Stage>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    /// Build the stage list for `config`.
    pub fn new(config: PipelineConfig) -> Self {
        let stages = [Stage::DropInvalid, Stage::Normalize]
            .into_iter()
            .chain(config.outlier_fields.iter().map(|f| Stage::Outliers(*f)))
            .chain([Stage::Impute, Stage::DropIncomplete])
            .collect();
        Self { config, stages }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage over a raw listing frame.
    pub fn run(&self, raw: &DataFrame) -> Result<DataFrame> {
        let mut df = raw.clone();
        for stage in &self.stages {
            df = stage.apply(&df, &self.config)?;
            debug!(stage = %stage, rows = df.height(), "stage complete");
        }
        info!(raw = raw.height(), cleaned = df.height(), "cleaning pipeline finished");
        Ok(df)
    }

    /// Load a raw listing file and clean it.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let raw = read_listings(path)?;
        self.run(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stage_order() {
        let pipeline = Pipeline::default();
        assert_eq!(
            pipeline.stages(),
            &[
                Stage::DropInvalid,
                Stage::Normalize,
                Stage::Outliers(NumericField::Price),
                Stage::Outliers(NumericField::Bedrooms),
                Stage::Outliers(NumericField::Bathrooms),
                Stage::Outliers(NumericField::Area),
                Stage::Impute,
                Stage::DropIncomplete,
            ]
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.margin, 0.1);
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.grouping_keys, vec!["Type", "Compound", "City"]);
        assert_eq!(config.impute_fields.len(), 6);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Outliers(NumericField::Area).to_string(), "outliers(Area)");
        assert_eq!(Stage::DropIncomplete.to_string(), "drop incomplete");
    }
}
