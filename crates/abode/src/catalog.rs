//! Select lists for a prediction form, derived from a cleaned dataset.

use crate::error::Result;
use abode_data::schema::{CITY, COMPOUND, DELIVERY_TERM, NOT_IN_COMPOUND, PAYMENT_OPTION, TYPE};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Distinct labels a form offers, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    /// Property types
    pub property_types: Vec<String>,
    /// Compounds, including "Not in Compound"
    pub compounds: Vec<String>,
    /// Cities
    pub cities: Vec<String>,
    /// Delivery terms
    pub delivery_terms: Vec<String>,
    /// Payment options
    pub payment_options: Vec<String>,
    /// Cities each compound appears in
    pub compound_cities: BTreeMap<String, Vec<String>>,
}

impl FormOptions {
    /// Collect the options from a cleaned frame.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let compounds = labels(df, COMPOUND)?;
        let cities = labels(df, CITY)?;

        let mut compound_cities: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let pairs = compounds
            .iter()
            .zip(&cities)
            .filter_map(|(compound, city)| Some((compound.as_ref()?, city.as_ref()?)))
            .filter(|(compound, _)| *compound != NOT_IN_COMPOUND);
        for (compound, city) in pairs {
            compound_cities
                .entry(compound.clone())
                .or_default()
                .insert(city.clone());
        }

        Ok(Self {
            property_types: distinct(labels(df, TYPE)?),
            compounds: distinct(compounds),
            cities: distinct(cities),
            delivery_terms: distinct(labels(df, DELIVERY_TERM)?),
            payment_options: distinct(labels(df, PAYMENT_OPTION)?),
            compound_cities: compound_cities
                .into_iter()
                .map(|(k, v)| (k, v.into_iter().collect()))
                .collect(),
        })
    }

    /// Cities to offer once a compound is chosen; every city outside a
    /// known compound.
    pub fn cities_for(&self, compound: &str) -> &[String] {
        self.compound_cities
            .get(compound)
            .map_or(self.cities.as_slice(), Vec::as_slice)
    }
}

fn labels(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    let values = df.column(column)?.cast(&DataType::String)?;
    Ok(values
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn distinct(values: Vec<Option<String>>) -> Vec<String> {
    values
        .into_iter()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
