//! A single listing to price, as submitted from a form.

use crate::error::{PredictError, Result};
use abode_data::schema::{
    AREA, BATHROOMS, BEDROOMS, CITY, COMPOUND, DELIVERY_DATE, DELIVERY_TERM, FURNISHED, LEVEL,
    PAYMENT_OPTION, TYPE,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accepted range of each numeric form field, as `(field, min, max)`.
pub const NUMERIC_RANGES: [(&str, f64, f64); 5] = [
    (BEDROOMS, 1.0, 10.0),
    (BATHROOMS, 1.0, 10.0),
    (AREA, 20.0, 1000.0),
    (LEVEL, 0.0, 10.0),
    (DELIVERY_DATE, 0.0, 72.0),
];

/// Feature values of one listing, without a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Property type
    #[serde(rename = "Type")]
    pub property_type: String,
    /// Number of bedrooms
    #[serde(rename = "Bedrooms")]
    pub bedrooms: f64,
    /// Number of bathrooms
    #[serde(rename = "Bathrooms")]
    pub bathrooms: f64,
    /// Floor area in square meters
    #[serde(rename = "Area")]
    pub area: f64,
    /// "Yes" or "No"
    #[serde(rename = "Furnished")]
    pub furnished: String,
    /// Floor level, 0 for ground
    #[serde(rename = "Level")]
    pub level: f64,
    /// Compound name or "Not in Compound"
    #[serde(rename = "Compound")]
    pub compound: String,
    /// Payment option
    #[serde(rename = "Payment_Option")]
    pub payment_option: String,
    /// Months until delivery
    #[serde(rename = "Delivery_Date")]
    pub delivery_date: f64,
    /// Finishing state at delivery
    #[serde(rename = "Delivery_Term")]
    pub delivery_term: String,
    /// City or "Unknown"
    #[serde(rename = "City")]
    pub city: String,
}

impl PredictionRequest {
    /// Parse a flat form dictionary keyed by listing column names.
    ///
    /// Every field is required. Numeric fields must parse and fall inside
    /// [`NUMERIC_RANGES`]; text fields may hold labels the model never saw.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            property_type: text(form, TYPE)?,
            bedrooms: number(form, BEDROOMS)?,
            bathrooms: number(form, BATHROOMS)?,
            area: number(form, AREA)?,
            furnished: text(form, FURNISHED)?,
            level: number(form, LEVEL)?,
            compound: text(form, COMPOUND)?,
            payment_option: text(form, PAYMENT_OPTION)?,
            delivery_date: number(form, DELIVERY_DATE)?,
            delivery_term: text(form, DELIVERY_TERM)?,
            city: text(form, CITY)?,
        })
    }

    /// One-row frame with the encoder's input columns.
    pub fn to_frame(&self) -> Result<DataFrame> {
        Ok(df!(
            TYPE => [self.property_type.as_str()],
            BEDROOMS => [self.bedrooms],
            BATHROOMS => [self.bathrooms],
            AREA => [self.area],
            FURNISHED => [self.furnished.as_str()],
            LEVEL => [self.level],
            COMPOUND => [self.compound.as_str()],
            PAYMENT_OPTION => [self.payment_option.as_str()],
            DELIVERY_DATE => [self.delivery_date],
            DELIVERY_TERM => [self.delivery_term.as_str()],
            CITY => [self.city.as_str()]
        )?)
    }
}

fn field<'a>(form: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    form.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PredictError::InvalidRequest(format!("missing field {name}")))
}

fn text(form: &HashMap<String, String>, name: &str) -> Result<String> {
    field(form, name).map(str::to_string)
}

fn number(form: &HashMap<String, String>, name: &str) -> Result<f64> {
    let raw = field(form, name)?;
    let value: f64 = raw
        .parse()
        .map_err(|_| PredictError::InvalidRequest(format!("{name} is not a number: {raw}")))?;

    let (min, max) = NUMERIC_RANGES
        .iter()
        .find(|(field, _, _)| *field == name)
        .map_or((f64::NEG_INFINITY, f64::INFINITY), |(_, min, max)| (*min, *max));
    if !(value.is_finite() && value >= min && value <= max) {
        return Err(PredictError::InvalidRequest(format!(
            "{name} must be between {min} and {max}, got {raw}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn form() -> HashMap<String, String> {
        [
            ("Type", "Apartment"),
            ("Bedrooms", "3"),
            ("Bathrooms", "2"),
            ("Area", "150"),
            ("Furnished", "No"),
            ("Level", "2"),
            ("Compound", "Not in Compound"),
            ("Payment_Option", "Cash"),
            ("Delivery_Date", "0"),
            ("Delivery_Term", "Finished"),
            ("City", "New Cairo"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_from_form() {
        let request = PredictionRequest::from_form(&form()).unwrap();
        assert_eq!(request.property_type, "Apartment");
        assert_eq!(request.bedrooms, 3.0);
        assert_eq!(request.area, 150.0);
        assert_eq!(request.city, "New Cairo");
    }

    #[test]
    fn test_missing_field() {
        let mut form = form();
        form.remove("City");
        assert!(matches!(
            PredictionRequest::from_form(&form),
            Err(PredictError::InvalidRequest(m)) if m.contains("City")
        ));
    }

    #[rstest]
    #[case("Bedrooms", "three")]
    #[case("Bedrooms", "0")]
    #[case("Area", "5000")]
    #[case("Level", "-1")]
    #[case("Delivery_Date", "NaN")]
    #[case("Type", "  ")]
    fn test_rejected_values(#[case] key: &str, #[case] value: &str) {
        let mut form = form();
        form.insert(key.to_string(), value.to_string());
        assert!(matches!(
            PredictionRequest::from_form(&form),
            Err(PredictError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_unseen_labels_are_accepted() {
        let mut form = form();
        form.insert("Type".to_string(), "Chalet".to_string());
        assert!(PredictionRequest::from_form(&form).is_ok());
    }

    #[test]
    fn test_to_frame() {
        let df = PredictionRequest::from_form(&form()).unwrap().to_frame().unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 11);
        assert!(df.column("Price").is_err());
    }

    #[test]
    fn test_serde_uses_column_names() {
        let request = PredictionRequest::from_form(&form()).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Payment_Option"], "Cash");
        let back: PredictionRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);
    }
}
