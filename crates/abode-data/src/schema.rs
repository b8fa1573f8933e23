//! Listing columns, property types and their valid numeric ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Property type column.
pub const TYPE: &str = "Type";
/// Listing price column (the regression target).
pub const PRICE: &str = "Price";
/// Bedroom count column.
pub const BEDROOMS: &str = "Bedrooms";
/// Bathroom count column.
pub const BATHROOMS: &str = "Bathrooms";
/// Area in square meters.
pub const AREA: &str = "Area";
/// Furnished flag column.
pub const FURNISHED: &str = "Furnished";
/// Floor level column.
pub const LEVEL: &str = "Level";
/// Compound name column.
pub const COMPOUND: &str = "Compound";
/// Payment option column.
pub const PAYMENT_OPTION: &str = "Payment_Option";
/// Months until delivery column.
pub const DELIVERY_DATE: &str = "Delivery_Date";
/// Delivery term (finishing level) column.
pub const DELIVERY_TERM: &str = "Delivery_Term";
/// City column.
pub const CITY: &str = "City";

/// Every column a raw listing file must carry, in file order.
pub const LISTING_COLUMNS: [&str; 12] = [
    TYPE,
    PRICE,
    BEDROOMS,
    BATHROOMS,
    AREA,
    FURNISHED,
    LEVEL,
    COMPOUND,
    PAYMENT_OPTION,
    DELIVERY_DATE,
    DELIVERY_TERM,
    CITY,
];

/// Raw marker for a value the scraper could not read.
pub const UNKNOWN: &str = "Unknown";

/// Compound value for listings outside any compound.
pub const NOT_IN_COMPOUND: &str = "Not in Compound";

/// The closed set of property types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    /// Chalet
    Chalet,

    /// Apartment
    Apartment,

    /// Studio
    Studio,

    /// Penthouse
    Penthouse,

    /// Duplex
    Duplex,

    /// Stand Alone Villa
    StandAloneVilla,

    /// Twin House
    TwinHouse,

    /// Town House
    TownHouse,
}

impl PropertyType {
    /// Returns all property types.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Chalet,
            Self::Apartment,
            Self::Studio,
            Self::Penthouse,
            Self::Duplex,
            Self::StandAloneVilla,
            Self::TwinHouse,
            Self::TownHouse,
        ]
    }

    /// Returns the canonical label used in the `Type` column.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Chalet => "Chalet",
            Self::Apartment => "Apartment",
            Self::Studio => "Studio",
            Self::Penthouse => "Penthouse",
            Self::Duplex => "Duplex",
            Self::StandAloneVilla => "Stand Alone Villa",
            Self::TwinHouse => "Twin House",
            Self::TownHouse => "Town House",
        }
    }

    /// Parse a canonical label.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.name() == name)
    }

    /// Valid range of `field` for this property type.
    ///
    /// Only bedrooms, bathrooms and area have fixed ranges.
    pub const fn bounds(&self, field: NumericField) -> Option<Bounds> {
        let (min, max) = match (field, self) {
            (NumericField::Bedrooms, Self::Chalet) => (1.0, 3.0),
            (NumericField::Bedrooms, Self::Apartment | Self::Penthouse) => (1.0, 4.0),
            (NumericField::Bedrooms, Self::Studio) => (1.0, 2.0),
            (NumericField::Bedrooms, Self::Duplex) => (2.0, 8.0),
            (
                NumericField::Bedrooms,
                Self::StandAloneVilla | Self::TwinHouse | Self::TownHouse,
            ) => (3.0, 6.0),

            (NumericField::Bathrooms, Self::Chalet | Self::Apartment | Self::Penthouse) => {
                (1.0, 3.0)
            }
            (NumericField::Bathrooms, Self::Studio) => (1.0, 2.0),
            (NumericField::Bathrooms, Self::Duplex) => (2.0, 6.0),
            (
                NumericField::Bathrooms,
                Self::StandAloneVilla | Self::TwinHouse | Self::TownHouse,
            ) => (2.0, 5.0),

            (NumericField::Area, Self::Chalet) => (30.0, 180.0),
            (NumericField::Area, Self::Apartment) => (60.0, 250.0),
            (NumericField::Area, Self::Studio) => (30.0, 70.0),
            (NumericField::Area, Self::Penthouse) => (100.0, 240.0),
            (NumericField::Area, Self::StandAloneVilla) => (180.0, 400.0),
            (NumericField::Area, Self::Duplex | Self::TwinHouse | Self::TownHouse) => {
                (150.0, 500.0)
            }

            (NumericField::Price | NumericField::Level | NumericField::DeliveryDate, _) => {
                return None;
            }
        };
        Some(Bounds::new(min, max))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Numeric listing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    /// Listing price
    #[serde(rename = "Price")]
    Price,

    /// Bedroom count
    #[serde(rename = "Bedrooms")]
    Bedrooms,

    /// Bathroom count
    #[serde(rename = "Bathrooms")]
    Bathrooms,

    /// Area in square meters
    #[serde(rename = "Area")]
    Area,

    /// Floor level
    #[serde(rename = "Level")]
    Level,

    /// Months until delivery
    #[serde(rename = "Delivery_Date")]
    DeliveryDate,
}

impl NumericField {
    /// Returns all numeric fields.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Price,
            Self::Bedrooms,
            Self::Bathrooms,
            Self::Area,
            Self::Level,
            Self::DeliveryDate,
        ]
    }

    /// Column name of this field.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Price => PRICE,
            Self::Bedrooms => BEDROOMS,
            Self::Bathrooms => BATHROOMS,
            Self::Area => AREA,
            Self::Level => LEVEL,
            Self::DeliveryDate => DELIVERY_DATE,
        }
    }

    /// Whether any property type defines a fixed range for this field.
    pub const fn has_bounds(&self) -> bool {
        matches!(self, Self::Bedrooms | Self::Bathrooms | Self::Area)
    }

    /// How the outlier filter treats a value of this field outside the IQR fence.
    pub const fn outlier_policy(&self) -> OutlierPolicy {
        match self {
            Self::Price => OutlierPolicy::DropRow,
            _ => OutlierPolicy::NullValue,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// What happens to a listing whose value falls outside the IQR fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierPolicy {
    /// Remove the listing from the dataset.
    DropRow,
    /// Null the value and leave it to the imputer.
    NullValue,
}

/// Inclusive valid range of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest valid value
    pub min: f64,
    /// Largest valid value
    pub max: f64,
}

impl Bounds {
    /// Create a new range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Lowest value still snapped up to `min` for the given relative margin.
    pub fn lower_tolerance(&self, margin: f64) -> f64 {
        self.min * (1.0 - margin)
    }

    /// Highest value still snapped down to `max` for the given relative margin.
    pub fn upper_tolerance(&self, margin: f64) -> f64 {
        self.max * (1.0 + margin)
    }
}
