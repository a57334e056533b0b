//! Filter selection state.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound of the minimum-discount slider.
pub const MAX_MIN_DISCOUNT: u32 = 50;

/// How a deal may be redeemed, or the featured-venue proxy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiningType {
    #[default]
    #[serde(rename = "Everything")]
    Everything,
    #[serde(rename = "Dine-in")]
    DineIn,
    #[serde(rename = "Takeaway")]
    Takeaway,
    #[serde(rename = "Drinks")]
    Drinks,
    #[serde(rename = "Venue of the Week")]
    VenueOfTheWeek,
}

impl DiningType {
    pub const ALL: [DiningType; 5] = [
        DiningType::Everything,
        DiningType::DineIn,
        DiningType::Takeaway,
        DiningType::Drinks,
        DiningType::VenueOfTheWeek,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            DiningType::Everything => "Everything",
            DiningType::DineIn => "Dine-in",
            DiningType::Takeaway => "Takeaway",
            DiningType::Drinks => "Drinks",
            DiningType::VenueOfTheWeek => "Venue of the Week",
        }
    }
}

impl fmt::Display for DiningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DiningType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::validation(format!("Unknown dining type '{wanted}'")))
    }
}

/// The user's active filters and search text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Selected cuisine tags; empty means "do not filter"
    #[serde(default)]
    pub cuisines: BTreeSet<String>,

    /// Selected suburbs; empty means "do not filter"
    #[serde(default)]
    pub suburbs: BTreeSet<String>,

    /// Minimum best discount, 0..=50
    #[serde(default)]
    pub min_discount: u32,

    #[serde(default)]
    pub dining_type: DiningType,

    /// Free-text search
    #[serde(default)]
    pub query: String,
}

impl FilterSelection {
    /// Set the discount threshold, clamped to the slider range.
    pub fn with_min_discount(mut self, value: u32) -> Self {
        self.min_discount = value.min(MAX_MIN_DISCOUNT);
        self
    }

    pub fn with_dining_type(mut self, dining_type: DiningType) -> Self {
        self.dining_type = dining_type;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_cuisines<I, S>(mut self, cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cuisines = cuisines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_suburbs<I, S>(mut self, suburbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suburbs = suburbs.into_iter().map(Into::into).collect();
        self
    }
}
