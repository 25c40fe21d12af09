//! Property search options

use serde::{Deserialize, Serialize};

/// Optional filters for a property search.
///
/// Each present field adds one AND-combined clause; an absent field adds
/// nothing. Prices are in major units and compared against
/// `cost_per_night / 100`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Case-sensitive substring of the city name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_price_per_night: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_price_per_night: Option<i32>,

    /// Inclusive lower bound on the average review rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn owner_id(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn price_range(mut self, minimum: Option<i32>, maximum: Option<i32>) -> Self {
        self.minimum_price_per_night = minimum;
        self.maximum_price_per_night = maximum;
        self
    }

    pub fn minimum_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// City filter, with an empty string treated as no filter.
    pub fn city_filter(&self) -> Option<&str> {
        self.city.as_deref().filter(|city| !city.is_empty())
    }

    /// Whether `cost_per_night` (minor units) passes both price bounds.
    pub fn accepts_price(&self, cost_per_night: i32) -> bool {
        let major = cost_per_night / 100;
        self.minimum_price_per_night.map_or(true, |min| major >= min)
            && self.maximum_price_per_night.map_or(true, |max| major <= max)
    }
}
