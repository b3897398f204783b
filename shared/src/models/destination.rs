//! Destination and season calendar models

use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// A travel destination in the catalog
///
/// Immutable reference data owned by the external catalog collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    /// Stable identifier (lowercase slug, e.g. "paris")
    pub id: String,
    pub name_en: String,
    pub name_ja: String,
    pub country: String,
    /// ISO-3166 alpha-2 country code
    pub country_code: String,
    /// ISO-4217 currency code
    pub currency_code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Search keywords (localized and English)
    pub keywords: Vec<String>,
}

impl Destination {
    /// Coordinates used for forecast lookups
    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.latitude, self.longitude)
    }
}

/// A named, possibly year-wrapping date range for a destination
///
/// `start_month/start_day > end_month/end_day` means the window spans the
/// year boundary (e.g. 11/1 - 2/28 covers December and January).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonWindow {
    pub destination_id: String,
    pub label: String,
    pub label_ja: String,
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,
}

impl SeasonWindow {
    pub fn new(
        destination_id: &str,
        label: &str,
        label_ja: &str,
        start: (u32, u32),
        end: (u32, u32),
    ) -> Self {
        Self {
            destination_id: destination_id.to_string(),
            label: label.to_string(),
            label_ja: label_ja.to_string(),
            start_month: start.0,
            start_day: start.1,
            end_month: end.0,
            end_day: end.1,
        }
    }

    /// Whether the window spans the year boundary
    pub fn wraps_year(&self) -> bool {
        (self.start_month, self.start_day) > (self.end_month, self.end_day)
    }
}
