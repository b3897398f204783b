//! Forecast data models
//!
//! Weather codes follow the WMO interpretation codes used by the forecast
//! provider: 0-2 are clear/partly-clear, everything else (overcast, fog,
//! rain, snow, storm) counts as non-clear.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One forecast day in the fixed-length forecast window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub precipitation_mm: f64,
    pub weather_code: u8,
    pub is_clear: bool,
    pub icon: String,
}

impl ForecastDay {
    /// Build a day record, deriving the clear-sky flag and icon from the
    /// weather code.
    pub fn from_raw(
        date: NaiveDate,
        temp_max: f64,
        temp_min: f64,
        precipitation_mm: f64,
        weather_code: u8,
    ) -> Self {
        Self {
            date,
            temp_max,
            temp_min,
            precipitation_mm,
            weather_code,
            is_clear: weather_code_is_clear(weather_code),
            icon: weather_code_icon(weather_code).to_string(),
        }
    }

    /// Midpoint of the day's temperature range
    pub fn mean_temp(&self) -> f64 {
        (self.temp_max + self.temp_min) / 2.0
    }
}

/// Whether a WMO weather code denotes clear or partly-clear sky
pub fn weather_code_is_clear(code: u8) -> bool {
    code <= 2
}

/// Icon identifier for a WMO weather code
pub fn weather_code_icon(code: u8) -> &'static str {
    match code {
        0 => "sunny",
        1 => "mostly_sunny",
        2 => "partly_cloudy",
        3 => "cloudy",
        45 | 48 => "fog",
        51..=57 => "drizzle",
        61..=67 | 80..=82 => "rain",
        71..=77 | 85 | 86 => "snow",
        95..=99 => "storm",
        _ => "unknown",
    }
}

/// How the forecast window compares to the historical baseline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForecastComparison {
    Better,
    Similar,
    Worse,
}

impl ForecastComparison {
    pub fn text(&self) -> &'static str {
        match self {
            ForecastComparison::Better => "Clearer skies than usual for this time of year",
            ForecastComparison::Similar => "Weather about as expected for this time of year",
            ForecastComparison::Worse => "Cloudier than usual for this time of year",
        }
    }

    pub fn text_ja(&self) -> &'static str {
        match self {
            ForecastComparison::Better => "例年より晴れの日が多い見込みです",
            ForecastComparison::Similar => "例年並みの天候の見込みです",
            ForecastComparison::Worse => "例年より曇りや雨が多い見込みです",
        }
    }
}

/// Summary of a destination's short-range forecast against its baseline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSummary {
    pub destination_id: String,
    pub days: Vec<ForecastDay>,
    pub clear_days: u32,
    /// Fraction of forecast days that are clear, rounded to 2 decimals
    pub clear_ratio: f64,
    /// Mean of daily temperature midpoints, rounded to 1 decimal
    pub avg_temp: f64,
    /// Historical clear-day ratio for the window's month, rounded to 2 decimals
    pub historical_clear_ratio: f64,
    pub comparison: ForecastComparison,
    /// Bounded score delta in [-0.5, 0.5]
    pub score_adjustment: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Persisted forecast cache entry
///
/// The day list is stored as raw JSON so an unreadable payload can be
/// detected and treated as a cache miss instead of failing the read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedForecast {
    pub destination_id: String,
    pub days: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
}
