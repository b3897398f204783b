//! Signal inputs collected by the external data-collection jobs
//!
//! These are read-only inputs to the scoring engine; the jobs that
//! populate them live outside this system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly mean exchange rate: units of destination currency per 1 JPY
///
/// A higher rate means the yen buys more, i.e. a more favorable month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatePoint {
    pub year: i32,
    pub month: u32,
    pub rate: Decimal,
}

impl RatePoint {
    pub fn new(year: i32, month: u32, rate: Decimal) -> Self {
        Self { year, month, rate }
    }
}

/// Crowding signal for a country and month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrowdSignal {
    /// Public holidays falling in the month
    pub holiday_count: u32,
    /// Whether the month is a known peak travel season for the country
    pub is_peak_season: bool,
}

/// Social-mention volume signal for a destination and month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BuzzSignal {
    /// Mentions observed for this destination and month
    pub mentions: u64,
    /// Mean monthly mentions for this destination across the year
    pub monthly_average: f64,
}
