//! Today-best ranking models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::destination::Destination;

/// Additive bonuses layered on top of a base monthly score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BonusBreakdown {
    pub exchange_rate: f64,
    pub forecast: f64,
    pub season: f64,
    pub timeliness: f64,
}

impl BonusBreakdown {
    pub fn total(&self) -> f64 {
        self.exchange_rate + self.forecast + self.season + self.timeliness
    }
}

/// Recommended travel period shown with a ranking item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
    pub label_ja: String,
}

/// One entry of the daily Top-N ranking
///
/// Rank is positional and recomputed on every ranking pass. The final
/// score is the base monthly score plus bonuses and is deliberately not
/// re-clamped to [1, 10].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodayBestItem {
    pub rank: u32,
    pub destination: Destination,
    pub period: RecommendedPeriod,
    pub final_score: f64,
    pub base_score: f64,
    pub bonuses: BonusBreakdown,
    pub reasons: Vec<String>,
    pub reasons_ja: Vec<String>,
}
