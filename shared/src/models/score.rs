//! Score models for the composite scoring engine

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Sub-scores per signal domain plus the weighted total
///
/// Each sub-score is in [1.0, 10.0]. `total` is the weighted sum of the
/// four sub-scores rounded to one decimal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub weather: f64,
    pub cost: f64,
    pub crowd: f64,
    pub buzz: f64,
    pub total: f64,
}

/// Weights for combining sub-scores
///
/// By convention the four weights sum to 1.0, but the scoring engine
/// accepts any non-negative set without re-normalizing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    pub weather: f64,
    pub cost: f64,
    pub crowd: f64,
    pub buzz: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            weather: 0.35,
            cost: 0.25,
            crowd: 0.15,
            buzz: 0.25,
        }
    }
}

/// Composite score for a destination and month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyScore {
    pub destination_id: String,
    /// Calendar month, 1-12
    pub month: u32,
    pub breakdown: ScoreBreakdown,
}

/// A short display tag summarizing why a destination/month scores as it does
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Highlight {
    pub label: String,
    pub label_ja: String,
}

impl Highlight {
    pub fn new(label: &str, label_ja: &str) -> Self {
        Self {
            label: label.to_string(),
            label_ja: label_ja.to_string(),
        }
    }

    /// Label in the requested language
    pub fn label_for(&self, language: &Language) -> &str {
        match language {
            Language::Japanese => &self.label_ja,
            Language::English => &self.label,
        }
    }
}
