//! Composite scoring engine
//!
//! Synthesizes a 1-10 score per destination and month from four signal
//! domains: weather, currency cost, crowding, and social buzz. All
//! calculators are pure; the service layer only gathers their inputs.

use std::f64::consts::PI;
use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::datasource::{DestinationCatalog, SignalStore};
use crate::error::{AppError, AppResult};
use shared::{
    validate_destination_id, validate_month, validate_weights, BuzzSignal, CrowdSignal,
    MonthlyScore, RatePoint, ScoreBreakdown, ScoreWeights,
};

/// Lowest and highest possible sub-score
pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 10.0;

/// Neutral score used when a collaborator signal is absent
const NEUTRAL_SCORE: f64 = 5.5;

/// Per-destination facts the calculators need for one scoring pass
#[derive(Debug, Clone)]
pub struct ScoreContext {
    pub latitude: f64,
    pub rate_history: Vec<RatePoint>,
    pub crowd: Option<CrowdSignal>,
    pub buzz: Option<BuzzSignal>,
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clamp into the valid score range
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

// ============================================================================
// Weather
// ============================================================================

/// Seasonal phase in [-1, 1], peaking at the local-hemisphere summer month
/// (July in the north, January in the south).
fn seasonal_phase(month: u32, latitude: f64) -> f64 {
    let peak_month = if latitude >= 0.0 { 7.0 } else { 1.0 };
    ((month as f64 - peak_month) * PI / 6.0).cos()
}

/// Estimate representative monthly temperature and clear-sky-day ratio
/// from latitude bands.
pub fn estimate_month_climate(month: u32, latitude: f64) -> (f64, f64) {
    let phase = seasonal_phase(month, latitude);
    let abs_lat = latitude.abs();

    // (mean temp, clear ratio) per band; tropical monsoons peak in the
    // hemisphere summer, so its clear ratio moves against the phase.
    if abs_lat <= 15.0 {
        (27.0 + 2.0 * phase, 0.55 - 0.25 * phase)
    } else if abs_lat <= 30.0 {
        (22.0 + 8.0 * phase, 0.60 + 0.10 * phase)
    } else if abs_lat <= 50.0 {
        (12.0 + 12.0 * phase, 0.50 + 0.15 * phase)
    } else {
        (2.0 + 14.0 * phase, 0.40 + 0.20 * phase)
    }
}

/// Score a representative temperature against the 15-28 C comfort band
///
/// Full marks at 21.5 C, decaying 0.3/C inside the band, 0.6/C below it,
/// 0.5/C above it, floored at 1.
fn temperature_score(temp: f64) -> f64 {
    let score = if temp < 15.0 {
        SCORE_MAX - 0.3 * (21.5 - 15.0) - 0.6 * (15.0 - temp)
    } else if temp > 28.0 {
        SCORE_MAX - 0.3 * (28.0 - 21.5) - 0.5 * (temp - 28.0)
    } else {
        SCORE_MAX - 0.3 * (temp - 21.5).abs()
    };
    score.max(SCORE_MIN)
}

/// Linear map of a clear-sky ratio in [0, 1] to [1, 10]
fn clear_sky_score(ratio: f64) -> f64 {
    SCORE_MIN + 9.0 * ratio.clamp(0.0, 1.0)
}

/// Weather sub-score for a month at a latitude
pub fn weather_score(month: u32, latitude: f64) -> f64 {
    let (temp, clear_ratio) = estimate_month_climate(month, latitude);
    let combined = 0.5 * temperature_score(temp) + 0.5 * clear_sky_score(clear_ratio);
    clamp_score(round1(combined))
}

// ============================================================================
// Cost
// ============================================================================

fn decimal_mean(values: &[Decimal]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: Decimal = values.iter().copied().sum();
    let mean = sum / Decimal::from(values.len());
    mean.to_f64().unwrap_or(0.0)
}

/// Cost sub-score from exchange-rate favorability for the target month
///
/// Rates are units of destination currency per 1 JPY; the target month's
/// mean is compared against the trailing average of the whole series. A
/// more favorable month (yen buys more) scores higher.
pub fn cost_score(history: &[RatePoint], month: u32) -> f64 {
    let month_rates: Vec<Decimal> = history
        .iter()
        .filter(|p| p.month == month)
        .map(|p| p.rate)
        .collect();
    let all_rates: Vec<Decimal> = history.iter().map(|p| p.rate).collect();

    let month_mean = decimal_mean(&month_rates);
    let trailing_mean = decimal_mean(&all_rates);

    if month_rates.is_empty() || trailing_mean <= 0.0 {
        return NEUTRAL_SCORE;
    }

    let favorability = (month_mean - trailing_mean) / trailing_mean;
    clamp_score(round1(NEUTRAL_SCORE + 45.0 * favorability))
}

/// Favorability of the latest rate against the trailing average, as a
/// signed fraction. Feeds the exchange-rate ranking bonus.
pub fn rate_favorability(history: &[RatePoint]) -> f64 {
    let latest = history.iter().max_by_key(|p| (p.year, p.month));
    let all_rates: Vec<Decimal> = history.iter().map(|p| p.rate).collect();
    let trailing_mean = decimal_mean(&all_rates);

    match latest {
        Some(point) if trailing_mean > 0.0 => {
            let latest_rate = point.rate.to_f64().unwrap_or(0.0);
            (latest_rate - trailing_mean) / trailing_mean
        }
        _ => 0.0,
    }
}

// ============================================================================
// Crowd
// ============================================================================

/// Crowd sub-score: holidays and peak season lower it, off-peak raises it
pub fn crowd_score(signal: Option<CrowdSignal>) -> f64 {
    let Some(signal) = signal else {
        return NEUTRAL_SCORE;
    };

    let mut score = 9.0 - 1.2 * signal.holiday_count as f64;
    if signal.is_peak_season {
        score -= 2.5;
    }
    clamp_score(round1(score))
}

// ============================================================================
// Buzz
// ============================================================================

/// Buzz sub-score from relative social-mention volume
pub fn buzz_score(signal: Option<BuzzSignal>) -> f64 {
    let Some(signal) = signal else {
        return NEUTRAL_SCORE;
    };
    if signal.monthly_average <= 0.0 {
        return NEUTRAL_SCORE;
    }

    let ratio = signal.mentions as f64 / signal.monthly_average;
    clamp_score(round1(NEUTRAL_SCORE + 4.5 * (ratio - 1.0)))
}

// ============================================================================
// Composite
// ============================================================================

/// Combine the four sub-scores into a breakdown with a weighted total.
///
/// Weights are taken as supplied and never re-normalized; callers own the
/// correctness of the sum. Fails only on an out-of-range month or a
/// negative weight.
pub fn compute_breakdown(
    ctx: &ScoreContext,
    month: u32,
    weights: &ScoreWeights,
) -> AppResult<ScoreBreakdown> {
    validate_month(month).map_err(|e| AppError::invalid_argument("month", e))?;
    validate_weights(weights).map_err(|e| AppError::invalid_argument("weights", e))?;

    let weather = weather_score(month, ctx.latitude);
    let cost = cost_score(&ctx.rate_history, month);
    let crowd = crowd_score(ctx.crowd);
    let buzz = buzz_score(ctx.buzz);

    let total = weights.weather * weather
        + weights.cost * cost
        + weights.crowd * crowd
        + weights.buzz * buzz;

    Ok(ScoreBreakdown {
        weather,
        cost,
        crowd,
        buzz,
        total: clamp_score(round1(total)),
    })
}

/// Scoring service gathering per-destination context from the collaborators
#[derive(Clone)]
pub struct ScoreService {
    catalog: Arc<dyn DestinationCatalog>,
    store: Arc<dyn SignalStore>,
    weights: ScoreWeights,
}

impl ScoreService {
    pub fn new(
        catalog: Arc<dyn DestinationCatalog>,
        store: Arc<dyn SignalStore>,
        weights: ScoreWeights,
    ) -> Self {
        Self {
            catalog,
            store,
            weights,
        }
    }

    /// Composite score for a destination and month with the configured weights
    pub fn monthly_score(&self, destination_id: &str, month: u32) -> AppResult<MonthlyScore> {
        self.monthly_score_with_weights(destination_id, month, &self.weights)
    }

    /// Composite score with caller-supplied weights
    pub fn monthly_score_with_weights(
        &self,
        destination_id: &str,
        month: u32,
        weights: &ScoreWeights,
    ) -> AppResult<MonthlyScore> {
        validate_destination_id(destination_id)
            .map_err(|e| AppError::invalid_argument("destination_id", e))?;

        let destination = self
            .catalog
            .get(destination_id)
            .ok_or_else(|| AppError::NotFound(format!("Destination {}", destination_id)))?;

        let ctx = ScoreContext {
            latitude: destination.latitude,
            rate_history: self.store.read_rate_history(&destination.currency_code)?,
            crowd: self
                .store
                .read_crowd_signal(&destination.country_code, month)?,
            buzz: self.store.read_buzz_signal(destination_id, month)?,
        };

        let breakdown = compute_breakdown(&ctx, month, weights)?;

        Ok(MonthlyScore {
            destination_id: destination_id.to_string(),
            month,
            breakdown,
        })
    }

    /// Scores for all twelve months of a destination (calendar view)
    pub fn year_scores(&self, destination_id: &str) -> AppResult<Vec<MonthlyScore>> {
        (1..=12)
            .map(|month| self.monthly_score(destination_id, month))
            .collect()
    }

    /// The destination's best-scoring month; earliest month wins ties
    pub fn best_month(&self, destination_id: &str) -> AppResult<MonthlyScore> {
        let scores = self.year_scores(destination_id)?;
        scores
            .into_iter()
            .max_by(|a, b| {
                a.breakdown
                    .total
                    .total_cmp(&b.breakdown.total)
                    .then(b.month.cmp(&a.month))
            })
            .ok_or_else(|| AppError::Internal("Empty year scores".to_string()))
    }

    /// Inverted view: every destination scored for one month, descending,
    /// ties broken by destination id.
    pub fn best_for_month(&self, month: u32, limit: usize) -> AppResult<Vec<MonthlyScore>> {
        validate_month(month).map_err(|e| AppError::invalid_argument("month", e))?;

        let mut scores = Vec::new();
        for destination in self.catalog.list() {
            scores.push(self.monthly_score(&destination.id, month)?);
        }

        scores.sort_by(|a, b| {
            b.breakdown
                .total
                .total_cmp(&a.breakdown.total)
                .then_with(|| a.destination_id.cmp(&b.destination_id))
        });
        scores.truncate(limit);
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_temperature_score_peak_comfort() {
        assert_eq!(temperature_score(21.5), 10.0);
        assert!(temperature_score(15.0) > temperature_score(10.0));
        assert!(temperature_score(28.0) > temperature_score(35.0));
    }

    #[test]
    fn test_temperature_score_floor() {
        assert_eq!(temperature_score(-40.0), SCORE_MIN);
    }

    #[test]
    fn test_weather_score_hemisphere_shift() {
        // July is summer in Paris but winter in Sydney
        let paris_july = weather_score(7, 48.86);
        let sydney_july = weather_score(7, -33.87);
        let sydney_january = weather_score(1, -33.87);

        assert!(paris_july > sydney_july);
        assert!(sydney_january > sydney_july);
    }

    #[test]
    fn test_cost_score_neutral_without_history() {
        assert_eq!(cost_score(&[], 5), NEUTRAL_SCORE);
    }

    #[test]
    fn test_cost_score_favorable_month_scores_higher() {
        let mut history = Vec::new();
        for month in 1..=12u32 {
            // March is noticeably cheaper than the rest of the year
            let rate = if month == 3 { dec("0.00700") } else { dec("0.00600") };
            history.push(RatePoint::new(2025, month, rate));
        }

        let march = cost_score(&history, 3);
        let june = cost_score(&history, 6);
        assert!(march > june);
        assert!(march <= SCORE_MAX && june >= SCORE_MIN);
    }

    #[test]
    fn test_crowd_score_penalizes_holidays_and_peak() {
        let quiet = crowd_score(Some(CrowdSignal {
            holiday_count: 0,
            is_peak_season: false,
        }));
        let busy = crowd_score(Some(CrowdSignal {
            holiday_count: 3,
            is_peak_season: true,
        }));

        assert_eq!(quiet, 9.0);
        assert!(busy < quiet);
        assert!(busy >= SCORE_MIN);
    }

    #[test]
    fn test_buzz_score_relative_volume() {
        let trending = buzz_score(Some(BuzzSignal {
            mentions: 2000,
            monthly_average: 1000.0,
        }));
        let flat = buzz_score(Some(BuzzSignal {
            mentions: 1000,
            monthly_average: 1000.0,
        }));

        assert_eq!(trending, SCORE_MAX);
        assert_eq!(flat, NEUTRAL_SCORE);
        assert_eq!(buzz_score(None), NEUTRAL_SCORE);
    }

    #[test]
    fn test_compute_breakdown_rejects_bad_month() {
        let ctx = ScoreContext {
            latitude: 35.0,
            rate_history: Vec::new(),
            crowd: None,
            buzz: None,
        };
        let weights = ScoreWeights::default();

        assert!(compute_breakdown(&ctx, 0, &weights).is_err());
        assert!(compute_breakdown(&ctx, 13, &weights).is_err());
        assert!(compute_breakdown(&ctx, 12, &weights).is_ok());
    }

    #[test]
    fn test_compute_breakdown_rejects_negative_weight() {
        let ctx = ScoreContext {
            latitude: 35.0,
            rate_history: Vec::new(),
            crowd: None,
            buzz: None,
        };
        let weights = ScoreWeights {
            weather: 0.5,
            cost: -0.1,
            crowd: 0.3,
            buzz: 0.3,
        };

        let err = compute_breakdown(&ctx, 6, &weights).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_total_is_weighted_sum() {
        let ctx = ScoreContext {
            latitude: 48.86,
            rate_history: Vec::new(),
            crowd: Some(CrowdSignal {
                holiday_count: 1,
                is_peak_season: false,
            }),
            buzz: Some(BuzzSignal {
                mentions: 1200,
                monthly_average: 1000.0,
            }),
        };
        let weights = ScoreWeights::default();
        let breakdown = compute_breakdown(&ctx, 6, &weights).unwrap();

        let expected = round1(
            weights.weather * breakdown.weather
                + weights.cost * breakdown.cost
                + weights.crowd * breakdown.crowd
                + weights.buzz * breakdown.buzz,
        );
        assert_eq!(breakdown.total, expected);
    }
}
