//! Composite scoring engine tests
//!
//! Covers:
//! - Weather score range over the full latitude/month domain
//! - Weighted total invariant for caller-supplied weights
//! - Argument validation (month range, negative weights)
//! - Monthly, yearly, and inverted per-month views

use std::sync::Arc;

use proptest::prelude::*;

use shared::{BuzzSignal, CrowdSignal, RatePoint, ScoreWeights};
use travel_timing_backend::fixtures::{FixtureCatalog, FixtureStore};
use travel_timing_backend::services::scoring::{
    buzz_score, compute_breakdown, cost_score, crowd_score, round1, weather_score, ScoreContext,
    ScoreService, SCORE_MAX, SCORE_MIN,
};

fn seeded_service() -> ScoreService {
    ScoreService::new(
        Arc::new(FixtureCatalog::seeded()),
        Arc::new(FixtureStore::seeded()),
        ScoreWeights::default(),
    )
}

fn empty_context(latitude: f64) -> ScoreContext {
    ScoreContext {
        latitude,
        rate_history: Vec::new(),
        crowd: None,
        buzz: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_monthly_score_for_known_destination() {
        let service = seeded_service();
        let score = service.monthly_score("paris", 6).unwrap();

        assert_eq!(score.destination_id, "paris");
        assert_eq!(score.month, 6);
        for value in [
            score.breakdown.weather,
            score.breakdown.cost,
            score.breakdown.crowd,
            score.breakdown.buzz,
            score.breakdown.total,
        ] {
            assert!((SCORE_MIN..=SCORE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_monthly_score_unknown_destination() {
        let service = seeded_service();
        let err = service.monthly_score("atlantis", 6).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_malformed_destination_id_rejected() {
        let service = seeded_service();
        let err = service.monthly_score("Paris!", 6).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_monthly_score_invalid_month() {
        let service = seeded_service();
        assert_eq!(
            service.monthly_score("paris", 0).unwrap_err().code(),
            "INVALID_ARGUMENT"
        );
        assert_eq!(
            service.monthly_score("paris", 13).unwrap_err().code(),
            "INVALID_ARGUMENT"
        );
    }

    #[test]
    fn test_negative_weights_rejected() {
        let service = seeded_service();
        let weights = ScoreWeights {
            weather: 0.5,
            cost: 0.25,
            crowd: -0.15,
            buzz: 0.25,
        };
        let err = service
            .monthly_score_with_weights("paris", 6, &weights)
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_year_scores_cover_all_months() {
        let service = seeded_service();
        let scores = service.year_scores("seoul").unwrap();

        assert_eq!(scores.len(), 12);
        let months: Vec<u32> = scores.iter().map(|s| s.month).collect();
        assert_eq!(months, (1..=12).collect::<Vec<u32>>());
    }

    #[test]
    fn test_best_month_is_year_maximum() {
        let service = seeded_service();
        let best = service.best_month("sydney").unwrap();
        let year = service.year_scores("sydney").unwrap();

        let max_total = year
            .iter()
            .map(|s| s.breakdown.total)
            .fold(f64::MIN, f64::max);
        assert_eq!(best.breakdown.total, max_total);
    }

    #[test]
    fn test_best_for_month_sorted_descending() {
        let service = seeded_service();
        let ranked = service.best_for_month(4, 10).unwrap();

        assert!(!ranked.is_empty());
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.breakdown.total > b.breakdown.total
                    || (a.breakdown.total == b.breakdown.total
                        && a.destination_id < b.destination_id)
            );
        }
    }

    #[test]
    fn test_best_for_month_respects_limit() {
        let service = seeded_service();
        let ranked = service.best_for_month(4, 3).unwrap();
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_missing_signals_fall_back_to_neutral() {
        let service = ScoreService::new(
            Arc::new(FixtureCatalog::seeded()),
            Arc::new(FixtureStore::empty()),
            ScoreWeights::default(),
        );
        let score = service.monthly_score("paris", 6).unwrap();

        assert_eq!(score.breakdown.cost, 5.5);
        assert_eq!(score.breakdown.crowd, 5.5);
        assert_eq!(score.breakdown.buzz, 5.5);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn rate_history_strategy() -> impl Strategy<Value = Vec<RatePoint>> {
        (0.001f64..10.0, proptest::collection::vec(-5.0f64..5.0, 12)).prop_map(
            |(base, offsets)| {
                offsets
                    .into_iter()
                    .enumerate()
                    .map(|(index, offset)| {
                        RatePoint::new(
                            2025,
                            index as u32 + 1,
                            rust_decimal::Decimal::from_f64_retain(
                                base * (1.0 + offset / 100.0),
                            )
                            .unwrap_or_default(),
                        )
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Weather score stays in [1, 10] across the whole globe and year
        #[test]
        fn prop_weather_score_in_range(latitude in -90.0f64..=90.0, month in 1u32..=12) {
            let score = weather_score(month, latitude);
            prop_assert!(score >= SCORE_MIN && score <= SCORE_MAX);
        }

        /// Total is exactly the rounded weighted sum of the sub-scores
        #[test]
        fn prop_total_is_weighted_sum(
            latitude in -90.0f64..=90.0,
            month in 1u32..=12,
            raw in proptest::array::uniform4(0.01f64..1.0),
        ) {
            // Callers own the sum; normalize like a well-behaved caller
            let sum: f64 = raw.iter().sum();
            let weights = ScoreWeights {
                weather: raw[0] / sum,
                cost: raw[1] / sum,
                crowd: raw[2] / sum,
                buzz: raw[3] / sum,
            };

            let breakdown = compute_breakdown(&empty_context(latitude), month, &weights).unwrap();
            let expected = round1(
                weights.weather * breakdown.weather
                    + weights.cost * breakdown.cost
                    + weights.crowd * breakdown.crowd
                    + weights.buzz * breakdown.buzz,
            )
            .clamp(SCORE_MIN, SCORE_MAX);

            prop_assert_eq!(breakdown.total, expected);
        }

        /// Cost score is clamped for arbitrary rate histories
        #[test]
        fn prop_cost_score_in_range(history in rate_history_strategy(), month in 1u32..=12) {
            let score = cost_score(&history, month);
            prop_assert!(score >= SCORE_MIN && score <= SCORE_MAX);
        }

        /// Crowd score is clamped for any holiday load
        #[test]
        fn prop_crowd_score_in_range(holidays in 0u32..=20, peak in any::<bool>()) {
            let score = crowd_score(Some(CrowdSignal {
                holiday_count: holidays,
                is_peak_season: peak,
            }));
            prop_assert!(score >= SCORE_MIN && score <= SCORE_MAX);
        }

        /// Buzz score is clamped for any mention volume
        #[test]
        fn prop_buzz_score_in_range(mentions in 0u64..1_000_000, average in 0.0f64..100_000.0) {
            let score = buzz_score(Some(BuzzSignal {
                mentions,
                monthly_average: average,
            }));
            prop_assert!(score >= SCORE_MIN && score <= SCORE_MAX);
        }
    }
}
