//! Highlight generator tests
//!
//! Covers:
//! - Cap of three tags and duplicate suppression
//! - Season label precedence over the great-weather tag
//! - Threshold rules per signal domain and the strong-total fallback

use std::sync::Arc;

use proptest::prelude::*;

use shared::{Language, MonthlyScore, ScoreBreakdown, SeasonWindow};
use travel_timing_backend::services::highlight::{
    generate_highlights, HighlightService, MAX_HIGHLIGHTS,
};
use travel_timing_backend::services::season::SeasonCalendar;

fn breakdown(weather: f64, cost: f64, crowd: f64, buzz: f64, total: f64) -> ScoreBreakdown {
    ScoreBreakdown {
        weather,
        cost,
        crowd,
        buzz,
        total,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_season_label_always_first() {
        let window = SeasonWindow::new("seoul", "Cherry blossom season", "桜の見頃", (4, 1), (4, 15));
        let highlights = generate_highlights(&breakdown(9.5, 8.5, 2.0, 9.0, 8.8), Some(&window));

        assert_eq!(highlights[0].label, "Cherry blossom season");
        assert_eq!(highlights[0].label_ja, "桜の見頃");
        assert_eq!(highlights.len(), MAX_HIGHLIGHTS);

        assert_eq!(
            highlights[0].label_for(&Language::English),
            "Cherry blossom season"
        );
        assert_eq!(highlights[0].label_for(&Language::Japanese), "桜の見頃");
    }

    #[test]
    fn test_great_weather_suppressed_by_season_label() {
        let window = SeasonWindow::new("rome", "Azalea spring", "春", (4, 10), (5, 31));
        let highlights = generate_highlights(&breakdown(9.0, 5.0, 5.0, 5.0, 7.0), Some(&window));

        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].label, "Azalea spring");
    }

    #[test]
    fn test_weather_caution_still_applies_with_season() {
        let window = SeasonWindow::new("bangkok", "Cool dry season", "乾季", (11, 1), (2, 15));
        let highlights = generate_highlights(&breakdown(2.0, 5.0, 5.0, 5.0, 4.0), Some(&window));

        assert_eq!(highlights[0].label, "Cool dry season");
        assert_eq!(highlights[1].label, "Tough weather");
    }

    #[test]
    fn test_priority_order_without_season() {
        let highlights = generate_highlights(&breakdown(8.2, 8.1, 8.4, 8.9, 8.3), None);
        let labels: Vec<&str> = highlights.iter().map(|h| h.label.as_str()).collect();

        assert_eq!(
            labels,
            vec!["Great weather", "Favorable exchange rate", "Quiet off-peak"]
        );
    }

    #[test]
    fn test_low_scores_emit_cautions() {
        let highlights = generate_highlights(&breakdown(5.0, 2.9, 2.1, 4.0, 4.0), None);
        let labels: Vec<&str> = highlights.iter().map(|h| h.label.as_str()).collect();

        assert_eq!(labels, vec!["High cost of living", "Crowded peak season"]);
    }

    #[test]
    fn test_fallback_for_strong_total() {
        let highlights = generate_highlights(&breakdown(7.9, 7.9, 7.9, 7.9, 8.6), None);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].label, "Strongly recommended");
    }

    #[test]
    fn test_no_rules_matched_yields_empty() {
        let highlights = generate_highlights(&breakdown(5.0, 5.0, 5.0, 5.0, 5.0), None);
        assert!(highlights.is_empty());
    }

    #[test]
    fn test_service_resolves_season_from_calendar() {
        let seasons = Arc::new(SeasonCalendar::new(vec![SeasonWindow::new(
            "honolulu",
            "Whale watching season",
            "ホエールウォッチング",
            (11, 1),
            (2, 28),
        )]));
        let service = HighlightService::new(seasons);

        let december = MonthlyScore {
            destination_id: "honolulu".to_string(),
            month: 12,
            breakdown: breakdown(8.0, 5.0, 5.0, 5.0, 6.5),
        };
        let highlights = service.highlights_for(&december);
        assert_eq!(highlights[0].label, "Whale watching season");

        let june = MonthlyScore {
            destination_id: "honolulu".to_string(),
            month: 6,
            breakdown: breakdown(8.0, 5.0, 5.0, 5.0, 6.5),
        };
        let highlights = service.highlights_for(&june);
        assert_eq!(highlights[0].label, "Great weather");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// Never more than three tags, never a duplicate
        #[test]
        fn prop_capped_and_unique(
            weather in 1.0f64..=10.0,
            cost in 1.0f64..=10.0,
            crowd in 1.0f64..=10.0,
            buzz in 1.0f64..=10.0,
            total in 1.0f64..=10.0,
            with_season in any::<bool>(),
        ) {
            let window = SeasonWindow::new("x", "Local festival", "祭り", (6, 1), (6, 30));
            let season = if with_season { Some(&window) } else { None };
            let highlights = generate_highlights(&breakdown(weather, cost, crowd, buzz, total), season);

            prop_assert!(highlights.len() <= MAX_HIGHLIGHTS);
            for (i, a) in highlights.iter().enumerate() {
                for b in highlights.iter().skip(i + 1) {
                    prop_assert_ne!(&a.label, &b.label);
                }
            }

            // Season label first whenever present
            if with_season {
                prop_assert_eq!(highlights[0].label.as_str(), "Local festival");
            }
        }
    }
}
