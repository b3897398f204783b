//! Highlight generator
//!
//! Rule-based tagger converting a score breakdown (plus the season
//! calendar) into at most three short labels under a fixed precedence.
//! Highlights are a presentation aid and never feed back into scores.

use std::sync::Arc;

use shared::{Highlight, MonthlyScore, ScoreBreakdown, SeasonWindow};

use crate::services::season::SeasonCalendar;

/// Maximum highlights per destination and month
pub const MAX_HIGHLIGHTS: usize = 3;

/// Highlight service resolving season labels through the calendar
#[derive(Clone)]
pub struct HighlightService {
    seasons: Arc<SeasonCalendar>,
}

impl HighlightService {
    pub fn new(seasons: Arc<SeasonCalendar>) -> Self {
        Self { seasons }
    }

    /// Highlights for a monthly score, season label first when applicable
    pub fn highlights_for(&self, score: &MonthlyScore) -> Vec<Highlight> {
        let season = self
            .seasons
            .window_covering_month(&score.destination_id, score.month);
        generate_highlights(&score.breakdown, season)
    }
}

/// Apply the tag rules in strict priority order, stopping at three tags
pub fn generate_highlights(
    breakdown: &ScoreBreakdown,
    season: Option<&SeasonWindow>,
) -> Vec<Highlight> {
    let mut highlights: Vec<Highlight> = Vec::new();
    let push = |tags: &mut Vec<Highlight>, tag: Highlight| {
        if tags.len() < MAX_HIGHLIGHTS && !tags.contains(&tag) {
            tags.push(tag);
        }
    };

    // 1. Season window label; at most one per call, first match wins
    let season_added = if let Some(window) = season {
        push(
            &mut highlights,
            Highlight::new(&window.label, &window.label_ja),
        );
        true
    } else {
        false
    };

    // 2. Weather; the positive tag yields to a season label
    if breakdown.weather >= 8.0 {
        if !season_added {
            push(&mut highlights, Highlight::new("Great weather", "絶好の気候"));
        }
    } else if breakdown.weather <= 3.0 {
        push(&mut highlights, Highlight::new("Tough weather", "天候は厳しめ"));
    }

    // 3. Cost
    if breakdown.cost >= 8.0 {
        push(
            &mut highlights,
            Highlight::new("Favorable exchange rate", "為替が有利"),
        );
    } else if breakdown.cost <= 3.0 {
        push(
            &mut highlights,
            Highlight::new("High cost of living", "物価が割高"),
        );
    }

    // 4. Crowd
    if breakdown.crowd >= 8.0 {
        push(
            &mut highlights,
            Highlight::new("Quiet off-peak", "オフシーズンで快適"),
        );
    } else if breakdown.crowd <= 3.0 {
        push(
            &mut highlights,
            Highlight::new("Crowded peak season", "混雑のピーク"),
        );
    }

    // 5. Buzz
    if breakdown.buzz >= 8.0 {
        push(&mut highlights, Highlight::new("Trending now", "話題沸騰中"));
    }

    // 6. Fallback for strong overall scores
    if breakdown.total >= 8.5 && highlights.len() < MAX_HIGHLIGHTS {
        push(
            &mut highlights,
            Highlight::new("Strongly recommended", "イチオシの時期"),
        );
    }

    highlights.truncate(MAX_HIGHLIGHTS);
    highlights
}
