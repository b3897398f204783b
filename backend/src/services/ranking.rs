//! Today-best ranking engine
//!
//! Combines each destination's base monthly score with time-sensitive
//! bonuses (exchange-rate edge, forecast delta, season proximity,
//! timeliness) into a single daily Top-N ranking with reasons.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use futures::future::join_all;

use crate::datasource::{DestinationCatalog, SignalStore};
use crate::error::AppResult;
use crate::services::forecast::ForecastService;
use crate::services::highlight::HighlightService;
use crate::services::scoring::{rate_favorability, round1, ScoreService};
use crate::services::season::SeasonCalendar;
use shared::{
    month_name_en, month_name_ja, BonusBreakdown, Destination, ForecastSummary, GpsCoordinates,
    MonthlyScore, RecommendedPeriod, SeasonWindow, TodayBestItem,
};

/// Bonus for an imminent or ongoing season window, decaying with distance
pub fn season_bonus(days_until_start: i64) -> f64 {
    match days_until_start {
        0 => 0.5,
        1..=7 => 0.4,
        8..=14 => 0.3,
        15..=30 => 0.15,
        _ => 0.0,
    }
}

/// Bonus for a favorable current exchange rate, capped at half a point
pub fn exchange_rate_bonus(favorability: f64) -> f64 {
    round1(5.0 * favorability).clamp(0.0, 0.5)
}

/// Bonus rewarding destinations whose best month is now or near now
///
/// Decays 0.05 per month of circular distance from 0.3, reaching zero at
/// half a year out.
pub fn timeliness_bonus(current_month: u32, best_month: u32) -> f64 {
    let distance = circular_month_distance(current_month, best_month);
    (30.0 - 5.0 * distance as f64).max(0.0) / 100.0
}

fn circular_month_distance(a: u32, b: u32) -> u32 {
    let d = (a as i32 - b as i32).rem_euclid(12) as u32;
    d.min(12 - d)
}

/// Today-best ranking service
#[derive(Clone)]
pub struct RankingService {
    catalog: Arc<dyn DestinationCatalog>,
    store: Arc<dyn SignalStore>,
    seasons: Arc<SeasonCalendar>,
    scores: ScoreService,
    forecasts: ForecastService,
    highlights: HighlightService,
    top_n: usize,
    forecast_timeout: Duration,
}

impl RankingService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: Arc<dyn DestinationCatalog>,
        store: Arc<dyn SignalStore>,
        seasons: Arc<SeasonCalendar>,
        scores: ScoreService,
        forecasts: ForecastService,
        highlights: HighlightService,
        top_n: usize,
        forecast_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            store,
            seasons,
            scores,
            forecasts,
            highlights,
            top_n,
            forecast_timeout,
        }
    }

    /// Rank every destination for "today" and keep the top N.
    ///
    /// Forecast lookups fan out concurrently, each under its own timeout;
    /// a single destination's forecast failure degrades its forecast
    /// bonus to zero instead of aborting the pass. Ties on the final
    /// score break by destination id so identical inputs always produce
    /// identical output.
    pub async fn rank_today(&self, today: NaiveDate) -> AppResult<Vec<TodayBestItem>> {
        let month = today.month();
        let destinations = self.catalog.list();
        tracing::debug!(count = destinations.len(), %today, "Starting ranking pass");

        let forecast_timeout = self.forecast_timeout;
        let forecast_futures = destinations.iter().map(|destination| {
            let forecasts = self.forecasts.clone();
            let id = destination.id.clone();
            let GpsCoordinates {
                latitude,
                longitude,
            } = destination.coordinates();
            async move {
                match tokio::time::timeout(
                    forecast_timeout,
                    forecasts.get_forecast(&id, latitude, longitude),
                )
                .await
                {
                    Ok(Ok(summary)) => Some(summary),
                    Ok(Err(e)) => {
                        tracing::warn!(destination_id = %id, error = %e, "Forecast unavailable during ranking");
                        None
                    }
                    Err(_) => {
                        tracing::warn!(destination_id = %id, "Forecast timed out during ranking");
                        None
                    }
                }
            }
        });
        let summaries: Vec<Option<ForecastSummary>> = join_all(forecast_futures).await;

        let mut items = Vec::new();
        for (destination, summary) in destinations.into_iter().zip(summaries) {
            let id = destination.id.clone();
            match self.build_item(destination, summary.as_ref(), today, month) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(destination_id = %id, error = %e, "Destination skipped during ranking");
                }
            }
        }

        items.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then_with(|| a.destination.id.cmp(&b.destination.id))
        });
        items.truncate(self.top_n);
        for (index, item) in items.iter_mut().enumerate() {
            item.rank = index as u32 + 1;
        }

        Ok(items)
    }

    fn build_item(
        &self,
        destination: Destination,
        summary: Option<&ForecastSummary>,
        today: NaiveDate,
        month: u32,
    ) -> AppResult<TodayBestItem> {
        let base = self.scores.monthly_score(&destination.id, month)?;

        let history = self
            .store
            .read_rate_history(&destination.currency_code)
            .unwrap_or_default();
        let next_window = self.seasons.next_window(&destination.id, today);
        let best_month = self
            .scores
            .best_month(&destination.id)
            .map(|s| s.month)
            .unwrap_or(month);

        let bonuses = BonusBreakdown {
            exchange_rate: exchange_rate_bonus(rate_favorability(&history)),
            forecast: summary.map(|s| s.score_adjustment).unwrap_or(0.0),
            season: next_window
                .as_ref()
                .map(|(_, days)| season_bonus(*days))
                .unwrap_or(0.0),
            timeliness: timeliness_bonus(month, best_month),
        };
        let final_score = round1(base.breakdown.total + bonuses.total());

        let (reasons, reasons_ja) =
            self.build_reasons(&destination, &base, summary, &bonuses, next_window);
        let period = recommended_period(today, month, next_window);

        Ok(TodayBestItem {
            rank: 0,
            destination,
            period,
            final_score,
            base_score: base.breakdown.total,
            bonuses,
            reasons,
            reasons_ja,
        })
    }

    fn build_reasons(
        &self,
        destination: &Destination,
        base: &MonthlyScore,
        summary: Option<&ForecastSummary>,
        bonuses: &BonusBreakdown,
        next_window: Option<(&SeasonWindow, i64)>,
    ) -> (Vec<String>, Vec<String>) {
        let mut reasons = Vec::new();
        let mut reasons_ja = Vec::new();

        for highlight in self.highlights.highlights_for(base) {
            reasons.push(highlight.label);
            reasons_ja.push(highlight.label_ja);
        }

        if let Some(summary) = summary {
            reasons.push(summary.comparison.text().to_string());
            reasons_ja.push(summary.comparison.text_ja().to_string());
        }

        if bonuses.exchange_rate > 0.0 {
            reasons.push(format!(
                "Yen is strong against the {} right now",
                destination.currency_code
            ));
            reasons_ja.push(format!("対{}で円高水準", destination.currency_code));
        }

        if let Some((window, days)) = next_window {
            if days == 0 {
                reasons.push(format!("{} is on now", window.label));
                reasons_ja.push(format!("{}の真っ最中", window.label_ja));
            } else if days <= 30 {
                reasons.push(format!("{} starts in {} days", window.label, days));
                reasons_ja.push(format!("{}まであと{}日", window.label_ja, days));
            }
        }

        (reasons, reasons_ja)
    }
}

/// Recommended travel period: the active or imminent season window when
/// one is within 30 days, otherwise the remainder of the current month.
fn recommended_period(
    today: NaiveDate,
    month: u32,
    next_window: Option<(&SeasonWindow, i64)>,
) -> RecommendedPeriod {
    if let Some((window, days)) = next_window {
        if days <= 30 {
            let (start, end) = SeasonCalendar::occurrence_dates(window, today);
            return RecommendedPeriod {
                start: start.max(today),
                end,
                label: window.label.clone(),
                label_ja: window.label_ja.clone(),
            };
        }
    }

    RecommendedPeriod {
        start: today,
        end: last_day_of_month(today.year(), month),
        label: format!("Rest of {}", month_name_en(month)),
        label_ja: format!("{}中はおすすめ", month_name_ja(month)),
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or_default()
}
