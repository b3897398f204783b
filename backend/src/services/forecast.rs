//! Forecast adjustment service
//!
//! Fetches and caches a short-range forecast per destination, computes a
//! clear-day ratio, compares it to a historical baseline, and emits a
//! bounded score delta plus a human-readable comparison.
//!
//! Cache lifecycle per destination:
//! `absent -> fetch -> fresh -> (TTL elapsed) -> stale -> fetch -> ...`
//! Expiry is evaluated lazily on every read; there is no eviction thread.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::config::ForecastConfig;
use crate::datasource::{ForecastProvider, SignalStore};
use crate::error::{AppError, AppResult};
use crate::services::scoring::{round1, round2};
use shared::{validate_latitude, ForecastComparison, ForecastDay, ForecastSummary};

/// Baseline clear ratio used when the statistics collaborator has no row
pub const DEFAULT_HISTORICAL_CLEAR_RATIO: f64 = 0.6;

/// Deadband half-width: ratio differences within 0.10 read as "similar"
const COMPARISON_DEADBAND_CENTS: i64 = 10;

/// Forecast service with a TTL cache over the persistence collaborator
#[derive(Clone)]
pub struct ForecastService {
    store: Arc<dyn SignalStore>,
    provider: Arc<ForecastProvider>,
    window_days: u32,
    cache_ttl: Duration,
}

impl ForecastService {
    pub fn new(
        store: Arc<dyn SignalStore>,
        provider: Arc<ForecastProvider>,
        config: &ForecastConfig,
    ) -> Self {
        Self {
            store,
            provider,
            window_days: config.window_days,
            cache_ttl: Duration::hours(config.cache_ttl_hours),
        }
    }

    /// Forecast summary for a destination, served from cache while fresh.
    ///
    /// A hard provider failure surfaces as `UpstreamUnavailable`; there is
    /// no silent fallback to stale data once live data was requested.
    pub async fn get_forecast(
        &self,
        destination_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<ForecastSummary> {
        self.get_forecast_at(destination_id, latitude, longitude, Utc::now())
            .await
    }

    /// Same as [`get_forecast`](Self::get_forecast) with an injected clock
    pub async fn get_forecast_at(
        &self,
        destination_id: &str,
        latitude: f64,
        longitude: f64,
        now: DateTime<Utc>,
    ) -> AppResult<ForecastSummary> {
        validate_latitude(latitude).map_err(|e| AppError::invalid_argument("latitude", e))?;

        if let Some((days, fetched_at)) = self.read_fresh_cache(destination_id, now)? {
            tracing::debug!(destination_id, "Forecast served from cache");
            return self.summarize(destination_id, days, fetched_at);
        }

        let days = self
            .provider
            .fetch_daily(latitude, longitude, self.window_days)
            .await?;

        // Single-key upsert; a racing fetch for the same destination is
        // resolved last-write-wins since the data is re-derivable.
        self.store
            .write_forecast_cache(destination_id, &days, now)?;
        tracing::debug!(destination_id, days = days.len(), "Forecast fetched and cached");

        self.summarize(destination_id, days, now)
    }

    /// Read the cache entry if present, fresh, and parseable.
    ///
    /// A corrupt entry (store-level or an unparseable day payload) is
    /// treated identically to a miss.
    fn read_fresh_cache(
        &self,
        destination_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<(Vec<ForecastDay>, DateTime<Utc>)>> {
        let cached = match self.store.read_forecast_cache(destination_id) {
            Ok(cached) => cached,
            Err(AppError::CacheCorrupt(reason)) => {
                tracing::warn!(destination_id, %reason, "Corrupt forecast cache entry, refetching");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let Some(entry) = cached else {
            return Ok(None);
        };
        if now - entry.fetched_at > self.cache_ttl {
            return Ok(None);
        }

        match serde_json::from_value::<Vec<ForecastDay>>(entry.days) {
            Ok(days) => Ok(Some((days, entry.fetched_at))),
            Err(e) => {
                tracing::warn!(destination_id, error = %e, "Unparseable forecast cache payload, refetching");
                Ok(None)
            }
        }
    }

    /// Build the summary: clear-day statistics, baseline comparison, and
    /// the bounded score adjustment.
    fn summarize(
        &self,
        destination_id: &str,
        days: Vec<ForecastDay>,
        fetched_at: DateTime<Utc>,
    ) -> AppResult<ForecastSummary> {
        let total_days = days.len();
        let clear_days = days.iter().filter(|d| d.is_clear).count() as u32;

        let clear_ratio = if total_days == 0 {
            0.0
        } else {
            clear_days as f64 / total_days as f64
        };
        let avg_temp = if total_days == 0 {
            0.0
        } else {
            days.iter().map(ForecastDay::mean_temp).sum::<f64>() / total_days as f64
        };

        let month = days
            .first()
            .map(|d| d.date.month())
            .unwrap_or_else(|| fetched_at.month());
        let historical_clear_ratio = self
            .store
            .read_historical_clear_ratio(destination_id, month)?
            .unwrap_or(DEFAULT_HISTORICAL_CLEAR_RATIO);

        let (comparison, score_adjustment) =
            calculate_forecast_adjustment(clear_ratio, historical_clear_ratio);

        Ok(ForecastSummary {
            destination_id: destination_id.to_string(),
            days,
            clear_days,
            clear_ratio: round2(clear_ratio),
            avg_temp: round1(avg_temp),
            historical_clear_ratio: round2(historical_clear_ratio),
            comparison,
            score_adjustment,
            fetched_at,
        })
    }
}

/// Compare a forecast clear ratio against its historical baseline.
///
/// The difference is evaluated in whole hundredths so the 0.10 deadband
/// boundary is exact. Outside the deadband the adjustment is three times
/// the difference, rounded to one decimal and capped at +/-0.5.
pub fn calculate_forecast_adjustment(
    clear_ratio: f64,
    historical_clear_ratio: f64,
) -> (ForecastComparison, f64) {
    let diff_cents = ((clear_ratio - historical_clear_ratio) * 100.0).round() as i64;
    let adjustment = round1(3.0 * diff_cents as f64 / 100.0);

    if diff_cents >= COMPARISON_DEADBAND_CENTS {
        (ForecastComparison::Better, adjustment.min(0.5))
    } else if diff_cents <= -COMPARISON_DEADBAND_CENTS {
        (ForecastComparison::Worse, adjustment.max(-0.5))
    } else {
        (ForecastComparison::Similar, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_capped_at_half_point() {
        let (comparison, adjustment) = calculate_forecast_adjustment(0.8, 0.6);
        assert_eq!(comparison, ForecastComparison::Better);
        assert_eq!(adjustment, 0.5);
    }

    #[test]
    fn test_adjustment_worse_scales_down() {
        let (comparison, adjustment) = calculate_forecast_adjustment(0.5, 0.6);
        assert_eq!(comparison, ForecastComparison::Worse);
        assert_eq!(adjustment, -0.3);
    }

    #[test]
    fn test_adjustment_deadband_is_zero() {
        let (comparison, adjustment) = calculate_forecast_adjustment(0.55, 0.6);
        assert_eq!(comparison, ForecastComparison::Similar);
        assert_eq!(adjustment, 0.0);
    }

    #[test]
    fn test_adjustment_floor() {
        let (comparison, adjustment) = calculate_forecast_adjustment(0.1, 0.9);
        assert_eq!(comparison, ForecastComparison::Worse);
        assert_eq!(adjustment, -0.5);
    }
}
