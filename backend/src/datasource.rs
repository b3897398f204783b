//! Collaborator interfaces and data source selection
//!
//! The catalog, the persistence/statistics store, and the forecast
//! provider are external collaborators; the engine talks to them through
//! the seams defined here. The concrete wiring (live or fixture) is
//! selected once at process start, never via scattered null checks.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::ForecastClient;
use crate::fixtures::{FixtureCatalog, FixtureForecastProvider, FixtureStore};
use shared::{
    BuzzSignal, CachedForecast, CrowdSignal, Destination, ForecastDay, RatePoint, SeasonWindow,
};

/// Destination catalog collaborator
///
/// Reference data; implementations must be cheap to query repeatedly.
pub trait DestinationCatalog: Send + Sync {
    fn get(&self, id: &str) -> Option<Destination>;

    /// Full-text-ish filtering over ids, names, country, and keywords;
    /// result order is stable.
    fn search(&self, query: &str) -> Vec<Destination>;

    fn list(&self) -> Vec<Destination>;

    /// Season calendar entries for all destinations
    fn season_windows(&self) -> Vec<SeasonWindow>;
}

/// Persistence and statistics collaborator
///
/// Holds the forecast cache plus the signal series populated by the
/// external data-collection jobs.
pub trait SignalStore: Send + Sync {
    /// Read the cached forecast for a destination.
    ///
    /// An unreadable row surfaces as `CacheCorrupt`; callers treat that
    /// identically to a miss.
    fn read_forecast_cache(&self, destination_id: &str) -> AppResult<Option<CachedForecast>>;

    /// Upsert the cache entry for a destination (last write wins).
    fn write_forecast_cache(
        &self,
        destination_id: &str,
        days: &[ForecastDay],
        fetched_at: DateTime<Utc>,
    ) -> AppResult<()>;

    fn read_historical_clear_ratio(
        &self,
        destination_id: &str,
        month: u32,
    ) -> AppResult<Option<f64>>;

    /// Trailing monthly exchange-rate series for a currency
    fn read_rate_history(&self, currency_code: &str) -> AppResult<Vec<RatePoint>>;

    fn read_crowd_signal(&self, country_code: &str, month: u32) -> AppResult<Option<CrowdSignal>>;

    fn read_buzz_signal(&self, destination_id: &str, month: u32)
        -> AppResult<Option<BuzzSignal>>;
}

/// Forecast provider capability with live and fixture variants
pub enum ForecastProvider {
    Live(ForecastClient),
    Fixture(FixtureForecastProvider),
}

impl ForecastProvider {
    pub async fn fetch_daily(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> AppResult<Vec<ForecastDay>> {
        match self {
            ForecastProvider::Live(client) => client.fetch_daily(latitude, longitude, days).await,
            ForecastProvider::Fixture(provider) => provider.fetch_daily(latitude, longitude, days),
        }
    }
}

/// The set of collaborators the engine runs against
#[derive(Clone)]
pub struct DataSource {
    pub catalog: Arc<dyn DestinationCatalog>,
    pub store: Arc<dyn SignalStore>,
    pub forecast: Arc<ForecastProvider>,
}

impl DataSource {
    /// Fully seeded in-process collaborators; no network, no store
    pub fn fixture() -> Self {
        Self {
            catalog: Arc::new(FixtureCatalog::seeded()),
            store: Arc::new(FixtureStore::seeded()),
            forecast: Arc::new(ForecastProvider::Fixture(FixtureForecastProvider::new())),
        }
    }

    /// Dependency-injected production wiring
    pub fn live(
        catalog: Arc<dyn DestinationCatalog>,
        store: Arc<dyn SignalStore>,
        client: ForecastClient,
    ) -> Self {
        Self {
            catalog,
            store,
            forecast: Arc::new(ForecastProvider::Live(client)),
        }
    }

    /// Select the data source once from configuration.
    ///
    /// Live mode swaps in the real forecast provider; the catalog and the
    /// signal store stay seed-backed until their owning collaborators are
    /// injected through [`DataSource::live`].
    pub fn from_config(config: &Config) -> AppResult<Self> {
        match config.data.source.as_str() {
            "fixture" => {
                tracing::info!("Using fixture data source");
                Ok(Self::fixture())
            }
            "live" => {
                tracing::info!(
                    endpoint = %config.forecast.api_endpoint,
                    "Using live forecast provider"
                );
                let client = ForecastClient::new(
                    config.forecast.api_endpoint.clone(),
                    Duration::from_secs(config.forecast.timeout_seconds),
                )?;
                Ok(Self::live(
                    Arc::new(FixtureCatalog::seeded()),
                    Arc::new(FixtureStore::seeded()),
                    client,
                ))
            }
            other => Err(AppError::Configuration(format!(
                "Unknown data source mode: {}",
                other
            ))),
        }
    }
}
