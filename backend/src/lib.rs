//! Travel Timing Recommendation Platform - scoring and ranking engine
//!
//! Recommends the best calendar month to visit each destination in the
//! catalog, and a daily "best timing right now" Top-N ranking built from
//! composite scores, live forecast adjustments, and time-sensitive
//! bonuses.

use std::sync::Arc;
use std::time::Duration;

pub mod config;
pub mod datasource;
pub mod error;
pub mod external;
pub mod fixtures;
pub mod services;

pub use config::Config;
pub use datasource::{DataSource, DestinationCatalog, ForecastProvider, SignalStore};
pub use error::{AppError, AppResult};

use services::{
    ForecastService, HighlightService, RankingService, ScoreService, SeasonCalendar,
};

/// The engine's service set wired against one data source
#[derive(Clone)]
pub struct Services {
    pub seasons: Arc<SeasonCalendar>,
    pub scores: ScoreService,
    pub forecasts: ForecastService,
    pub highlights: HighlightService,
    pub ranking: RankingService,
}

impl Services {
    pub fn new(data: &DataSource, config: &Config) -> Self {
        let seasons = Arc::new(SeasonCalendar::new(data.catalog.season_windows()));
        let scores = ScoreService::new(
            data.catalog.clone(),
            data.store.clone(),
            config.scoring.weights(),
        );
        let forecasts = ForecastService::new(
            data.store.clone(),
            data.forecast.clone(),
            &config.forecast,
        );
        let highlights = HighlightService::new(seasons.clone());
        let ranking = RankingService::new(
            data.catalog.clone(),
            data.store.clone(),
            seasons.clone(),
            scores.clone(),
            forecasts.clone(),
            highlights.clone(),
            config.ranking.top_n,
            Duration::from_secs(config.forecast.timeout_seconds),
        );

        Self {
            seasons,
            scores,
            forecasts,
            highlights,
            ranking,
        }
    }
}
