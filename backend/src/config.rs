//! Configuration management for the Travel Timing Recommendation Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with TTR_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Data source selection
    pub data: DataConfig,

    /// Forecast provider and cache configuration
    pub forecast: ForecastConfig,

    /// Composite scoring weights
    pub scoring: ScoringConfig,

    /// Today-best ranking configuration
    pub ranking: RankingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Data source mode: "live" or "fixture"
    pub source: String,

    /// Home currency the cost signals are expressed against
    pub home_currency: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Forecast API endpoint
    pub api_endpoint: String,

    /// Days in the forecast window
    pub window_days: u32,

    /// Cache time-to-live in hours
    pub cache_ttl_hours: i64,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    pub weather_weight: f64,
    pub cost_weight: f64,
    pub crowd_weight: f64,
    pub buzz_weight: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    /// Number of entries in the daily ranking
    pub top_n: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("TTR_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("data.source", "fixture")?
            .set_default("data.home_currency", "JPY")?
            .set_default("forecast.api_endpoint", "https://api.open-meteo.com/v1/forecast")?
            .set_default("forecast.window_days", 14)?
            .set_default("forecast.cache_ttl_hours", 6)?
            .set_default("forecast.timeout_seconds", 10)?
            .set_default("scoring.weather_weight", 0.35)?
            .set_default("scoring.cost_weight", 0.25)?
            .set_default("scoring.crowd_weight", 0.15)?
            .set_default("scoring.buzz_weight", 0.25)?
            .set_default("ranking.top_n", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (TTR_ prefix)
            .add_source(
                Environment::with_prefix("TTR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ScoringConfig {
    pub fn weights(&self) -> shared::ScoreWeights {
        shared::ScoreWeights {
            weather: self.weather_weight,
            cost: self.cost_weight,
            crowd: self.crowd_weight,
            buzz: self.buzz_weight,
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.open-meteo.com/v1/forecast".to_string(),
            window_days: 14,
            cache_ttl_hours: 6,
            timeout_seconds: 10,
        }
    }
}
