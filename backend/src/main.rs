//! Travel Timing Recommendation Platform - ranking engine runner
//!
//! Loads configuration, wires the data source selected for this process,
//! runs one today-best ranking pass, and prints it as JSON. The HTTP
//! surface and the periodic collection jobs live in sibling services.

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_timing_backend::{Config, DataSource, Services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_timing_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Travel Timing ranking engine");
    tracing::info!("Environment: {}", config.environment);

    let data = DataSource::from_config(&config)?;
    let services = Services::new(&data, &config);

    let today = Utc::now().date_naive();
    let started = std::time::Instant::now();
    let ranking = services.ranking.rank_today(today).await?;

    tracing::info!(
        items = ranking.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Ranking pass complete"
    );

    println!("{}", serde_json::to_string_pretty(&ranking)?);

    Ok(())
}
