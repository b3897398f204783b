//! Fixture collaborators seeded with representative data
//!
//! Used when no live catalog/store is configured and by the test suite.
//! The catalog targets the Japanese market: eight destinations, season
//! windows (including year-wrapping ones), twelve-month exchange-rate
//! series against the yen, and crowd/buzz signals.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Datelike, Duration, Utc};
use rust_decimal::Decimal;

use crate::datasource::{DestinationCatalog, SignalStore};
use crate::error::{AppError, AppResult};
use crate::services::scoring::estimate_month_climate;
use shared::{
    BuzzSignal, CachedForecast, CrowdSignal, Destination, ForecastDay, RatePoint, SeasonWindow,
};

fn destination(
    id: &str,
    name_en: &str,
    name_ja: &str,
    country: &str,
    country_code: &str,
    currency_code: &str,
    latitude: f64,
    longitude: f64,
    keywords: &[&str],
) -> Destination {
    Destination {
        id: id.to_string(),
        name_en: name_en.to_string(),
        name_ja: name_ja.to_string(),
        country: country.to_string(),
        country_code: country_code.to_string(),
        currency_code: currency_code.to_string(),
        latitude,
        longitude,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn seed_destinations() -> Vec<Destination> {
    vec![
        destination(
            "bangkok",
            "Bangkok",
            "バンコク",
            "Thailand",
            "TH",
            "THB",
            13.7563,
            100.5018,
            &["thailand", "temple", "street food", "タイ", "寺院"],
        ),
        destination(
            "honolulu",
            "Honolulu",
            "ホノルル",
            "United States",
            "US",
            "USD",
            21.3069,
            -157.8583,
            &["hawaii", "beach", "resort", "ハワイ", "ビーチ"],
        ),
        destination(
            "london",
            "London",
            "ロンドン",
            "United Kingdom",
            "GB",
            "GBP",
            51.5072,
            -0.1276,
            &["england", "museum", "theatre", "イギリス", "ミュージアム"],
        ),
        destination(
            "paris",
            "Paris",
            "パリ",
            "France",
            "FR",
            "EUR",
            48.8566,
            2.3522,
            &["france", "art", "cafe", "フランス", "美術館"],
        ),
        destination(
            "rome",
            "Rome",
            "ローマ",
            "Italy",
            "IT",
            "EUR",
            41.9028,
            12.4964,
            &["italy", "ruins", "pasta", "イタリア", "遺跡"],
        ),
        destination(
            "seoul",
            "Seoul",
            "ソウル",
            "South Korea",
            "KR",
            "KRW",
            37.5665,
            126.978,
            &["korea", "food", "shopping", "韓国", "グルメ"],
        ),
        destination(
            "sydney",
            "Sydney",
            "シドニー",
            "Australia",
            "AU",
            "AUD",
            -33.8688,
            151.2093,
            &["australia", "harbour", "opera house", "オーストラリア", "ハーバー"],
        ),
        destination(
            "taipei",
            "Taipei",
            "台北",
            "Taiwan",
            "TW",
            "TWD",
            25.033,
            121.5654,
            &["taiwan", "night market", "hot springs", "台湾", "夜市"],
        ),
    ]
}

fn seed_season_windows() -> Vec<SeasonWindow> {
    vec![
        SeasonWindow::new("bangkok", "Songkran festival", "ソンクラーン祭り", (4, 13), (4, 15)),
        SeasonWindow::new("bangkok", "Cool dry season", "乾季ベストシーズン", (11, 1), (2, 15)),
        SeasonWindow::new("honolulu", "Whale watching season", "ホエールウォッチング", (11, 1), (2, 28)),
        SeasonWindow::new("london", "Festive lights season", "ウィンターイルミネーション", (11, 15), (1, 5)),
        SeasonWindow::new("paris", "Christmas market season", "クリスマスマーケット", (11, 20), (12, 26)),
        SeasonWindow::new("paris", "Rose season", "バラの見頃", (5, 15), (6, 30)),
        SeasonWindow::new("rome", "Azalea spring", "春のベストシーズン", (4, 10), (5, 31)),
        SeasonWindow::new("seoul", "Cherry blossom season", "桜の見頃", (4, 1), (4, 15)),
        SeasonWindow::new("sydney", "Vivid Sydney", "ビビッド・シドニー", (5, 22), (6, 13)),
        SeasonWindow::new("sydney", "Jacaranda bloom", "ジャカランダの見頃", (10, 20), (11, 30)),
        SeasonWindow::new("taipei", "Lantern festival", "ランタンフェスティバル", (2, 5), (2, 20)),
    ]
}

/// Twelve monthly rate points from a base rate and per-month percentage
/// offsets (units of destination currency per 1 JPY).
fn rate_series(base: f64, offsets_pct: [f64; 12]) -> Vec<RatePoint> {
    offsets_pct
        .iter()
        .enumerate()
        .map(|(index, offset)| {
            let rate = base * (1.0 + offset / 100.0);
            RatePoint::new(
                2025,
                index as u32 + 1,
                Decimal::from_f64_retain(rate).unwrap_or_default(),
            )
        })
        .collect()
}

fn seed_rates() -> HashMap<String, Vec<RatePoint>> {
    let mut rates = HashMap::new();
    // Later months trending up = yen strengthening = favorable now
    rates.insert(
        "EUR".to_string(),
        rate_series(0.0061, [-2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0]),
    );
    rates.insert(
        "GBP".to_string(),
        rate_series(0.0052, [2.0, 1.5, 1.0, 0.5, 0.0, -0.5, -1.0, -1.0, -1.5, -2.0, -2.0, -2.5]),
    );
    rates.insert(
        "USD".to_string(),
        rate_series(0.0066, [-1.0, -0.5, 0.0, 0.5, 1.0, 0.5, 0.0, -0.5, 0.0, 0.5, 1.0, 1.5]),
    );
    rates.insert(
        "THB".to_string(),
        rate_series(0.235, [-1.0, 0.0, 1.0, 2.0, 1.5, 1.0, 0.5, 0.5, 1.0, 1.5, 2.0, 2.5]),
    );
    rates.insert(
        "KRW".to_string(),
        rate_series(9.05, [0.0, 0.5, 1.0, 0.5, 0.0, -0.5, 0.0, 0.5, 0.0, 0.5, 1.0, 1.0]),
    );
    rates.insert(
        "AUD".to_string(),
        rate_series(0.0102, [1.0, 0.5, 0.0, -0.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 1.5, 2.0]),
    );
    rates.insert(
        "TWD".to_string(),
        rate_series(0.205, [-0.5, 0.0, 0.5, 1.0, 0.5, 0.0, -0.5, 0.0, 0.5, 1.0, 1.0, 1.5]),
    );
    rates
}

/// Per-country holiday counts by month plus peak travel months
fn crowd_profile(holidays: [u32; 12], peak_months: &[u32]) -> Vec<CrowdSignal> {
    (1..=12u32)
        .map(|month| CrowdSignal {
            holiday_count: holidays[(month - 1) as usize],
            is_peak_season: peak_months.contains(&month),
        })
        .collect()
}

fn seed_crowd() -> HashMap<(String, u32), CrowdSignal> {
    let profiles: [(&str, [u32; 12], &[u32]); 8] = [
        ("FR", [2, 0, 0, 1, 4, 0, 1, 1, 0, 0, 2, 2], &[7, 8]),
        ("GB", [1, 0, 0, 2, 2, 0, 0, 1, 0, 0, 0, 2], &[7, 8]),
        ("IT", [2, 0, 0, 2, 1, 1, 0, 1, 0, 0, 1, 3], &[7, 8]),
        ("TH", [2, 1, 0, 3, 2, 1, 1, 1, 0, 1, 0, 2], &[1, 4, 12]),
        ("US", [2, 1, 0, 0, 1, 1, 1, 0, 1, 1, 2, 2], &[6, 7, 8, 12]),
        ("KR", [2, 1, 1, 0, 2, 1, 0, 1, 2, 2, 0, 1], &[4, 10]),
        ("AU", [2, 0, 0, 2, 0, 1, 0, 0, 0, 0, 0, 2], &[1, 12]),
        ("TW", [1, 3, 0, 2, 0, 1, 0, 0, 1, 2, 0, 0], &[2]),
    ];

    let mut crowd = HashMap::new();
    for (country, holidays, peaks) in profiles {
        for (index, signal) in crowd_profile(holidays, peaks).into_iter().enumerate() {
            crowd.insert((country.to_string(), index as u32 + 1), signal);
        }
    }
    crowd
}

/// Per-destination monthly mention counts
fn seed_buzz() -> HashMap<(String, u32), BuzzSignal> {
    let profiles: [(&str, [u64; 12]); 8] = [
        ("bangkok", [1400, 1200, 1000, 1800, 900, 700, 700, 800, 800, 1000, 1500, 1600]),
        ("honolulu", [1600, 1400, 1100, 900, 900, 1100, 1300, 1300, 900, 900, 1200, 1700]),
        ("london", [900, 800, 900, 1100, 1200, 1300, 1400, 1300, 1000, 900, 1100, 1800]),
        ("paris", [900, 800, 1000, 1300, 1600, 1400, 1500, 1300, 1100, 1000, 1100, 1700]),
        ("rome", [700, 700, 900, 1400, 1500, 1300, 1200, 1100, 1000, 900, 700, 900]),
        ("seoul", [900, 900, 1300, 2100, 1200, 900, 800, 800, 900, 1300, 1100, 1000]),
        ("sydney", [1300, 1100, 900, 800, 1000, 900, 800, 800, 900, 1200, 1300, 1500]),
        ("taipei", [1000, 1900, 1000, 900, 800, 800, 800, 800, 900, 1000, 1000, 1100]),
    ];

    let mut buzz = HashMap::new();
    for (id, mentions) in profiles {
        let average = mentions.iter().sum::<u64>() as f64 / 12.0;
        for (index, count) in mentions.into_iter().enumerate() {
            buzz.insert(
                (id.to_string(), index as u32 + 1),
                BuzzSignal {
                    mentions: count,
                    monthly_average: average,
                },
            );
        }
    }
    buzz
}

/// Historical clear ratios derived from the latitude-band climate model
fn seed_clear_ratios(destinations: &[Destination]) -> HashMap<(String, u32), f64> {
    let mut ratios = HashMap::new();
    for dest in destinations {
        for month in 1..=12u32 {
            let (_, clear_ratio) = estimate_month_climate(month, dest.latitude);
            ratios.insert((dest.id.clone(), month), clear_ratio);
        }
    }
    ratios
}

/// In-memory destination catalog
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    destinations: Vec<Destination>,
    windows: Vec<SeasonWindow>,
}

impl FixtureCatalog {
    pub fn seeded() -> Self {
        Self {
            destinations: seed_destinations(),
            windows: seed_season_windows(),
        }
    }

    pub fn with_data(destinations: Vec<Destination>, windows: Vec<SeasonWindow>) -> Self {
        Self {
            destinations,
            windows,
        }
    }
}

impl DestinationCatalog for FixtureCatalog {
    fn get(&self, id: &str) -> Option<Destination> {
        self.destinations.iter().find(|d| d.id == id).cloned()
    }

    fn search(&self, query: &str) -> Vec<Destination> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.destinations.clone();
        }
        self.destinations
            .iter()
            .filter(|d| {
                d.id.contains(&needle)
                    || d.name_en.to_lowercase().contains(&needle)
                    || d.name_ja.contains(query.trim())
                    || d.country.to_lowercase().contains(&needle)
                    || d.keywords
                        .iter()
                        .any(|k| k.to_lowercase().contains(&needle) || k.contains(query.trim()))
            })
            .cloned()
            .collect()
    }

    fn list(&self) -> Vec<Destination> {
        self.destinations.clone()
    }

    fn season_windows(&self) -> Vec<SeasonWindow> {
        self.windows.clone()
    }
}

/// In-memory signal store; the forecast cache is the only mutable part
pub struct FixtureStore {
    forecast_cache: RwLock<HashMap<String, CachedForecast>>,
    rates: HashMap<String, Vec<RatePoint>>,
    crowd: HashMap<(String, u32), CrowdSignal>,
    buzz: HashMap<(String, u32), BuzzSignal>,
    clear_ratios: HashMap<(String, u32), f64>,
}

impl FixtureStore {
    pub fn seeded() -> Self {
        let destinations = seed_destinations();
        Self {
            forecast_cache: RwLock::new(HashMap::new()),
            rates: seed_rates(),
            crowd: seed_crowd(),
            buzz: seed_buzz(),
            clear_ratios: seed_clear_ratios(&destinations),
        }
    }

    /// Empty store: no signals, no baselines, no cached forecasts
    pub fn empty() -> Self {
        Self {
            forecast_cache: RwLock::new(HashMap::new()),
            rates: HashMap::new(),
            crowd: HashMap::new(),
            buzz: HashMap::new(),
            clear_ratios: HashMap::new(),
        }
    }

    /// Override the historical clear ratio for a destination and month
    pub fn set_clear_ratio(&mut self, destination_id: &str, month: u32, ratio: f64) {
        self.clear_ratios
            .insert((destination_id.to_string(), month), ratio);
    }

    /// Insert a raw cache payload, bypassing serialization. Lets tests
    /// plant unparseable entries.
    pub fn insert_raw_cache(
        &self,
        destination_id: &str,
        days: serde_json::Value,
        fetched_at: DateTime<Utc>,
    ) {
        if let Ok(mut cache) = self.forecast_cache.write() {
            cache.insert(
                destination_id.to_string(),
                CachedForecast {
                    destination_id: destination_id.to_string(),
                    days,
                    fetched_at,
                },
            );
        }
    }
}

impl SignalStore for FixtureStore {
    fn read_forecast_cache(&self, destination_id: &str) -> AppResult<Option<CachedForecast>> {
        let cache = self
            .forecast_cache
            .read()
            .map_err(|_| AppError::Internal("Forecast cache lock poisoned".to_string()))?;
        Ok(cache.get(destination_id).cloned())
    }

    fn write_forecast_cache(
        &self,
        destination_id: &str,
        days: &[ForecastDay],
        fetched_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let payload = serde_json::to_value(days)
            .map_err(|e| AppError::Internal(format!("Failed to encode forecast days: {}", e)))?;
        let mut cache = self
            .forecast_cache
            .write()
            .map_err(|_| AppError::Internal("Forecast cache lock poisoned".to_string()))?;
        cache.insert(
            destination_id.to_string(),
            CachedForecast {
                destination_id: destination_id.to_string(),
                days: payload,
                fetched_at,
            },
        );
        Ok(())
    }

    fn read_historical_clear_ratio(
        &self,
        destination_id: &str,
        month: u32,
    ) -> AppResult<Option<f64>> {
        Ok(self
            .clear_ratios
            .get(&(destination_id.to_string(), month))
            .copied())
    }

    fn read_rate_history(&self, currency_code: &str) -> AppResult<Vec<RatePoint>> {
        Ok(self.rates.get(currency_code).cloned().unwrap_or_default())
    }

    fn read_crowd_signal(&self, country_code: &str, month: u32) -> AppResult<Option<CrowdSignal>> {
        Ok(self
            .crowd
            .get(&(country_code.to_string(), month))
            .copied())
    }

    fn read_buzz_signal(
        &self,
        destination_id: &str,
        month: u32,
    ) -> AppResult<Option<BuzzSignal>> {
        Ok(self
            .buzz
            .get(&(destination_id.to_string(), month))
            .copied())
    }
}

/// Deterministic forecast generator with call counting and failure
/// injection, keyed by coordinates like the live provider.
#[derive(Clone, Default)]
pub struct FixtureForecastProvider {
    fetch_count: Arc<AtomicUsize>,
    failing: Arc<RwLock<Vec<(f64, f64)>>>,
}

impl FixtureForecastProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Make fetches for these coordinates fail with `UpstreamUnavailable`
    pub fn set_failing(&self, latitude: f64, longitude: f64) {
        if let Ok(mut failing) = self.failing.write() {
            failing.push((latitude, longitude));
        }
    }

    pub fn fetch_daily(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> AppResult<Vec<ForecastDay>> {
        let is_failing = self
            .failing
            .read()
            .map(|f| f.iter().any(|(la, lo)| *la == latitude && *lo == longitude))
            .unwrap_or(false);
        if is_failing {
            return Err(AppError::UpstreamUnavailable(
                "Fixture provider configured to fail".to_string(),
            ));
        }

        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        let start = Utc::now().date_naive();
        let (base_temp, _) = estimate_month_climate(start.month(), latitude);
        let seed = ((latitude * 10.0).round().abs() + (longitude * 10.0).round().abs()) as i64;

        // Codes cycle through clear, cloudy, and rainy days
        const CODES: [u8; 7] = [0, 1, 2, 3, 61, 2, 3];
        let forecast = (0..days as i64)
            .map(|i| {
                let code = CODES[((seed + i).rem_euclid(7)) as usize];
                let precipitation = if code >= 51 { 6.5 } else { 0.0 };
                ForecastDay::from_raw(
                    start + Duration::days(i),
                    base_temp + 4.0 + (i % 3) as f64 * 0.5,
                    base_temp - 4.0 - (i % 2) as f64,
                    precipitation,
                    code,
                )
            })
            .collect();
        Ok(forecast)
    }
}
