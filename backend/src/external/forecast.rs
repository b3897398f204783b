//! Forecast API client for fetching daily weather forecasts
//!
//! Integrates with an Open-Meteo compatible daily forecast endpoint. The
//! weather codes in the response follow the WMO interpretation taxonomy.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use shared::ForecastDay;

/// Forecast API client
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

/// Open-Meteo daily forecast response
#[derive(Debug, Deserialize)]
struct OMForecastResponse {
    daily: OMDaily,
}

#[derive(Debug, Deserialize)]
struct OMDaily {
    time: Vec<NaiveDate>,
    weathercode: Vec<u8>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<Option<f64>>,
}

impl ForecastClient {
    /// Create a new ForecastClient
    pub fn new(base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Fetch a fixed-length daily forecast window by GPS coordinates
    pub async fn fetch_daily(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> AppResult<Vec<ForecastDay>> {
        let url = format!(
            "{}?latitude={}&longitude={}&daily=weathercode,temperature_2m_max,temperature_2m_min,precipitation_sum&forecast_days={}&timezone=UTC",
            self.base_url, latitude, longitude, days
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Forecast request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamUnavailable(format!(
                "Forecast API error: {} - {}",
                status, body
            )));
        }

        let data: OMForecastResponse = response.json().await.map_err(|e| {
            AppError::UpstreamUnavailable(format!("Failed to parse forecast response: {}", e))
        })?;

        Ok(convert_daily_response(data))
    }
}

/// Convert the provider response to our forecast day format
fn convert_daily_response(data: OMForecastResponse) -> Vec<ForecastDay> {
    let daily = data.daily;

    daily
        .time
        .into_iter()
        .zip(daily.weathercode)
        .zip(daily.temperature_2m_max)
        .zip(daily.temperature_2m_min)
        .zip(daily.precipitation_sum)
        .map(|((((date, code), temp_max), temp_min), precipitation)| {
            ForecastDay::from_raw(
                date,
                temp_max,
                temp_min,
                precipitation.unwrap_or(0.0),
                code,
            )
        })
        .collect()
}
