// Open-Meteo repository implementation
use crate::application::weather_repository::WeatherRepository;
use crate::domain::weather::WeatherReading;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("weather response has no current conditions: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct OpenMeteoRepository {
    client: reqwest::Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: u16,
    #[serde(default = "default_is_day")]
    is_day: u8,
}

fn default_is_day() -> u8 {
    1
}

impl OpenMeteoRepository {
    pub fn new(base_url: String, latitude: f64, longitude: f64, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Open-Meteo client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            latitude,
            longitude,
        })
    }

    fn build_forecast_url(&self) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true",
            self.base_url, self.latitude, self.longitude
        )
    }
}

#[async_trait]
impl WeatherRepository for OpenMeteoRepository {
    async fn current_weather(&self) -> Result<WeatherReading> {
        let url = self.build_forecast_url();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to Open-Meteo")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Status { status, body }.into());
        }

        let body = response
            .text()
            .await
            .context("Failed to read Open-Meteo response")?;

        Ok(parse_forecast(&body)?)
    }
}

fn parse_forecast(body: &str) -> Result<WeatherReading, WeatherError> {
    let data: ForecastResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Decode(e.to_string()))?;
    let current = data.current_weather;

    Ok(WeatherReading {
        temperature_c: current.temperature,
        wind_speed_kmh: current.windspeed,
        code: current.weathercode,
        is_day: current.is_day != 0,
    })
}
