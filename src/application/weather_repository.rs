// Repository trait for current weather conditions
use crate::domain::weather::WeatherReading;
use async_trait::async_trait;

#[async_trait]
pub trait WeatherRepository: Send + Sync {
    async fn current_weather(&self) -> anyhow::Result<WeatherReading>;
}
