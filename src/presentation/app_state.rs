// Application state for HTTP handlers
use crate::application::sync_service::SyncService;
use crate::application::weather_service::WeatherService;

#[derive(Clone)]
pub struct AppState {
    pub title: String,
    pub sync_service: SyncService,
    pub weather_service: WeatherService,
}
