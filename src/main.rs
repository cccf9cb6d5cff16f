// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::sheet_repository::SheetRepository;
use crate::application::sync_service::SyncService;
use crate::application::weather_service::WeatherService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::open_meteo_repository::OpenMeteoRepository;
use crate::infrastructure::sheets_repository::SheetsRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_page, get_marquee, get_snapshot, get_weather, health_check, refresh_page,
    refresh_snapshot, snapshot_events,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load dashboard configuration")?;

    // Create repositories (infrastructure layer)
    let sheets: Arc<dyn SheetRepository> = Arc::new(SheetsRepository::new(
        config.sheet.base_url,
        config.sheet.spreadsheet_id,
        config.sheet.range,
        config.sheet.api_key,
    ));

    // Create services (application layer)
    let sync_service = SyncService::new(sheets, config.sync.on_failure);

    let weather_service = if config.weather.enabled {
        let timeout = Duration::from_secs(config.weather.timeout_secs);
        let weather = OpenMeteoRepository::new(
            config.weather.base_url,
            config.weather.latitude,
            config.weather.longitude,
            timeout,
        )?;
        WeatherService::new(
            Arc::new(weather),
            timeout,
            Duration::from_secs(config.weather.cache_ttl_secs),
        )
    } else {
        WeatherService::disabled()
    };

    // First sync happens once, at startup; later ones only on request
    let initial_sync = sync_service.clone();
    tokio::spawn(async move {
        initial_sync.refresh().await;
    });

    // Create application state
    let state = Arc::new(AppState {
        title: config.branding.title,
        sync_service,
        weather_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(dashboard_page))
        .route("/refresh", post(refresh_page))
        .route("/api/snapshot", get(get_snapshot))
        .route("/api/refresh", post(refresh_snapshot))
        .route("/api/marquee", get(get_marquee))
        .route("/api/weather", get(get_weather))
        .route("/api/events", get(snapshot_events))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting venue-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
