// HTTP request handlers
use crate::domain::marquee::SelectionSet;
use crate::infrastructure::event_stream::sse_from_watch;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::dto::{
    MarqueeResponse, SelectionQuery, SnapshotResponse, selection_query,
};
use crate::presentation::error::ApiError;
use crate::presentation::view::{PageContext, render_page};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dashboard page
pub async fn dashboard_page(
    Query(query): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let snapshot = state.sync_service.current();
    let marquee = MarqueeResponse::new(&snapshot, &query.selection());
    let weather = state.weather_service.current().await;

    let page = render_page(&PageContext {
        title: &state.title,
        snapshot: &snapshot,
        marquee: &marquee,
        weather: weather.as_ref(),
    });
    Html(page.into_string())
}

/// Refresh from the page form, then return to the dashboard with the same feeds selected
pub async fn refresh_page(
    Query(query): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> Redirect {
    state.sync_service.refresh().await;
    Redirect::to(&dashboard_location(&query.selection()))
}

fn dashboard_location(selection: &SelectionSet) -> String {
    format!("/?{}", selection_query(selection))
}

/// Current snapshot with presented tiles
pub async fn get_snapshot(
    Query(query): Query<SelectionQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let snapshot = state.sync_service.current();
    let body = SnapshotResponse::new(&snapshot, &query.selection());
    respond(&body, &headers).await
}

/// Trigger a sync and return the snapshot it produced
pub async fn refresh_snapshot(
    Query(query): Query<SelectionQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let snapshot = state.sync_service.refresh().await;
    let body = SnapshotResponse::new(&snapshot, &query.selection());
    respond(&body, &headers).await
}

/// Composed marquee text for a feed selection
pub async fn get_marquee(
    Query(query): Query<SelectionQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let snapshot = state.sync_service.current();
    let body = MarqueeResponse::new(&snapshot, &query.selection());
    respond(&body, &headers).await
}

/// Current weather for the header strip
pub async fn get_weather(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    if !state.weather_service.is_enabled() {
        return Err(ApiError::NotConfigured("weather"));
    }

    let reading = state
        .weather_service
        .current()
        .await
        .ok_or_else(|| ApiError::Upstream("weather lookup failed".to_string()))?;
    Ok(respond(&reading, &headers).await)
}

/// Snapshot events, one per published swap. The selection is fixed for the
/// lifetime of the stream.
pub async fn snapshot_events(
    Query(query): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let selection: SelectionSet = query.selection();
    sse_from_watch(state.sync_service.subscribe(), "snapshot", move |snapshot| {
        SnapshotResponse::new(snapshot, &selection)
    })
}

async fn respond<T: serde::Serialize>(body: &T, headers: &HeaderMap) -> Response {
    match json_response(body, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
