// Google Sheets values API repository implementation
use crate::application::sheet_repository::SheetRepository;
use crate::domain::sheet_layout::Rows;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("sheet request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("sheet response is not a grid: {0}")]
    Shape(String),
}

#[derive(Debug, Clone)]
pub struct SheetsRepository {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<serde_json::Value>>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

impl SheetsRepository {
    pub fn new(base_url: String, spreadsheet_id: String, range: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id,
            range,
            api_key,
        }
    }

    fn build_values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}?key={}",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.range),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl SheetRepository for SheetsRepository {
    async fn fetch_rows(&self) -> Result<Rows> {
        let url = self.build_values_url();
        tracing::debug!("Fetching sheet range {}", self.range);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to the Sheets API")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(SheetError::Status { status, message }.into());
        }

        let body = response
            .text()
            .await
            .context("Failed to read Sheets API response")?;

        Ok(parse_value_range(&body)?)
    }
}

/// Decode a `ValueRange` body into text rows
fn parse_value_range(body: &str) -> Result<Rows, SheetError> {
    let range: ValueRange =
        serde_json::from_str(body).map_err(|e| SheetError::Shape(e.to_string()))?;

    Ok(range
        .values
        .unwrap_or_default()
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

/// Formatted values arrive as strings; unformatted ones as numbers or booleans
fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        serde_json::Value::Bool(b) => b.to_string().to_uppercase(),
        other => other.to_string(),
    }
}
