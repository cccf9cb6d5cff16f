// Sync snapshot domain model
use super::kpi::{KpiTile, TileView};
use super::marquee::{FeedSet, loop_seconds};
use super::sheet_layout::{SheetData, TILE_COUNT};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Idle,
    Loading,
    Ok,
    Error,
}

/// One complete sync result. Replaced whole, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSnapshot {
    pub tiles: Vec<KpiTile>,
    pub feeds: FeedSet,
    pub speed_control: Option<f64>,
    pub loop_seconds: f64,
    pub status: SyncStatus,
    pub message: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub generation: u64,
}

impl SyncSnapshot {
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            tiles: (0..TILE_COUNT).map(KpiTile::empty).collect(),
            feeds: FeedSet::default(),
            speed_control: None,
            loop_seconds: loop_seconds(None),
            status: SyncStatus::Idle,
            message: None,
            updated_at: now,
            last_success_at: None,
            generation: 0,
        }
    }

    /// Fresh data from a successful fetch
    pub fn from_sheet(data: SheetData, generation: u64, now: DateTime<Utc>) -> Self {
        Self {
            loop_seconds: loop_seconds(data.speed_control),
            tiles: data.tiles,
            feeds: data.feeds,
            speed_control: data.speed_control,
            status: SyncStatus::Ok,
            message: None,
            updated_at: now,
            last_success_at: Some(now),
            generation,
        }
    }

    /// Same values, now waiting on a fetch
    pub fn loading(&self, generation: u64, now: DateTime<Utc>) -> Self {
        Self {
            status: SyncStatus::Loading,
            message: None,
            updated_at: now,
            generation,
            ..self.clone()
        }
    }

    /// Failed fetch that leaves the displayed values in place
    pub fn failed_retaining(&self, message: String, generation: u64, now: DateTime<Utc>) -> Self {
        Self {
            status: SyncStatus::Error,
            message: Some(message),
            updated_at: now,
            generation,
            ..self.clone()
        }
    }

    /// Failed fetch that blanks every tile and feed
    pub fn failed_resetting(&self, message: String, generation: u64, now: DateTime<Utc>) -> Self {
        Self {
            tiles: self.tiles.iter().map(KpiTile::blanked).collect(),
            feeds: FeedSet::default(),
            speed_control: None,
            loop_seconds: loop_seconds(None),
            status: SyncStatus::Error,
            message: Some(message),
            updated_at: now,
            last_success_at: self.last_success_at,
            generation,
        }
    }

    pub fn tile_views(&self) -> Vec<TileView> {
        self.tiles.iter().map(KpiTile::present).collect()
    }
}
