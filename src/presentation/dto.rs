// Response bodies and query parameters
use crate::domain::kpi::TileView;
use crate::domain::marquee::{FeedKind, FeedSet, SelectionSet, compose};
use crate::domain::snapshot::{SyncSnapshot, SyncStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub status: SyncStatus,
    pub message: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub generation: u64,
    pub tiles: Vec<TileView>,
    pub speed_control: Option<f64>,
    pub feeds: FeedSet,
    pub marquee: MarqueeResponse,
}

impl SnapshotResponse {
    pub fn new(snapshot: &SyncSnapshot, selection: &SelectionSet) -> Self {
        Self {
            status: snapshot.status,
            message: snapshot.message.clone(),
            updated_at: snapshot.updated_at,
            last_success_at: snapshot.last_success_at,
            generation: snapshot.generation,
            tiles: snapshot.tile_views(),
            speed_control: snapshot.speed_control,
            feeds: snapshot.feeds.clone(),
            marquee: MarqueeResponse::new(snapshot, selection),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MarqueeResponse {
    pub text: String,
    pub loop_seconds: f64,
    pub selection: SelectionSet,
}

impl MarqueeResponse {
    pub fn new(snapshot: &SyncSnapshot, selection: &SelectionSet) -> Self {
        Self {
            text: compose(&snapshot.feeds, selection),
            loop_seconds: snapshot.loop_seconds,
            selection: *selection,
        }
    }
}

/// Feed selection carried in the query string.
///
/// API callers pass explicit flags (`?news=false`); anything left out stays
/// selected. The page form adds `sel=1` and only submits checked boxes, so in
/// that mode a missing flag means unselected.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub sel: Option<String>,
    pub questions: Option<String>,
    pub reviews: Option<String>,
    pub banking: Option<String>,
    pub social: Option<String>,
    pub news: Option<String>,
}

impl SelectionQuery {
    pub fn selection(&self) -> SelectionSet {
        let form_mode = self.sel.is_some();
        FeedKind::ALL
            .iter()
            .fold(SelectionSet::default(), |selection, kind| {
                let selected = match self.flag(*kind) {
                    Some(raw) => is_truthy(raw),
                    None => !form_mode,
                };
                selection.with(*kind, selected)
            })
    }

    fn flag(&self, kind: FeedKind) -> Option<&str> {
        match kind {
            FeedKind::Questions => self.questions.as_deref(),
            FeedKind::Reviews => self.reviews.as_deref(),
            FeedKind::Banking => self.banking.as_deref(),
            FeedKind::Social => self.social.as_deref(),
            FeedKind::News => self.news.as_deref(),
        }
    }
}

/// Form-mode query string for a selection, e.g. `sel=1&news=on`
pub fn selection_query(selection: &SelectionSet) -> String {
    let mut query = String::from("sel=1");
    for kind in FeedKind::ALL {
        if selection.is_selected(kind) {
            query.push('&');
            query.push_str(kind.key());
            query.push_str("=on");
        }
    }
    query
}

fn is_truthy(raw: &str) -> bool {
    !["false", "0", "off", "no"]
        .iter()
        .any(|falsy| raw.trim().eq_ignore_ascii_case(falsy))
}
