// Sheet layout - which cells of the fetched window feed which widget
use super::kpi::{DEFAULT_GREEN_AT, DEFAULT_RED_AT, KpiTile, Unit};
use super::marquee::{FeedKind, FeedSet};
use super::value::parse_number;

/// A fetched rectangular window of cell text, row-major
pub type Rows = Vec<Vec<String>>;

pub const TILE_COUNT: usize = 9;

/// Source row of each tile, in tile order
pub const TILE_ROWS: [usize; TILE_COUNT] = [0, 1, 2, 3, 4, 5, 8, 9, 10];

/// Source row of each feed, in `FeedKind::ALL` order
pub const FEED_ROWS: [usize; 5] = [6, 7, 13, 14, 15];

const LABEL_COL: usize = 0;
const VALUE_COL: usize = 1;
const GREEN_COL: usize = 2;
const RED_COL: usize = 3;
const UNIT_COL: usize = 5;
const FEED_COL: usize = 1;

const SPEED_ROW: usize = 10;
const SPEED_COL: usize = 6;

/// Everything one fetch contributes to a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub tiles: Vec<KpiTile>,
    pub feeds: FeedSet,
    pub speed_control: Option<f64>,
}

impl SheetData {
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let tiles = TILE_ROWS
            .iter()
            .enumerate()
            .map(|(index, row)| read_tile(rows, index, *row))
            .collect();

        let mut feeds = FeedSet::default();
        for (kind, row) in FeedKind::ALL.iter().zip(FEED_ROWS) {
            feeds.set(*kind, cell(rows, row, FEED_COL).to_string());
        }

        Self {
            tiles,
            feeds,
            speed_control: parse_number(Some(cell(rows, SPEED_ROW, SPEED_COL))),
        }
    }
}

/// Cells outside the window read as empty
fn cell(rows: &[Vec<String>], row: usize, col: usize) -> &str {
    rows.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .unwrap_or("")
}

fn read_tile(rows: &[Vec<String>], index: usize, row: usize) -> KpiTile {
    let label = cell(rows, row, LABEL_COL).trim();
    let raw_value = cell(rows, row, VALUE_COL);

    KpiTile {
        label: if label.is_empty() {
            KpiTile::default_label(index)
        } else {
            label.to_string()
        },
        raw_value: raw_value.to_string(),
        value: parse_number(Some(raw_value)),
        green_at: parse_number(Some(cell(rows, row, GREEN_COL))).unwrap_or(DEFAULT_GREEN_AT),
        red_at: parse_number(Some(cell(rows, row, RED_COL))).unwrap_or(DEFAULT_RED_AT),
        unit: Unit::from_token(cell(rows, row, UNIT_COL)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kpi::ColorToken;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn full_window() -> Rows {
        let mut rows: Rows = (0..16).map(|_| Vec::new()).collect();
        rows[0] = row(&["Sales", "$1,234", "2000", "0", "", "$"]);
        rows[1] = row(&["Occupancy", "55.4%", "90", "40", "", "%"]);
        rows[2] = row(&["", "17"]);
        rows[6] = row(&["Questions", "Ask about private events"]);
        rows[7] = row(&["Reviews", "Best brunch in town"]);
        rows[10] = row(&["Wait", "12", "5", "30", "", "", "85"]);
        rows[13] = row(&["Banking", "Deposit due Monday"]);
        rows[14] = row(&["Social", "#venue"]);
        rows[15] = row(&["News", "Patio opens"]);
        rows
    }

    #[test]
    fn test_sales_row_end_to_end() {
        let data = SheetData::from_rows(&full_window());
        let sales = &data.tiles[0];
        assert_eq!(sales.label, "Sales");
        assert_eq!(sales.unit, Unit::Currency);

        let view = sales.present();
        assert_eq!(view.display, "$1,234");
        let hue = view.color.hue().unwrap();
        assert!((hue - 74.04).abs() < 0.01);
    }

    #[test]
    fn test_tiles_are_positional() {
        let data = SheetData::from_rows(&full_window());
        assert_eq!(data.tiles.len(), TILE_COUNT);
        assert_eq!(data.tiles[1].present().display, "55%");
        // blank label falls back to position
        assert_eq!(data.tiles[2].label, "Tile 3");
        assert_eq!(data.tiles[2].green_at, DEFAULT_GREEN_AT);
        assert_eq!(data.tiles[2].red_at, DEFAULT_RED_AT);
        // tile 9 reads row 10
        assert_eq!(data.tiles[8].label, "Wait");
        assert_eq!(data.tiles[8].value, Some(12.0));
    }

    #[test]
    fn test_feeds_and_speed() {
        let data = SheetData::from_rows(&full_window());
        assert_eq!(data.feeds.questions, "Ask about private events");
        assert_eq!(data.feeds.reviews, "Best brunch in town");
        assert_eq!(data.feeds.banking, "Deposit due Monday");
        assert_eq!(data.feeds.social, "#venue");
        assert_eq!(data.feeds.news, "Patio opens");
        assert_eq!(data.speed_control, Some(85.0));
    }

    #[test]
    fn test_short_window_reads_as_empty() {
        let rows = vec![row(&["Sales", "$10"])];
        let data = SheetData::from_rows(&rows);
        assert_eq!(data.tiles.len(), TILE_COUNT);
        assert_eq!(data.tiles[0].value, Some(10.0));
        for (index, tile) in data.tiles.iter().enumerate().skip(1) {
            assert_eq!(tile.label, KpiTile::default_label(index));
            assert_eq!(tile.color(), ColorToken::Neutral);
        }
        assert_eq!(data.feeds, FeedSet::default());
        assert_eq!(data.speed_control, None);
    }

    #[test]
    fn test_out_of_range_speed_is_kept_raw() {
        let mut rows = full_window();
        rows[10] = row(&["", "", "", "", "", "", "150"]);
        let data = SheetData::from_rows(&rows);
        assert_eq!(data.speed_control, Some(150.0));
        assert_eq!(crate::domain::marquee::loop_seconds(data.speed_control), 140.0);
    }
}
