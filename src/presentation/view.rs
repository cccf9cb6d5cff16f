// Dashboard page rendering
use crate::domain::kpi::TileView;
use crate::domain::marquee::{FeedKind, SelectionSet};
use crate::domain::snapshot::{SyncSnapshot, SyncStatus};
use crate::domain::weather::WeatherReading;
use crate::presentation::dto::{MarqueeResponse, selection_query};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const PAGE_STYLE: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: #0f172a; color: #f8fafc; }
header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding: 1rem 1.5rem;
  background: #1e293b;
}
header h1 { margin: 0; font-size: 1.6rem; }
.weather { font-size: 1.1rem; opacity: 0.9; }
.grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; padding: 1.5rem; }
.tile {
  border-radius: 12px;
  padding: 1.25rem;
  min-height: 8rem;
  display: flex;
  flex-direction: column;
  justify-content: space-between;
  color: #0f172a;
}
.tile .label {
  font-size: 1rem;
  font-weight: 600;
  text-transform: uppercase;
  letter-spacing: 0.04em;
}
.tile .value { font-size: 2.6rem; font-weight: 700; }
.marquee {
  overflow: hidden;
  white-space: nowrap;
  background: #020617;
  padding: 0.75rem 0;
  font-size: 1.4rem;
}
.marquee .lane {
  display: inline-block;
  animation-name: marquee-scroll;
  animation-timing-function: linear;
  animation-iteration-count: infinite;
}
.marquee .lane span { padding-right: 4rem; }
@keyframes marquee-scroll { from { transform: translateX(0); } to { transform: translateX(-50%); } }
footer {
  display: flex;
  gap: 1.5rem;
  align-items: center;
  flex-wrap: wrap;
  padding: 1rem 1.5rem;
  font-size: 0.9rem;
  opacity: 0.85;
}
footer form { display: inline-flex; gap: 0.75rem; align-items: center; }
.status-error { color: #fca5a5; }
"#;

pub struct PageContext<'a> {
    pub title: &'a str,
    pub snapshot: &'a SyncSnapshot,
    pub marquee: &'a MarqueeResponse,
    pub weather: Option<&'a WeatherReading>,
}

pub fn render_page(context: &PageContext<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (context.title) }
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                header {
                    h1 { (context.title) }
                    @if let Some(weather) = context.weather {
                        div class="weather" title=(if weather.is_day { "day" } else { "night" }) {
                            (weather.summary())
                        }
                    }
                }
                section class="grid" {
                    @for tile in &context.snapshot.tile_views() {
                        (render_tile(tile))
                    }
                }
                (render_marquee(context.marquee))
                (render_footer(context.snapshot, &context.marquee.selection))
            }
        }
    }
}

fn render_tile(tile: &TileView) -> Markup {
    html! {
        div
            class="tile"
            style={ "background:" (tile.color.css()) }
            title=(tile.raw_value)
            data-hue=[tile.color.hue()]
        {
            div class="label" { (tile.label) }
            div class="value" { (tile.display) }
        }
    }
}

/// Two copies back to back so the lane can loop without a seam
pub fn render_marquee(marquee: &MarqueeResponse) -> Markup {
    if marquee.text.is_empty() {
        return html! {};
    }

    html! {
        div class="marquee" {
            div class="lane" style={ "animation-duration:" (marquee.loop_seconds) "s" } {
                span { (marquee.text) }
                span aria-hidden="true" { (marquee.text) }
            }
        }
    }
}

fn render_footer(snapshot: &SyncSnapshot, selection: &SelectionSet) -> Markup {
    html! {
        footer {
            span class=(status_class(snapshot.status)) {
                (status_text(snapshot))
            }
            @if let Some(synced) = snapshot.last_success_at {
                span { "Last sync " (synced.format("%Y-%m-%d %H:%M:%S UTC")) }
            }
            form method="post" action={ "/refresh?" (selection_query(selection)) } {
                button type="submit" { "Refresh" }
            }
            form method="get" action="/" {
                input type="hidden" name="sel" value="1";
                @for kind in FeedKind::ALL {
                    label {
                        input
                            type="checkbox"
                            name=(kind.key())
                            checked[selection.is_selected(kind)];
                        " " (kind.title())
                    }
                }
                button type="submit" { "Apply" }
            }
        }
    }
}

fn status_class(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::Error => "status status-error",
        _ => "status",
    }
}

fn status_text(snapshot: &SyncSnapshot) -> String {
    match (snapshot.status, &snapshot.message) {
        (SyncStatus::Idle, _) => "Waiting for first sync".to_string(),
        (SyncStatus::Loading, _) => "Syncing…".to_string(),
        (SyncStatus::Ok, _) => "Up to date".to_string(),
        (SyncStatus::Error, Some(message)) => format!("Sync failed: {}", message),
        (SyncStatus::Error, None) => "Sync failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn marquee(text: &str) -> MarqueeResponse {
        MarqueeResponse {
            text: text.to_string(),
            loop_seconds: 140.0,
            selection: SelectionSet::default(),
        }
    }

    #[test]
    fn test_empty_marquee_renders_nothing() {
        assert_eq!(render_marquee(&marquee("")).into_string(), "");
    }

    #[test]
    fn test_marquee_lane_is_doubled() {
        let html = render_marquee(&marquee("Patio opens")).into_string();
        assert_eq!(html.matches("Patio opens").count(), 2);
        assert!(html.contains("animation-duration:140s"));
    }

    #[test]
    fn test_page_renders_tiles_and_escapes() {
        let mut snapshot = SyncSnapshot::initial(Utc::now());
        snapshot.tiles[0].label = "<Sales>".to_string();
        snapshot.tiles[0].value = Some(1234.0);
        let marquee = marquee("");

        let html = render_page(&PageContext {
            title: "Main Street",
            snapshot: &snapshot,
            marquee: &marquee,
            weather: None,
        })
        .into_string();

        assert!(html.contains("&lt;Sales&gt;"));
        assert!(html.contains("Tile 9"));
        assert!(html.contains("Waiting for first sync"));
        assert!(!html.contains("class=\"marquee\""));
    }

    #[test]
    fn test_refresh_form_keeps_selection() {
        let snapshot = SyncSnapshot::initial(Utc::now());
        let marquee = MarqueeResponse {
            text: String::new(),
            loop_seconds: 110.0,
            selection: SelectionSet::all(false).with(FeedKind::News, true),
        };

        let html = render_page(&PageContext {
            title: "Main Street",
            snapshot: &snapshot,
            marquee: &marquee,
            weather: None,
        })
        .into_string();

        assert!(html.contains(r#"<form method="post" action="/refresh?sel=1&amp;news=on">"#));
        assert!(html.contains(r#"name="news" checked"#));
        assert!(!html.contains(r#"name="social" checked"#));
    }

    #[test]
    fn test_error_status_text() {
        let snapshot = SyncSnapshot::initial(Utc::now()).failed_retaining(
            "status 403".to_string(),
            1,
            Utc::now(),
        );
        assert_eq!(status_text(&snapshot), "Sync failed: status 403");
        assert_eq!(status_class(snapshot.status), "status status-error");
    }
}
