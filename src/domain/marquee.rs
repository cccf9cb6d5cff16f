// Marquee domain model - feed composition and loop timing
use serde::Serialize;

pub const SEPARATOR: &str = "   •   ";

pub const DEFAULT_SPEED_CONTROL: f64 = 70.0;
const MIN_SPEED_CONTROL: f64 = 1.0;
const MAX_SPEED_CONTROL: f64 = 100.0;
const BASE_LOOP_SECONDS: f64 = 40.0;
const LOOP_RANGE_SECONDS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Questions,
    Reviews,
    Banking,
    Social,
    News,
}

impl FeedKind {
    /// Marquee order
    pub const ALL: [FeedKind; 5] = [
        FeedKind::Questions,
        FeedKind::Reviews,
        FeedKind::Banking,
        FeedKind::Social,
        FeedKind::News,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FeedKind::Questions => "questions",
            FeedKind::Reviews => "reviews",
            FeedKind::Banking => "banking",
            FeedKind::Social => "social",
            FeedKind::News => "news",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FeedKind::Questions => "Questions",
            FeedKind::Reviews => "Reviews",
            FeedKind::Banking => "Banking",
            FeedKind::Social => "Social",
            FeedKind::News => "News",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedSet {
    pub questions: String,
    pub reviews: String,
    pub banking: String,
    pub social: String,
    pub news: String,
}

impl FeedSet {
    pub fn get(&self, kind: FeedKind) -> &str {
        match kind {
            FeedKind::Questions => &self.questions,
            FeedKind::Reviews => &self.reviews,
            FeedKind::Banking => &self.banking,
            FeedKind::Social => &self.social,
            FeedKind::News => &self.news,
        }
    }

    pub fn set(&mut self, kind: FeedKind, text: String) {
        match kind {
            FeedKind::Questions => self.questions = text,
            FeedKind::Reviews => self.reviews = text,
            FeedKind::Banking => self.banking = text,
            FeedKind::Social => self.social = text,
            FeedKind::News => self.news = text,
        }
    }
}

/// Which feeds a viewer wants in the marquee. Lives with the view, never with the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionSet {
    pub questions: bool,
    pub reviews: bool,
    pub banking: bool,
    pub social: bool,
    pub news: bool,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::all(true)
    }
}

impl SelectionSet {
    pub fn all(selected: bool) -> Self {
        Self {
            questions: selected,
            reviews: selected,
            banking: selected,
            social: selected,
            news: selected,
        }
    }

    pub fn is_selected(&self, kind: FeedKind) -> bool {
        match kind {
            FeedKind::Questions => self.questions,
            FeedKind::Reviews => self.reviews,
            FeedKind::Banking => self.banking,
            FeedKind::Social => self.social,
            FeedKind::News => self.news,
        }
    }

    pub fn with(mut self, kind: FeedKind, selected: bool) -> Self {
        match kind {
            FeedKind::Questions => self.questions = selected,
            FeedKind::Reviews => self.reviews = selected,
            FeedKind::Banking => self.banking = selected,
            FeedKind::Social => self.social = selected,
            FeedKind::News => self.news = selected,
        }
        self
    }
}

/// Join the selected, non-blank feeds in marquee order
pub fn compose(feeds: &FeedSet, selection: &SelectionSet) -> String {
    FeedKind::ALL
        .iter()
        .filter(|kind| selection.is_selected(**kind))
        .map(|kind| feeds.get(*kind).trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Clamp a raw speed control into its working range
pub fn speed_control(control: Option<f64>) -> f64 {
    match control {
        Some(value) if value.is_finite() => value.clamp(MIN_SPEED_CONTROL, MAX_SPEED_CONTROL),
        _ => DEFAULT_SPEED_CONTROL,
    }
}

/// Seconds for one full marquee loop. Higher control values loop slower.
pub fn loop_seconds(control: Option<f64>) -> f64 {
    BASE_LOOP_SECONDS + speed_control(control) * LOOP_RANGE_SECONDS / MAX_SPEED_CONTROL
}
