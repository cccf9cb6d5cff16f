// KPI tile domain model and presentation mapping
use serde::Serialize;

pub const DEFAULT_GREEN_AT: f64 = 100.0;
pub const DEFAULT_RED_AT: f64 = 0.0;

/// Placeholder shown for tiles without a value
pub const MISSING_DISPLAY: &str = "—";

const NEUTRAL_GRAY: &str = "#9ca3af";
const RAMP_SATURATION: u8 = 70;
const RAMP_LIGHTNESS: u8 = 45;
const GREEN_HUE: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Currency,
    Percent,
    Plain,
}

impl Unit {
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if token == "$"
            || token.eq_ignore_ascii_case("usd")
            || token.eq_ignore_ascii_case("dollar")
        {
            Unit::Currency
        } else if token == "%" {
            Unit::Percent
        } else {
            Unit::Plain
        }
    }
}

/// Color of a tile on the red to green ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorToken {
    Neutral,
    Ramp { hue: f64 },
}

impl ColorToken {
    pub fn hue(&self) -> Option<f64> {
        match self {
            ColorToken::Neutral => None,
            ColorToken::Ramp { hue } => Some(*hue),
        }
    }

    pub fn css(&self) -> String {
        match self {
            ColorToken::Neutral => NEUTRAL_GRAY.to_string(),
            ColorToken::Ramp { hue } => format!(
                "hsl({:.1}, {}%, {}%)",
                hue, RAMP_SATURATION, RAMP_LIGHTNESS
            ),
        }
    }
}

impl Serialize for ColorToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.css())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiTile {
    pub label: String,
    pub raw_value: String,
    pub value: Option<f64>,
    pub green_at: f64,
    pub red_at: f64,
    pub unit: Unit,
}

impl KpiTile {
    /// Tile with no data, labelled by its 0-based position
    pub fn empty(index: usize) -> Self {
        Self {
            label: Self::default_label(index),
            raw_value: String::new(),
            value: None,
            green_at: DEFAULT_GREEN_AT,
            red_at: DEFAULT_RED_AT,
            unit: Unit::Plain,
        }
    }

    pub fn default_label(index: usize) -> String {
        format!("Tile {}", index + 1)
    }

    /// Same slot with the value dropped
    pub fn blanked(&self) -> Self {
        Self {
            raw_value: String::new(),
            value: None,
            ..self.clone()
        }
    }

    pub fn color(&self) -> ColorToken {
        color_for(self.value, self.green_at, self.red_at)
    }

    pub fn display(&self) -> String {
        display_for(self.value, self.unit)
    }

    pub fn present(&self) -> TileView {
        TileView {
            label: self.label.clone(),
            raw_value: self.raw_value.clone(),
            display: self.display(),
            color: self.color(),
        }
    }
}

/// What the grid renders for one tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileView {
    pub label: String,
    pub raw_value: String,
    pub display: String,
    pub color: ColorToken,
}

/// Map a value onto the red (0°) to green (120°) hue ramp between two thresholds.
///
/// Thresholds may be inverted, in which case lower values are greener. Equal
/// thresholds pin every value to the midpoint.
pub fn color_for(value: Option<f64>, green_at: f64, red_at: f64) -> ColorToken {
    let Some(value) = value else {
        return ColorToken::Neutral;
    };

    let span = green_at - red_at;
    let t = if span == 0.0 {
        0.5
    } else {
        (value - red_at) / span
    };
    // thresholds near f64::MAX overflow the span
    let t = if t.is_nan() { 0.5 } else { t };

    ColorToken::Ramp {
        hue: t.clamp(0.0, 1.0) * GREEN_HUE,
    }
}

pub fn display_for(value: Option<f64>, unit: Unit) -> String {
    let Some(value) = value else {
        return MISSING_DISPLAY.to_string();
    };

    // f64::round is half-away-from-zero; the cast also folds -0 into 0
    let rounded = value.round() as i64;
    match unit {
        Unit::Currency => format_currency(rounded),
        Unit::Percent => format!("{}%", rounded),
        Unit::Plain => rounded.to_string(),
    }
}

fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
