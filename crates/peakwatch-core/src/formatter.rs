use colored::{Color, Colorize};

use crate::TickerRecord;

/// Rendered when the drawdown is unknown.
pub const MISSING_DRAWDOWN: &str = "-0.00%";
/// Rendered when the daily change is unknown.
pub const MISSING_CHANGE: &str = "0.00%";
/// Rendered when a price is unknown.
pub const MISSING_PRICE: &str = "$0";

/// Drawdowns at or beyond this magnitude are highlighted.
pub const HIGHLIGHT_DRAWDOWN_PCT: f64 = 10.0;

/// Display class of a value, decided from the number before it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Highlight,
    Negative,
    Neutral,
}

/// Maps tones to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub highlight: Option<Color>,
    pub negative: Option<Color>,
    pub neutral: Option<Color>,
}

impl Palette {
    /// Bright magenta drawdowns, bright red losses, bright blue otherwise.
    pub const fn ansi() -> Self {
        Self {
            highlight: Some(Color::BrightMagenta),
            negative: Some(Color::BrightRed),
            neutral: Some(Color::BrightBlue),
        }
    }

    pub const fn plain() -> Self {
        Self {
            highlight: None,
            negative: None,
            neutral: None,
        }
    }

    fn color(&self, tone: Tone) -> Option<Color> {
        match tone {
            Tone::Plain => None,
            Tone::Highlight => self.highlight,
            Tone::Negative => self.negative,
            Tone::Neutral => self.neutral,
        }
    }

    /// Wraps `text` in the tone's foreground color. The palette, not tty
    /// detection, decides whether escapes are written.
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        match self.color(tone) {
            Some(color) => {
                colored::control::set_override(true);
                text.color(color).to_string()
            }
            None => text.to_owned(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}

/// Display text with its tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub text: String,
    pub tone: Tone,
}

pub fn price_text(value: Option<f64>) -> String {
    match value {
        Some(price) => format!("${price:.2}"),
        None => String::from(MISSING_PRICE),
    }
}

pub fn drawdown_field(record: &TickerRecord) -> Field {
    match record.drawdown_pct {
        Some(value) => Field {
            text: record.drawdown_text(),
            tone: if value.abs() >= HIGHLIGHT_DRAWDOWN_PCT {
                Tone::Highlight
            } else {
                Tone::Plain
            },
        },
        None => Field {
            text: String::from(MISSING_DRAWDOWN),
            tone: Tone::Plain,
        },
    }
}

pub fn daily_change_field(record: &TickerRecord) -> Field {
    match record.daily_change_pct {
        Some(value) => Field {
            text: record.daily_change_text(),
            tone: if value < 0.0 { Tone::Negative } else { Tone::Neutral },
        },
        None => Field {
            text: String::from(MISSING_CHANGE),
            tone: Tone::Neutral,
        },
    }
}

/// Renders a [`TickerRecord`] as a header plus four labeled lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryFormatter {
    palette: Palette,
}

impl SummaryFormatter {
    pub const fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub const fn palette(&self) -> Palette {
        self.palette
    }

    pub fn format(&self, record: &TickerRecord, ticker: &str) -> String {
        let drawdown = drawdown_field(record);
        let change = daily_change_field(record);

        format!(
            "=== {ticker}({name}) ===\n\
             Current price : {price}\n\
             52-week high : {high}\n\
             Drawdown from high : {drawdown}\n\
             Daily change : {change}",
            name = record.display_name,
            price = price_text(record.current_price),
            high = price_text(record.year_high),
            drawdown = self.palette.paint(&drawdown.text, drawdown.tone),
            change = self.palette.paint(&change.text, change.tone),
        )
    }
}
