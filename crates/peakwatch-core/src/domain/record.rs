/// Sentinel used for any value that could not be obtained.
pub const NOT_AVAILABLE: &str = "N/A";

/// Best-effort snapshot of one ticker, built fresh for every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerRecord {
    pub display_name: String,
    pub current_price: Option<f64>,
    pub year_high: Option<f64>,
    /// Percent below the 52-week high, rounded to cents.
    pub drawdown_pct: Option<f64>,
    /// Intraday change in percent, rounded to cents.
    pub daily_change_pct: Option<f64>,
}

impl TickerRecord {
    /// Builds a record and derives the drawdown from price and high.
    pub fn new(
        display_name: Option<String>,
        current_price: Option<f64>,
        year_high: Option<f64>,
        daily_change_pct: Option<f64>,
    ) -> Self {
        let drawdown_pct = match (current_price, year_high) {
            (Some(price), Some(high)) => drawdown_pct(price, high),
            _ => None,
        };

        Self {
            display_name: display_name.unwrap_or_else(|| String::from(NOT_AVAILABLE)),
            current_price,
            year_high,
            drawdown_pct,
            daily_change_pct: daily_change_pct
                .filter(|value| value.is_finite())
                .map(round_cents),
        }
    }

    /// Record with every field missing.
    pub fn unavailable() -> Self {
        Self::new(None, None, None, None)
    }

    /// `-{value}%` or `N/A`.
    ///
    /// The minus is written unconditionally, so a price above the high
    /// shows as `--5.0%`.
    pub fn drawdown_text(&self) -> String {
        match self.drawdown_pct {
            Some(value) => format!("-{}%", decimal_text(value)),
            None => String::from(NOT_AVAILABLE),
        }
    }

    /// `{value}%` with its own sign, or `N/A`.
    pub fn daily_change_text(&self) -> String {
        match self.daily_change_pct {
            Some(value) => format!("{}%", decimal_text(value)),
            None => String::from(NOT_AVAILABLE),
        }
    }
}

/// `(high - price) / high * 100` rounded to cents; `None` unless `high > 0`.
pub fn drawdown_pct(current_price: f64, year_high: f64) -> Option<f64> {
    if year_high.is_nan() || year_high <= 0.0 {
        return None;
    }

    let rate = (year_high - current_price) / year_high * 100.0;
    rate.is_finite().then(|| round_cents(rate))
}

/// Two-decimal rounding with ties to even, so `0.125` becomes `0.12`.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Shortest round-trip form that keeps a fractional part: `25.0`, `12.35`.
pub(crate) fn decimal_text(value: f64) -> String {
    format!("{value:?}")
}
