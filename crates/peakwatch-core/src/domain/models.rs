/// Lightweight quote fields served by the low-latency path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FastQuote {
    pub last_price: Option<f64>,
    pub year_high: Option<f64>,
}

impl FastQuote {
    pub fn new(last_price: Option<f64>, year_high: Option<f64>) -> Self {
        Self {
            last_price: usable_price(last_price),
            year_high: usable_price(year_high),
        }
    }
}

/// Daily closes for a short lookback window, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyHistory {
    pub closes: Vec<f64>,
}

impl DailyHistory {
    pub fn new(closes: Vec<f64>) -> Self {
        Self { closes }
    }

    pub fn last_close(&self) -> Option<f64> {
        usable_price(self.closes.last().copied())
    }
}

/// Metadata record for a single instrument. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteInfo {
    pub short_name: Option<String>,
    pub current_price: Option<f64>,
    pub regular_market_price: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub regular_market_change_percent: Option<f64>,
}

impl QuoteInfo {
    pub fn display_name(&self) -> Option<&str> {
        self.short_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// `currentPrice` when usable, otherwise `regularMarketPrice`.
    pub fn market_price(&self) -> Option<f64> {
        usable_price(self.current_price).or_else(|| usable_price(self.regular_market_price))
    }

    pub fn year_high(&self) -> Option<f64> {
        usable_price(self.fifty_two_week_high)
    }

    /// Intraday change; zero is a real value here.
    pub fn change_percent(&self) -> Option<f64> {
        self.regular_market_change_percent
            .filter(|value| value.is_finite())
    }
}

/// Drops missing, non-finite and zero prices.
pub fn usable_price(value: Option<f64>) -> Option<f64> {
    value.filter(|price| price.is_finite() && *price != 0.0)
}
