//! Best-effort per-ticker retrieval.
//!
//! Each field walks an ordered list of sources and keeps the first usable
//! value. A failing source is logged and skipped; it never aborts another
//! source or another field.
//!
//! | Field | Sources, in order |
//! |-------|-------------------|
//! | name | metadata `shortName` |
//! | current price | fast quote, last daily close, metadata price |
//! | 52-week high | fast quote, metadata `fiftyTwoWeekHigh` |
//! | daily change | metadata `regularMarketChangePercent` |

use std::sync::Arc;

use tracing::{debug, warn};

use crate::data_source::{QuoteProvider, SourceError};
use crate::error::FetchError;
use crate::{usable_price, FastQuote, QuoteInfo, Symbol, TickerRecord};

/// Timeout for the one-day history lookup.
pub const HISTORY_TIMEOUT_MS: u64 = 10_000;

/// Error text kept in the per-ticker diagnostic line.
pub const FAILURE_DETAIL_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriceSource {
    FastQuote,
    DailyClose,
    Metadata,
}

const PRICE_SOURCES: [PriceSource; 3] = [
    PriceSource::FastQuote,
    PriceSource::DailyClose,
    PriceSource::Metadata,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HighSource {
    FastQuote,
    Metadata,
}

const HIGH_SOURCES: [HighSource; 2] = [HighSource::FastQuote, HighSource::Metadata];

/// Builds a [`TickerRecord`] for one ticker from a [`QuoteProvider`].
#[derive(Clone)]
pub struct QuoteFetcher {
    provider: Arc<dyn QuoteProvider>,
    history_timeout_ms: u64,
}

impl QuoteFetcher {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            provider,
            history_timeout_ms: HISTORY_TIMEOUT_MS,
        }
    }

    pub fn with_history_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.history_timeout_ms = timeout_ms;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Never fails; a total failure yields [`TickerRecord::unavailable`].
    pub async fn fetch(&self, ticker: &str) -> TickerRecord {
        self.try_fetch(ticker)
            .await
            .unwrap_or_else(|_| TickerRecord::unavailable())
    }

    /// Like [`QuoteFetcher::fetch`], but reports why a ticker could not be
    /// queried at all.
    pub async fn try_fetch(&self, ticker: &str) -> Result<TickerRecord, FetchError> {
        let symbol = Symbol::parse(ticker).map_err(|source| {
            warn!(ticker, error = %source, "ticker rejected before fetching");
            FetchError::InvalidSymbol {
                ticker: ticker.to_owned(),
                source,
            }
        })?;

        let mut lookups = TickerLookups::new(self.provider.as_ref(), &symbol, self.history_timeout_ms);

        let display_name = lookups
            .info()
            .await
            .and_then(QuoteInfo::display_name)
            .map(str::to_owned);
        let current_price = lookups.current_price().await;
        let year_high = lookups.year_high().await;
        let daily_change = lookups.info().await.and_then(QuoteInfo::change_percent);

        debug!(
            symbol = %symbol,
            price = ?current_price,
            high = ?year_high,
            change = ?daily_change,
            "ticker fetched"
        );

        Ok(TickerRecord::new(
            display_name,
            current_price,
            year_high,
            daily_change,
        ))
    }
}

/// Diagnostic line printed in place of a ticker that could not be queried.
pub fn failure_line(ticker: &str, error: &FetchError) -> String {
    let detail = error.to_string();
    let head = detail.chars().take(FAILURE_DETAIL_CHARS).collect::<String>();
    format!("  {ticker} data fetch failed: {head}...")
}

/// Per-ticker provider responses, each requested at most once.
struct TickerLookups<'a> {
    provider: &'a dyn QuoteProvider,
    symbol: &'a Symbol,
    history_timeout_ms: u64,
    fast_quote: Option<Option<FastQuote>>,
    info: Option<Option<QuoteInfo>>,
}

impl<'a> TickerLookups<'a> {
    fn new(provider: &'a dyn QuoteProvider, symbol: &'a Symbol, history_timeout_ms: u64) -> Self {
        Self {
            provider,
            symbol,
            history_timeout_ms,
            fast_quote: None,
            info: None,
        }
    }

    async fn fast_quote(&mut self) -> Option<&FastQuote> {
        if self.fast_quote.is_none() {
            let result = self.provider.fast_quote(self.symbol).await;
            self.fast_quote = Some(self.settle("fast_quote", result));
        }
        self.fast_quote.as_ref().and_then(Option::as_ref)
    }

    async fn info(&mut self) -> Option<&QuoteInfo> {
        if self.info.is_none() {
            let result = self.provider.info(self.symbol).await;
            self.info = Some(self.settle("info", result));
        }
        self.info.as_ref().and_then(Option::as_ref)
    }

    async fn daily_close(&mut self) -> Option<f64> {
        let result = self
            .provider
            .daily_history(self.symbol, self.history_timeout_ms)
            .await;
        self.settle("daily_history", result)
            .and_then(|history| history.last_close())
    }

    async fn current_price(&mut self) -> Option<f64> {
        for source in PRICE_SOURCES {
            let price = match source {
                PriceSource::FastQuote => {
                    self.fast_quote().await.and_then(|quote| usable_price(quote.last_price))
                }
                PriceSource::DailyClose => self.daily_close().await,
                PriceSource::Metadata => self.info().await.and_then(QuoteInfo::market_price),
            };
            if price.is_some() {
                return price;
            }
            debug!(symbol = %self.symbol, ?source, "no usable price from source");
        }
        None
    }

    async fn year_high(&mut self) -> Option<f64> {
        for source in HIGH_SOURCES {
            let high = match source {
                HighSource::FastQuote => {
                    self.fast_quote().await.and_then(|quote| usable_price(quote.year_high))
                }
                HighSource::Metadata => self.info().await.and_then(QuoteInfo::year_high),
            };
            if high.is_some() {
                return high;
            }
            debug!(symbol = %self.symbol, ?source, "no usable 52-week high from source");
        }
        None
    }

    fn settle<T>(&self, path: &'static str, result: Result<T, SourceError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                debug!(
                    symbol = %self.symbol,
                    provider = self.provider.name(),
                    path,
                    code = error.code(),
                    error = %error.message(),
                    "retrieval path failed"
                );
                None
            }
        }
    }
}
