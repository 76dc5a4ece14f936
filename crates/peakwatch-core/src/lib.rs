//! # Peakwatch Core
//!
//! Quote fetching, drawdown math and terminal rendering for a sector-grouped
//! equity watchlist.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance) |
//! | [`config`] | Watchlist configuration (TOML) |
//! | [`data_source`] | `QuoteProvider` trait and provider errors |
//! | [`domain`] | Symbols, provider snapshots and `TickerRecord` |
//! | [`error`] | Core error types |
//! | [`fetcher`] | Per-field fallback retrieval |
//! | [`formatter`] | Summary rendering and color classification |
//! | [`http_client`] | HTTP client abstraction |
//! | [`pacing`] | Pause between ticker fetches |
//! | [`watchlist`] | Sequential run over a sector table |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use peakwatch_core::{
//!     FixedDelay, Palette, QuoteFetcher, ReqwestHttpClient, SummaryFormatter,
//!     WatchlistConfig, WatchlistRunner, YahooProvider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let provider = YahooProvider::new(Arc::new(ReqwestHttpClient::new()));
//!     let config = WatchlistConfig::builtin();
//!     let runner = WatchlistRunner::new(
//!         QuoteFetcher::new(Arc::new(provider)),
//!         SummaryFormatter::new(Palette::ansi()),
//!         Arc::new(FixedDelay::new(config.request_delay())),
//!     );
//!
//!     runner.run(&config.tickers, &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ WatchlistRunner │────▶│ Pacer            │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ QuoteFetcher    │────▶│ SummaryFormatter │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ QuoteProvider   │
//! │ (Yahoo adapter) │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ HTTP Client     │
//! │ (reqwest)       │
//! └─────────────────┘
//! ```

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod formatter;
pub mod http_client;
pub mod pacing;
pub mod watchlist;

// Adapter implementations
pub use adapters::YahooProvider;

// Configuration
pub use config::{ConfigError, SectorGroup, SectorTable, WatchlistConfig};

// Provider trait and types
pub use data_source::{ProviderFuture, QuoteProvider, SourceError, SourceErrorKind};

// Domain models
pub use domain::{
    drawdown_pct, round_cents, usable_price, DailyHistory, FastQuote, QuoteInfo, Symbol,
    TickerRecord, NOT_AVAILABLE,
};

// Error types
pub use error::{FetchError, ValidationError};

// Fetching and rendering
pub use fetcher::{failure_line, QuoteFetcher, HISTORY_TIMEOUT_MS};
pub use formatter::{Palette, SummaryFormatter, Tone};

// HTTP client types
pub use http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Pacing and the run loop
pub use pacing::{FixedDelay, Pacer, DEFAULT_REQUEST_DELAY_MS};
pub use watchlist::{RunSummary, WatchlistRunner};
