//! # Domain Models
//!
//! Value types shared by the fetcher, the formatter and provider adapters.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`FastQuote`] | Last price and 52-week high from the low-latency path |
//! | [`DailyHistory`] | Recent daily closes |
//! | [`QuoteInfo`] | Instrument metadata (name, prices, change) |
//! | [`TickerRecord`] | Best-effort per-ticker snapshot with derived drawdown |
//!
//! Provider snapshots drop NaN, infinite and zero prices at construction, so
//! every `Some` price downstream is usable as-is.

mod models;
mod record;
mod symbol;

pub use models::{usable_price, DailyHistory, FastQuote, QuoteInfo};
pub use record::{drawdown_pct, round_cents, TickerRecord, NOT_AVAILABLE};
pub use symbol::Symbol;
