//! Quote provider trait and the error type adapters report.
//!
//! A provider exposes three independent retrieval paths per symbol. Each one
//! may fail or omit fields without affecting the others.
//!
//! | Path | Response | Description |
//! |------|----------|-------------|
//! | `fast_quote` | [`FastQuote`] | Last price and 52-week high |
//! | `daily_history` | [`DailyHistory`] | Recent daily closes |
//! | `info` | [`QuoteInfo`] | Name, prices, intraday change |
//!
//! # Example
//!
//! ```rust,ignore
//! use peakwatch_core::{QuoteProvider, Symbol, YahooProvider};
//!
//! async fn last_price(provider: &YahooProvider) -> Option<f64> {
//!     let symbol = Symbol::parse("AAPL").ok()?;
//!     provider.fast_quote(&symbol).await.ok()?.last_price
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{DailyHistory, FastQuote, QuoteInfo, Symbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    Unauthorized,
    NotFound,
    Internal,
}

/// Structured provider error for a single retrieval path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unauthorized,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Unauthorized => "source.unauthorized",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Boxed future returned by provider calls.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Upstream quote source queried one symbol at a time.
pub trait QuoteProvider: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    fn fast_quote<'a>(&'a self, symbol: &'a Symbol)
        -> ProviderFuture<'a, Result<FastQuote, SourceError>>;

    /// Recent daily bars; `timeout_ms` bounds this request only.
    fn daily_history<'a>(
        &'a self,
        symbol: &'a Symbol,
        timeout_ms: u64,
    ) -> ProviderFuture<'a, Result<DailyHistory, SourceError>>;

    fn info<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Result<QuoteInfo, SourceError>>;
}
