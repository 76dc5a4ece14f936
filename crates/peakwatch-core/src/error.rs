use thiserror::Error;

/// Validation and contract errors exposed by `peakwatch-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("watchlist must contain at least one sector")]
    EmptyWatchlist,
    #[error("sector label cannot be blank")]
    BlankSectorLabel,
    #[error("sector '{sector}' has no symbols")]
    EmptySector { sector: String },
    #[error("sector '{sector}' contains a blank symbol at position {index}")]
    BlankSymbol { sector: String, index: usize },
}

/// Whole-ticker failure surfaced by [`crate::QuoteFetcher::try_fetch`]: the
/// ticker cannot be queried at all.
///
/// Upstream failures never produce one of these; they only leave fields
/// empty on the record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid ticker '{ticker}': {source}")]
    InvalidSymbol {
        ticker: String,
        #[source]
        source: ValidationError,
    },
}
