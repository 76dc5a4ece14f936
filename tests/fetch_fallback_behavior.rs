//! Behavior-driven tests for per-field fallback in the quote fetcher
//!
//! These tests verify HOW each field falls back across retrieval paths, and
//! that a failing path never takes another field down with it.

mod support;

use std::sync::Arc;

use peakwatch_core::{
    DailyHistory, FastQuote, FetchError, QuoteFetcher, QuoteInfo, SourceError,
    TickerRecord, HISTORY_TIMEOUT_MS, NOT_AVAILABLE,
};
use support::{EventLog, FakeProvider, ScriptedTicker};

fn fetcher(provider: FakeProvider) -> QuoteFetcher {
    QuoteFetcher::new(Arc::new(provider))
}

fn info(name: Option<&str>, current: Option<f64>, regular: Option<f64>) -> QuoteInfo {
    QuoteInfo {
        short_name: name.map(str::to_owned),
        current_price: current,
        regular_market_price: regular,
        fifty_two_week_high: None,
        regular_market_change_percent: None,
    }
}

// =============================================================================
// Current price
// =============================================================================

#[tokio::test]
async fn when_fast_quote_has_a_price_system_skips_the_history_lookup() {
    // Given: A ticker whose fast quote carries price and high
    let log = EventLog::default();
    let provider = FakeProvider::new(log.clone())
        .with_ticker("AAPL", ScriptedTicker::complete("Apple Inc.", 150.0, 200.0, -1.5));

    // When: The ticker is fetched
    let record = fetcher(provider).fetch("AAPL").await;

    // Then: The fast quote wins and the history path is never called
    assert_eq!(record.current_price, Some(150.0));
    assert_eq!(log.count("daily_history:"), 0);
    assert_eq!(log.count("fast_quote:"), 1);
}

#[tokio::test]
async fn when_fast_quote_has_no_price_system_uses_last_daily_close() {
    // Given: A fast quote without a price and a one-day history
    let log = EventLog::default();
    let provider = FakeProvider::new(log.clone()).with_ticker(
        "MSFT",
        ScriptedTicker::complete("Microsoft", 400.0, 450.0, 0.5)
            .with_fast_quote(Ok(FastQuote::new(None, Some(450.0))))
            .with_daily_history(Ok(DailyHistory::new(vec![398.0, 401.25]))),
    );

    // When: The ticker is fetched
    let record = fetcher(provider).fetch("MSFT").await;

    // Then: The most recent close is used, requested with the history timeout
    assert_eq!(record.current_price, Some(401.25));
    assert!(log
        .events()
        .contains(&format!("daily_history:MSFT:{HISTORY_TIMEOUT_MS}")));
}

#[tokio::test]
async fn when_fast_quote_and_history_fail_system_uses_metadata_price() {
    // Given: Only the metadata path answers
    let log = EventLog::default();
    let provider = FakeProvider::new(log.clone()).with_ticker(
        "NVDA",
        ScriptedTicker::failing().with_info(Ok(info(Some("NVIDIA"), Some(120.0), Some(119.0)))),
    );

    // When: The ticker is fetched
    let record = fetcher(provider).fetch("NVDA").await;

    // Then: currentPrice is taken from metadata and metadata is fetched only once
    assert_eq!(record.current_price, Some(120.0));
    assert_eq!(record.display_name, "NVIDIA");
    assert_eq!(log.count("info:"), 1);
}

#[tokio::test]
async fn when_metadata_current_price_is_zero_system_uses_regular_market_price() {
    // Given: A zero currentPrice, which is not a usable price
    let provider = FakeProvider::new(EventLog::default()).with_ticker(
        "ORCL",
        ScriptedTicker::failing().with_info(Ok(info(None, Some(0.0), Some(171.3)))),
    );

    // When: The ticker is fetched
    let record = fetcher(provider).fetch("ORCL").await;

    // Then: regularMarketPrice fills in
    assert_eq!(record.current_price, Some(171.3));
}

#[tokio::test]
async fn when_every_price_is_nan_or_zero_system_leaves_price_absent() {
    // Given: Unusable values on every price path
    let provider = FakeProvider::new(EventLog::default()).with_ticker(
        "AMD",
        ScriptedTicker::failing()
            .with_fast_quote(Ok(FastQuote {
                last_price: Some(f64::NAN),
                year_high: Some(f64::INFINITY),
            }))
            .with_daily_history(Ok(DailyHistory::new(vec![0.0])))
            .with_info(Ok(info(None, Some(f64::NAN), None))),
    );

    // When: The ticker is fetched
    let record = fetcher(provider).fetch("AMD").await;

    // Then: Price and high stay absent, so no drawdown is derived
    assert_eq!(record.current_price, None);
    assert_eq!(record.year_high, None);
    assert_eq!(record.drawdown_text(), NOT_AVAILABLE);
}

// =============================================================================
// 52-week high, name and daily change
// =============================================================================

#[tokio::test]
async fn when_fast_quote_fails_system_takes_high_from_metadata() {
    // Given: A failing fast quote and a metadata 52-week high
    let provider = FakeProvider::new(EventLog::default()).with_ticker(
        "PLTR",
        ScriptedTicker::failing()
            .with_daily_history(Ok(DailyHistory::new(vec![90.0])))
            .with_info(Ok(QuoteInfo {
                fifty_two_week_high: Some(100.0),
                ..QuoteInfo::default()
            })),
    );

    // When: The ticker is fetched
    let record = fetcher(provider).fetch("PLTR").await;

    // Then: Drawdown is derived from the history price and metadata high
    assert_eq!(record.current_price, Some(90.0));
    assert_eq!(record.year_high, Some(100.0));
    assert_eq!(record.drawdown_text(), "-10.0%");
}

#[tokio::test]
async fn when_metadata_fails_system_keeps_fast_quote_fields() {
    // Given: Fast quote data but a failing metadata call
    let provider = FakeProvider::new(EventLog::default()).with_ticker(
        "META",
        ScriptedTicker::complete("Meta", 500.0, 550.0, 1.0)
            .with_info(Err(SourceError::unauthorized("crumb rejected"))),
    );

    // When: The ticker is fetched
    let record = fetcher(provider).fetch("META").await;

    // Then: Name and change fall back to sentinels; price fields survive
    assert_eq!(record.display_name, NOT_AVAILABLE);
    assert_eq!(record.daily_change_text(), NOT_AVAILABLE);
    assert_eq!(record.current_price, Some(500.0));
    assert_eq!(record.year_high, Some(550.0));
    assert_eq!(record.drawdown_pct, Some(9.09));
}

#[tokio::test]
async fn when_daily_change_is_zero_system_keeps_it() {
    // Given: Metadata reporting an unchanged session
    let provider = FakeProvider::new(EventLog::default())
        .with_ticker("WMT", ScriptedTicker::complete("Walmart", 90.0, 100.0, 0.0));

    // When: The ticker is fetched
    let record = fetcher(provider).fetch("WMT").await;

    // Then: Zero is a real value, not a missing one
    assert_eq!(record.daily_change_pct, Some(0.0));
    assert_eq!(record.daily_change_text(), "0.0%");
}

#[tokio::test]
async fn when_short_name_is_blank_system_uses_sentinel_name() {
    // Given: A whitespace-only shortName
    let provider = FakeProvider::new(EventLog::default()).with_ticker(
        "WM",
        ScriptedTicker::complete("   ", 200.0, 230.0, 0.3),
    );

    // When: The ticker is fetched
    let record = fetcher(provider).fetch("WM").await;

    // Then: The name renders as N/A
    assert_eq!(record.display_name, NOT_AVAILABLE);
}

// =============================================================================
// Total failures
// =============================================================================

#[tokio::test]
async fn when_every_path_fails_system_still_returns_a_record() {
    // Given: A symbol the provider knows nothing about
    let log = EventLog::default();
    let provider = FakeProvider::new(log.clone());

    // When: The ticker is fetched
    let result = fetcher(provider).try_fetch("ZZZZ").await;

    // Then: Field failures are not a total failure
    let record = result.expect("field failures degrade fields only");
    assert_eq!(record, TickerRecord::unavailable());
    assert_eq!(log.count("fast_quote:"), 1);
    assert_eq!(log.count("daily_history:"), 1);
    assert_eq!(log.count("info:"), 1);
}

#[tokio::test]
async fn when_ticker_is_malformed_system_reports_total_failure_without_calls() {
    // Given: A ticker with inner whitespace, which no exchange lists
    let log = EventLog::default();
    let fetcher = fetcher(FakeProvider::new(log.clone()));

    // When: The ticker is fetched both ways
    let error = fetcher.try_fetch("BRK B").await.expect_err("malformed ticker");
    let record = fetcher.fetch("BRK B").await;

    // Then: The error names the ticker and no provider call is made
    assert!(matches!(error, FetchError::InvalidSymbol { ref ticker, .. } if ticker == "BRK B"));
    assert_eq!(record, TickerRecord::unavailable());
    assert!(log.events().is_empty());
}

#[tokio::test]
async fn when_ticker_has_a_leading_digit_system_queries_it() {
    // Given: A Korea Exchange listing and an exchange-suffixed Hong Kong code
    let log = EventLog::default();
    let provider = FakeProvider::new(log.clone()).with_ticker(
        "005930.KS",
        ScriptedTicker::complete("Samsung Electronics", 56_000.0, 80_000.0, -0.4),
    );
    let fetcher = fetcher(provider);

    // When: Both tickers are fetched
    let samsung = fetcher.try_fetch("005930.KS").await.expect("numeric symbols are valid");
    let tencent = fetcher.try_fetch("0700.hk").await.expect("numeric symbols are valid");

    // Then: Both reach the provider; only the scripted one has data
    assert_eq!(samsung.display_name, "Samsung Electronics");
    assert_eq!(samsung.drawdown_pct, Some(30.0));
    assert_eq!(tencent, TickerRecord::unavailable());
    assert_eq!(log.count("info:005930.KS"), 1);
    assert_eq!(log.count("info:0700.HK"), 1);
}
