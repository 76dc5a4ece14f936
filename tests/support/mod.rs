//! In-memory fakes shared by the behavior tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use peakwatch_core::{
    DailyHistory, FastQuote, HttpClient, HttpError, HttpRequest, HttpResponse,
    Pacer, ProviderFuture, QuoteInfo, QuoteProvider, SourceError, Symbol,
};

/// Shared, ordered record of provider calls and pauses.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().expect("event log should not be poisoned").push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().expect("event log should not be poisoned").clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|event| event.starts_with(prefix)).count()
    }
}

/// What the fake provider answers for one symbol on each path.
#[derive(Debug, Clone)]
pub struct ScriptedTicker {
    pub fast_quote: Result<FastQuote, SourceError>,
    pub daily_history: Result<DailyHistory, SourceError>,
    pub info: Result<QuoteInfo, SourceError>,
}

impl ScriptedTicker {
    /// Every path fails.
    pub fn failing() -> Self {
        Self {
            fast_quote: Err(SourceError::unavailable("fast quote down")),
            daily_history: Err(SourceError::unavailable("history down")),
            info: Err(SourceError::unavailable("metadata down")),
        }
    }

    /// Full data on every path.
    pub fn complete(name: &str, price: f64, high: f64, change: f64) -> Self {
        Self {
            fast_quote: Ok(FastQuote::new(Some(price), Some(high))),
            daily_history: Ok(DailyHistory::new(vec![price])),
            info: Ok(QuoteInfo {
                short_name: Some(name.to_owned()),
                current_price: Some(price),
                regular_market_price: Some(price),
                fifty_two_week_high: Some(high),
                regular_market_change_percent: Some(change),
            }),
        }
    }

    pub fn with_fast_quote(mut self, fast_quote: Result<FastQuote, SourceError>) -> Self {
        self.fast_quote = fast_quote;
        self
    }

    pub fn with_daily_history(mut self, history: Result<DailyHistory, SourceError>) -> Self {
        self.daily_history = history;
        self
    }

    pub fn with_info(mut self, info: Result<QuoteInfo, SourceError>) -> Self {
        self.info = info;
        self
    }
}

/// Provider answering from a per-symbol script and logging every call.
///
/// Unscripted symbols fail every path with `not_found`.
pub struct FakeProvider {
    tickers: HashMap<String, ScriptedTicker>,
    log: EventLog,
}

impl FakeProvider {
    pub fn new(log: EventLog) -> Self {
        Self {
            tickers: HashMap::new(),
            log,
        }
    }

    pub fn with_ticker(mut self, symbol: &str, script: ScriptedTicker) -> Self {
        self.tickers.insert(symbol.to_owned(), script);
        self
    }

    fn script(&self, symbol: &Symbol) -> Option<&ScriptedTicker> {
        self.tickers.get(symbol.as_str())
    }

    fn unknown(symbol: &Symbol) -> SourceError {
        SourceError::not_found(format!("no data for {symbol}"))
    }
}

impl QuoteProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn fast_quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> ProviderFuture<'a, Result<FastQuote, SourceError>> {
        self.log.push(format!("fast_quote:{symbol}"));
        let result = self
            .script(symbol)
            .map(|script| script.fast_quote.clone())
            .unwrap_or_else(|| Err(Self::unknown(symbol)));
        Box::pin(async move { result })
    }

    fn daily_history<'a>(
        &'a self,
        symbol: &'a Symbol,
        timeout_ms: u64,
    ) -> ProviderFuture<'a, Result<DailyHistory, SourceError>> {
        self.log.push(format!("daily_history:{symbol}:{timeout_ms}"));
        let result = self
            .script(symbol)
            .map(|script| script.daily_history.clone())
            .unwrap_or_else(|| Err(Self::unknown(symbol)));
        Box::pin(async move { result })
    }

    fn info<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Result<QuoteInfo, SourceError>> {
        self.log.push(format!("info:{symbol}"));
        let result = self
            .script(symbol)
            .map(|script| script.info.clone())
            .unwrap_or_else(|| Err(Self::unknown(symbol)));
        Box::pin(async move { result })
    }
}

/// Pacer that logs instead of sleeping.
pub struct RecordingPacer {
    log: EventLog,
}

impl RecordingPacer {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl Pacer for RecordingPacer {
    fn pause<'a>(&'a self) -> ProviderFuture<'a, ()> {
        self.log.push("pause");
        Box::pin(async {})
    }
}

/// HTTP client replying by URL substring. Each route replays its queue and
/// then repeats the last response.
pub struct SequencedHttpClient {
    routes: Vec<(String, Mutex<VecDeque<Result<HttpResponse, HttpError>>>)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl SequencedHttpClient {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn route(
        mut self,
        pattern: &str,
        responses: Vec<Result<HttpResponse, HttpError>>,
    ) -> Self {
        self.routes
            .push((pattern.to_owned(), Mutex::new(responses.into_iter().collect())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub fn urls_containing(&self, pattern: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.url.contains(pattern))
            .count()
    }

    fn reply(&self, url: &str) -> Result<HttpResponse, HttpError> {
        for (pattern, queue) in &self.routes {
            if url.contains(pattern.as_str()) {
                let mut queue = queue.lock().expect("route queue should not be poisoned");
                return if queue.len() > 1 {
                    queue.pop_front().unwrap_or_else(|| Ok(HttpResponse::with_status(404, "")))
                } else {
                    queue
                        .front()
                        .cloned()
                        .unwrap_or_else(|| Ok(HttpResponse::with_status(404, "")))
                };
            }
        }
        Ok(HttpResponse::with_status(404, ""))
    }
}

impl HttpClient for SequencedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> ProviderFuture<'a, Result<HttpResponse, HttpError>> {
        let response = self.reply(&request.url);
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}

pub fn chart_body(price: Option<f64>, high: Option<f64>, highs: &[f64], closes: &[f64]) -> String {
    serde_json::json!({
        "chart": {
            "result": [{
                "meta": {
                    "regularMarketPrice": price,
                    "fiftyTwoWeekHigh": high,
                },
                "indicators": { "quote": [{ "high": highs, "close": closes }] }
            }],
            "error": null
        }
    })
    .to_string()
}

pub fn quote_body(symbol: &str, fields: serde_json::Value) -> String {
    let mut entry = fields;
    entry["symbol"] = serde_json::Value::String(symbol.to_owned());
    serde_json::json!({ "quoteResponse": { "result": [entry], "error": null } }).to_string()
}
