use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::debug;

use crate::data_source::{ProviderFuture, QuoteProvider, SourceError, SourceErrorKind};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::{usable_price, DailyHistory, FastQuote, QuoteInfo, Symbol};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URLS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const REFERER: &str = "https://finance.yahoo.com/";
const SESSION_TTL: Duration = Duration::from_secs(3600);

// ============================================================================
// Yahoo Session - cookie/crumb pair required by the quote endpoint
// ============================================================================

#[derive(Debug, Clone)]
struct CachedCrumb {
    value: String,
    obtained_at: Instant,
}

/// Cached crumb for Yahoo's quote endpoint.
///
/// The crumb is only valid together with the session cookie that
/// `fc.yahoo.com` sets; the cookie itself lives in the HTTP client's jar.
#[derive(Debug)]
struct YahooSession {
    crumb: Mutex<Option<CachedCrumb>>,
    ttl: Duration,
}

impl Default for YahooSession {
    fn default() -> Self {
        Self {
            crumb: Mutex::new(None),
            ttl: SESSION_TTL,
        }
    }
}

impl YahooSession {
    fn lock(&self) -> MutexGuard<'_, Option<CachedCrumb>> {
        self.crumb.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self) -> Option<String> {
        self.lock()
            .as_ref()
            .filter(|crumb| crumb.obtained_at.elapsed() < self.ttl)
            .map(|crumb| crumb.value.clone())
    }

    fn store(&self, value: &str) {
        *self.lock() = Some(CachedCrumb {
            value: value.to_owned(),
            obtained_at: Instant::now(),
        });
    }

    fn invalidate(&self) {
        *self.lock() = None;
    }
}

fn looks_like_crumb(body: &str) -> bool {
    !body.is_empty()
        && body.len() < 100
        && !body.contains(char::is_whitespace)
        && !body.contains('<')
        && !body.contains('{')
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance quote provider.
///
/// `fast_quote` and `daily_history` read the public chart endpoint; `info`
/// reads the quote endpoint, which needs a cookie/crumb session.
#[derive(Clone)]
pub struct YahooProvider {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    session: Arc<YahooSession>,
    timeout_ms: u64,
}

impl YahooProvider {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            auth: HttpAuth::None,
            session: Arc::new(YahooSession::default()),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Like [`YahooProvider::new`], honoring a `YAHOO_COOKIE` override.
    pub fn from_env(http_client: Arc<dyn HttpClient>) -> Self {
        let provider = Self::new(http_client);
        match std::env::var("YAHOO_COOKIE") {
            Ok(cookie) if !cookie.trim().is_empty() => provider.with_auth(HttpAuth::Cookie(cookie)),
            _ => provider,
        }
    }

    pub fn with_auth(mut self, auth: HttpAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Timeout for every request except the history lookup, which brings its own.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn request(&self, url: &str, timeout_ms: u64) -> HttpRequest {
        HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_auth(&self.auth)
            .with_timeout_ms(timeout_ms)
    }

    /// Sends one request and classifies the status code. Every call reaches
    /// the transport; a failure only affects the path that made it.
    async fn send(&self, request: HttpRequest) -> Result<String, SourceError> {
        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("yahoo transport error: {}", error.message()))
            }
        })?;

        match response.status {
            200..=299 => Ok(response.body),
            401 | 403 => Err(SourceError::unauthorized(format!(
                "yahoo rejected the session (status {})",
                response.status
            ))),
            404 => Err(SourceError::not_found("yahoo has no data for this symbol")),
            429 => Err(SourceError::rate_limited("yahoo returned status 429")),
            status if status >= 500 => {
                Err(SourceError::unavailable(format!("yahoo returned status {status}")))
            }
            status => Err(SourceError::invalid_request(format!(
                "yahoo returned status {status}"
            ))),
        }
    }

    /// Current crumb, establishing a session first when none is cached.
    async fn crumb(&self) -> Result<String, SourceError> {
        if let Some(crumb) = self.session.cached() {
            return Ok(crumb);
        }

        // fc.yahoo.com answers 404 but sets the session cookie; only transport errors matter.
        self.http_client
            .execute(self.request(COOKIE_URL, self.timeout_ms))
            .await
            .map_err(|e| {
                SourceError::unavailable(format!("failed to fetch Yahoo cookie: {}", e.message()))
            })?;

        for endpoint in CRUMB_URLS {
            match self
                .http_client
                .execute(self.request(endpoint, self.timeout_ms))
                .await
            {
                Ok(response) if response.status == 429 => {
                    return Err(SourceError::rate_limited(
                        "yahoo rate limited while fetching crumb",
                    ));
                }
                Ok(response) if response.is_success() => {
                    let body = response.body.trim();
                    if body.to_ascii_lowercase().contains("too many requests") {
                        return Err(SourceError::rate_limited(
                            "yahoo rate limited while fetching crumb",
                        ));
                    }
                    if looks_like_crumb(body) {
                        self.session.store(body);
                        return Ok(body.to_owned());
                    }
                }
                Ok(response) => {
                    debug!(endpoint, status = response.status, "crumb endpoint refused");
                }
                Err(error) => {
                    debug!(endpoint, error = %error, "crumb endpoint unreachable");
                }
            }
        }

        Err(SourceError::unavailable(
            "failed to fetch Yahoo crumb from all endpoints",
        ))
    }

    fn chart_url(symbol: &Symbol, range: &str) -> String {
        format!(
            "{CHART_URL}/{}?range={range}&interval=1d",
            urlencoding::encode(symbol.as_str())
        )
    }

    fn quote_url(symbol: &Symbol, crumb: &str) -> String {
        format!(
            "{QUOTE_URL}?symbols={}&crumb={}",
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(crumb)
        )
    }

    async fn fetch_chart(
        &self,
        symbol: &Symbol,
        range: &str,
        timeout_ms: u64,
    ) -> Result<YahooChartResult, SourceError> {
        let url = Self::chart_url(symbol, range);
        let body = self.send(self.request(&url, timeout_ms)).await?;
        parse_chart_response(&body)
    }

    async fn fetch_fast_quote(&self, symbol: &Symbol) -> Result<FastQuote, SourceError> {
        let chart = self.fetch_chart(symbol, "1y", self.timeout_ms).await?;

        let series_high = chart
            .indicators
            .quote
            .first()
            .and_then(|quote| {
                quote
                    .high
                    .iter()
                    .filter_map(|high| usable_price(*high))
                    .reduce(f64::max)
            });
        let year_high = usable_price(chart.meta.fifty_two_week_high).or(series_high);

        Ok(FastQuote::new(chart.meta.regular_market_price, year_high))
    }

    async fn fetch_daily_history(
        &self,
        symbol: &Symbol,
        timeout_ms: u64,
    ) -> Result<DailyHistory, SourceError> {
        let chart = self.fetch_chart(symbol, "1d", timeout_ms).await?;

        let closes = chart
            .indicators
            .quote
            .first()
            .map(|quote| {
                quote
                    .close
                    .iter()
                    .filter_map(|close| usable_price(*close))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(DailyHistory::new(closes))
    }

    /// Quote endpoint with one session refresh when the crumb is rejected.
    async fn fetch_info(&self, symbol: &Symbol) -> Result<QuoteInfo, SourceError> {
        let crumb = self.crumb().await?;
        let url = Self::quote_url(symbol, &crumb);

        let body = match self.send(self.request(&url, self.timeout_ms)).await {
            Err(error) if error.kind() == SourceErrorKind::Unauthorized => {
                debug!(symbol = %symbol, "yahoo crumb rejected; refreshing session");
                self.session.invalidate();
                let crumb = self.crumb().await?;
                let url = Self::quote_url(symbol, &crumb);
                self.send(self.request(&url, self.timeout_ms)).await?
            }
            other => other?,
        };

        parse_quote_response(&body, symbol)
    }
}

impl QuoteProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn fast_quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> ProviderFuture<'a, Result<FastQuote, SourceError>> {
        Box::pin(self.fetch_fast_quote(symbol))
    }

    fn daily_history<'a>(
        &'a self,
        symbol: &'a Symbol,
        timeout_ms: u64,
    ) -> ProviderFuture<'a, Result<DailyHistory, SourceError>> {
        Box::pin(self.fetch_daily_history(symbol, timeout_ms))
    }

    fn info<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Result<QuoteInfo, SourceError>> {
        Box::pin(self.fetch_info(symbol))
    }

}

// ============================================================================
// Yahoo Finance API response structures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct YahooApiError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

impl YahooApiError {
    fn into_source_error(self, endpoint: &str) -> SourceError {
        let detail = self.description.unwrap_or_default();
        let message = format!("yahoo {endpoint} API error: {} {detail}", self.code);
        if self.code.eq_ignore_ascii_case("not found") {
            SourceError::not_found(message.trim_end().to_owned())
        } else {
            SourceError::unavailable(message.trim_end().to_owned())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: YahooChartMeta,
    #[serde(default)]
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooChartMeta {
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    fifty_two_week_high: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResponseData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooQuoteResponseData {
    #[serde(default)]
    result: Vec<YahooQuoteData>,
    #[serde(default)]
    error: Option<YahooApiError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooQuoteData {
    symbol: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    fifty_two_week_high: Option<f64>,
    #[serde(default)]
    regular_market_change_percent: Option<f64>,
}

impl From<YahooQuoteData> for QuoteInfo {
    fn from(data: YahooQuoteData) -> Self {
        Self {
            short_name: data.short_name,
            current_price: data.current_price,
            regular_market_price: data.regular_market_price,
            fifty_two_week_high: data.fifty_two_week_high,
            regular_market_change_percent: data.regular_market_change_percent,
        }
    }
}

fn parse_chart_response(body: &str) -> Result<YahooChartResult, SourceError> {
    let response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = response.chart.error {
        return Err(error.into_source_error("chart"));
    }

    response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| SourceError::not_found("no chart data in yahoo response"))
}

fn parse_quote_response(body: &str, symbol: &Symbol) -> Result<QuoteInfo, SourceError> {
    let response: YahooQuoteResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo quote: {e}")))?;

    if let Some(error) = response.quote_response.error {
        return Err(error.into_source_error("quote"));
    }

    response
        .quote_response
        .result
        .into_iter()
        .find(|quote| quote.symbol.eq_ignore_ascii_case(symbol.as_str()))
        .map(QuoteInfo::from)
        .ok_or_else(|| SourceError::not_found(format!("yahoo returned no quote for {symbol}")))
}
