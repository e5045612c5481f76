use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use time::OffsetDateTime;

use crate::config::DashboardConfig;
use crate::http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, NoopHttpClient, ReqwestHttpClient,
};
use crate::market_data::{HistoryRequest, MarketDataClient, SourceError, SourceFuture};
use crate::{CalendarDate, CompanyProfile, OhlcvRecord, OhlcvSeries, RecommendationsTable, Symbol};

const QUERY_HOST: &str = "https://query2.finance.yahoo.com";
const COOKIE_ENDPOINT: &str = "https://fc.yahoo.com";
const CRUMB_ENDPOINTS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const REFERER: &str = "https://finance.yahoo.com/";
const LOGO_HOST: &str = "https://logo.clearbit.com";
const CRUMB_TTL: Duration = Duration::from_secs(3600);
const SECONDS_PER_DAY: i64 = 86_400;
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// ============================================================================
// Session crumb
// ============================================================================

/// Yahoo's quoteSummary endpoint needs a session cookie (kept by the
/// transport's cookie jar) plus a crumb token passed as a query parameter.
#[derive(Debug, Default)]
struct YahooSession {
    crumb: Mutex<Option<(String, Instant)>>,
}

impl YahooSession {
    fn cached(&self) -> Option<String> {
        let guard = self.crumb.lock().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|(_, fetched_at)| fetched_at.elapsed() < CRUMB_TTL)
            .map(|(crumb, _)| crumb.clone())
    }

    fn store(&self, crumb: &str) {
        *self.crumb.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((crumb.to_owned(), Instant::now()));
    }

    fn invalidate(&self) {
        *self.crumb.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

// ============================================================================
// Yahoo Adapter
// ============================================================================

/// Yahoo Finance client with a real HTTP mode and an offline mock mode.
///
/// The mode follows the transport: a mock transport (the default
/// [`NoopHttpClient`]) serves deterministic fixtures for the allow-listed
/// tickers and `NotFound` for anything else.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    session: Arc<YahooSession>,
    timeout_ms: u64,
    use_real_api: bool,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            auth: HttpAuth::None,
            session: Arc::new(YahooSession::default()),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            use_real_api: false,
        }
    }
}

impl YahooAdapter {
    pub fn mock() -> Self {
        Self::default()
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, auth: HttpAuth) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            auth,
            use_real_api,
            ..Self::default()
        }
    }

    /// Real client over reqwest. `YAHOO_COOKIE` replaces the session cookie
    /// when set.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built from `config`.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, HttpError> {
        let transport = ReqwestHttpClient::new(&config.user_agent)?;
        let auth = std::env::var("YAHOO_COOKIE")
            .ok()
            .filter(|cookie| !cookie.trim().is_empty())
            .map_or(HttpAuth::None, HttpAuth::Cookie);
        Ok(Self::with_http_client(Arc::new(transport), auth).with_timeout_ms(config.timeout_ms))
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub const fn is_mock(&self) -> bool {
        !self.use_real_api
    }

    fn request(&self, url: impl Into<String>) -> HttpRequest {
        HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_auth(&self.auth)
            .with_timeout_ms(self.timeout_ms)
    }
}

impl MarketDataClient for YahooAdapter {
    fn profile<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, CompanyProfile> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real_profile(symbol).await
            } else {
                mock_profile(symbol)
            }
        })
    }

    fn history<'a>(&'a self, req: HistoryRequest) -> SourceFuture<'a, OhlcvSeries> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real_history(&req).await
            } else {
                mock_history(&req)
            }
        })
    }

    fn recommendations<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> SourceFuture<'a, RecommendationsTable> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real_recommendations(symbol).await
            } else {
                mock_recommendations(symbol)
            }
        })
    }
}

// Real API implementation methods
impl YahooAdapter {
    async fn fetch_real_profile(&self, symbol: &Symbol) -> Result<CompanyProfile, SourceError> {
        let result = self.quote_summary(symbol, "assetProfile,price").await?;
        let asset = result.asset_profile.unwrap_or_default();
        let price = result.price.unwrap_or_default();

        let long_name = price
            .long_name
            .or(price.short_name)
            .unwrap_or_else(|| symbol.to_string());
        let logo_url = asset
            .website
            .as_deref()
            .and_then(logo_url_for_website)
            .unwrap_or_default();

        Ok(CompanyProfile::new(
            symbol.clone(),
            logo_url,
            long_name,
            asset.long_business_summary.unwrap_or_default(),
        ))
    }

    async fn fetch_real_recommendations(
        &self,
        symbol: &Symbol,
    ) -> Result<RecommendationsTable, SourceError> {
        let result = self.quote_summary(symbol, "recommendationTrend").await?;
        let trend = result
            .recommendation_trend
            .map(|module| module.trend)
            .unwrap_or_default();
        Ok(RecommendationsTable::from_records(trend))
    }

    async fn fetch_real_history(&self, req: &HistoryRequest) -> Result<OhlcvSeries, SourceError> {
        let (period1, period2) = query_window(req);
        let endpoint = format!(
            "{QUERY_HOST}/v8/finance/chart/{}?period1={period1}&period2={period2}&interval=1d&events=div%2Csplits&includePrePost=false",
            urlencoding::encode(req.symbol.as_str()),
        );

        let response: YahooChartResponse = self.get_json(endpoint, &req.symbol).await?;
        if let Some(error) = response.chart.error {
            return Err(error.into_source_error(&req.symbol));
        }

        let result = response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| SourceError::not_found(&req.symbol))?;

        series_from_chart(req, result)
    }

    async fn quote_summary(
        &self,
        symbol: &Symbol,
        modules: &str,
    ) -> Result<YahooQuoteSummaryResult, SourceError> {
        let crumb = self.crumb().await?;
        let endpoint = format!(
            "{QUERY_HOST}/v10/finance/quoteSummary/{}?modules={}&crumb={}",
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(modules),
            urlencoding::encode(&crumb)
        );

        let response: YahooQuoteSummaryResponse = self.get_json(endpoint, symbol).await?;
        let data = response.quote_summary;
        if let Some(error) = data.error {
            return Err(error.into_source_error(symbol));
        }

        data.result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| SourceError::not_found(symbol))
    }

    async fn crumb(&self) -> Result<String, SourceError> {
        if let Some(crumb) = self.session.cached() {
            return Ok(crumb);
        }

        // The cookie endpoint answers 404 but still sets the session cookie.
        self.http_client
            .execute(self.request(COOKIE_ENDPOINT))
            .await
            .map_err(|error| {
                SourceError::unavailable(format!(
                    "failed to fetch yahoo session cookie: {}",
                    error.message()
                ))
            })?;

        for endpoint in CRUMB_ENDPOINTS {
            match self.http_client.execute(self.request(endpoint)).await {
                Ok(response) if response.status == 429 => {
                    return Err(SourceError::rate_limited(
                        "yahoo rate limited the crumb request",
                    ));
                }
                Ok(response) if response.is_success() => {
                    let body = response.body.trim();
                    if is_plausible_crumb(body) {
                        self.session.store(body);
                        return Ok(body.to_owned());
                    }
                }
                _ => {}
            }
        }

        Err(SourceError::unavailable(
            "failed to obtain yahoo crumb from all endpoints",
        ))
    }

    async fn get_json<T>(&self, endpoint: String, symbol: &Symbol) -> Result<T, SourceError>
    where
        T: DeserializeOwned + Send,
    {
        tracing::debug!(%symbol, "yahoo request");
        let response = self
            .http_client
            .execute(self.request(endpoint))
            .await
            .map_err(|error| {
                if error.retryable() {
                    SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
                } else {
                    SourceError::internal(format!("yahoo transport error: {}", error.message()))
                }
            })?;

        match response.status {
            200..=299 => {}
            401 | 403 => {
                self.session.invalidate();
                return Err(SourceError::unavailable(format!(
                    "yahoo rejected the session (status {})",
                    response.status
                )));
            }
            404 => return Err(SourceError::not_found(symbol)),
            429 => return Err(SourceError::rate_limited("yahoo returned status 429")),
            400..=499 => {
                return Err(SourceError::invalid_request(
                    describe_error(&response.body)
                        .unwrap_or_else(|| format!("yahoo returned status {}", response.status)),
                ));
            }
            status => {
                return Err(SourceError::unavailable(format!(
                    "yahoo returned status {status}"
                )));
            }
        }

        serde_json::from_str(&response.body)
            .map_err(|e| SourceError::internal(format!("failed to parse yahoo response: {e}")))
    }
}

/// Epoch bounds for the chart query.
///
/// Bars are stamped at the exchange open, which is the previous UTC day for
/// exchanges east of UTC and may fall past UTC midnight of `end` for those
/// west of it. An ordered range is widened by a day on each side and trimmed
/// back to `start..=end` by trading date once parsed. `period2` is exclusive
/// upstream. An inverted range is sent as-is so the provider rejects it.
fn query_window(req: &HistoryRequest) -> (i64, i64) {
    let start = req.start.unix_midnight();
    let after_end = req.end.unix_midnight() + SECONDS_PER_DAY;
    if req.start <= req.end {
        (start - SECONDS_PER_DAY, after_end + SECONDS_PER_DAY)
    } else {
        (start, after_end)
    }
}

fn series_from_chart(
    req: &HistoryRequest,
    result: YahooChartResult,
) -> Result<OhlcvSeries, SourceError> {
    let offset = result.meta.gmtoffset;
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut dividends = BTreeMap::new();
    for event in result.events.dividends.into_values() {
        *dividends
            .entry(trading_date(event.date, offset)?)
            .or_insert(0.0) += event.amount;
    }

    let mut splits = BTreeMap::new();
    for event in result.events.splits.into_values() {
        if event.denominator != 0.0 {
            splits.insert(
                trading_date(event.date, offset)?,
                event.numerator / event.denominator,
            );
        }
    }

    let mut records = Vec::with_capacity(result.timestamp.len());
    for (index, &ts) in result.timestamp.iter().enumerate() {
        let value = |column: &[Option<f64>]| column.get(index).copied().flatten();
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value(quote.open.as_slice()),
            value(quote.high.as_slice()),
            value(quote.low.as_slice()),
            value(quote.close.as_slice()),
        ) else {
            continue;
        };

        let date = trading_date(ts, offset)?;
        if date < req.start || date > req.end {
            continue;
        }
        let volume = quote.volume.get(index).copied().flatten().unwrap_or(0);
        records.push(
            OhlcvRecord::new(date, open, high, low, close, volume)
                .with_dividends(dividends.get(&date).copied().unwrap_or(0.0))
                .with_stock_splits(splits.get(&date).copied().unwrap_or(0.0)),
        );
    }

    Ok(OhlcvSeries::new(req.symbol.clone(), records))
}

/// Exchange-local calendar date of a unix timestamp.
fn trading_date(ts: i64, gmtoffset: i64) -> Result<CalendarDate, SourceError> {
    OffsetDateTime::from_unix_timestamp(ts.saturating_add(gmtoffset))
        .map(|value| CalendarDate::from(value.date()))
        .map_err(|e| SourceError::internal(format!("invalid timestamp {ts}: {e}")))
}

fn is_plausible_crumb(body: &str) -> bool {
    !body.is_empty() && body.len() < 100 && !body.contains(char::is_whitespace) && !body.contains('<')
}

/// Pulls `<section>.error.description` out of an error body.
fn describe_error(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.as_object()?.values().find_map(|section| {
        section
            .get("error")?
            .get("description")?
            .as_str()
            .map(str::to_owned)
    })
}

/// Logo service URL for a company website, keyed by its bare domain.
pub fn logo_url_for_website(website: &str) -> Option<String> {
    let trimmed = website.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);

    if host.is_empty() {
        None
    } else {
        Some(format!("{LOGO_HOST}/{host}"))
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
    fn into_source_error(self, symbol: &Symbol) -> SourceError {
        let description = self.description.unwrap_or_default();
        if self.code.eq_ignore_ascii_case("Not Found") {
            SourceError::not_found(symbol)
        } else if self.code.eq_ignore_ascii_case("Bad Request") {
            SourceError::invalid_request(description)
        } else {
            SourceError::unavailable(format!("yahoo API error {}: {description}", self.code))
        }
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: YahooChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    events: YahooChartEvents,
    #[serde(default)]
    indicators: YahooChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
struct YahooChartEvents {
    #[serde(default)]
    dividends: HashMap<String, YahooDividendEvent>,
    #[serde(default)]
    splits: HashMap<String, YahooSplitEvent>,
}

#[derive(Debug, Deserialize)]
struct YahooDividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct YahooSplitEvent {
    date: i64,
    numerator: f64,
    denominator: f64,
}

#[derive(Debug, Default, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: YahooQuoteSummaryData,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteSummaryData {
    #[serde(default)]
    result: Option<Vec<YahooQuoteSummaryResult>>,
    #[serde(default)]
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteSummaryResult {
    #[serde(rename = "assetProfile", default)]
    asset_profile: Option<YahooAssetProfile>,
    #[serde(default)]
    price: Option<YahooPrice>,
    #[serde(rename = "recommendationTrend", default)]
    recommendation_trend: Option<YahooRecommendationTrend>,
}

#[derive(Debug, Default, Deserialize)]
struct YahooAssetProfile {
    #[serde(default)]
    website: Option<String>,
    #[serde(rename = "longBusinessSummary", default)]
    long_business_summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct YahooPrice {
    #[serde(rename = "longName", default)]
    long_name: Option<String>,
    #[serde(rename = "shortName", default)]
    short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooRecommendationTrend {
    #[serde(default)]
    trend: Vec<Map<String, Value>>,
}

// ============================================================================
// Mock data (offline mode)
// ============================================================================

struct MockListing {
    symbol: &'static str,
    long_name: &'static str,
    website: &'static str,
    summary: &'static str,
    base_price: f64,
}

const MOCK_LISTINGS: [MockListing; 5] = [
    MockListing {
        symbol: "PFE",
        long_name: "Pfizer Inc.",
        website: "https://www.pfizer.com",
        summary: "Pfizer Inc. discovers, develops, manufactures, markets, distributes, \
                  and sells biopharmaceutical products worldwide.",
        base_price: 44.0,
    },
    MockListing {
        symbol: "GOOGL",
        long_name: "Alphabet Inc.",
        website: "https://abc.xyz",
        summary: "Alphabet Inc. offers various products and platforms in the United \
                  States, Europe, the Middle East, Africa, the Asia-Pacific, Canada, \
                  and Latin America.",
        base_price: 128.0,
    },
    MockListing {
        symbol: "AAPL",
        long_name: "Apple Inc.",
        website: "https://www.apple.com",
        summary: "Apple Inc. designs, manufactures, and markets smartphones, personal \
                  computers, tablets, wearables, and accessories worldwide.",
        base_price: 168.0,
    },
    MockListing {
        symbol: "MSFT",
        long_name: "Microsoft Corporation",
        website: "https://www.microsoft.com",
        summary: "Microsoft Corporation develops and supports software, services, \
                  devices, and solutions worldwide.",
        base_price: 305.0,
    },
    MockListing {
        symbol: "STG.AX",
        long_name: "Straker Limited",
        website: "https://www.straker.ai",
        summary: "Straker Limited provides translation and localisation services \
                  powered by its AI-assisted language platform.",
        base_price: 0.9,
    },
];

fn mock_listing(symbol: &Symbol) -> Result<&'static MockListing, SourceError> {
    MOCK_LISTINGS
        .iter()
        .find(|listing| listing.symbol == symbol.as_str())
        .ok_or_else(|| SourceError::not_found(symbol))
}

fn mock_profile(symbol: &Symbol) -> Result<CompanyProfile, SourceError> {
    let listing = mock_listing(symbol)?;
    Ok(CompanyProfile::new(
        symbol.clone(),
        logo_url_for_website(listing.website).unwrap_or_default(),
        listing.long_name,
        listing.summary,
    ))
}

fn mock_history(req: &HistoryRequest) -> Result<OhlcvSeries, SourceError> {
    let listing = mock_listing(&req.symbol)?;
    if req.start > req.end {
        return Err(SourceError::invalid_request(format!(
            "Invalid input - start date cannot be after end date. startDate = {}, endDate = {}",
            req.start, req.end
        )));
    }

    let seed = symbol_seed(&req.symbol);
    let mut records = Vec::new();
    let mut index = 0_u64;
    let mut day = Some(req.start);

    while let Some(date) = day.filter(|date| *date <= req.end) {
        if !date.is_weekend() {
            let step = seed.wrapping_add(index.wrapping_mul(7));
            let open = listing.base_price * (1.0 + (step % 200) as f64 / 1_000.0);
            let close = open * (1.0 + ((step % 9) as f64 - 4.0) / 400.0);
            let high = open.max(close) * 1.004;
            let low = open.min(close) * 0.996;
            let volume = 1_000_000 + seed.wrapping_add(index.wrapping_mul(7_919)) % 500_000;

            records.push(OhlcvRecord::new(date, open, high, low, close, volume));
            index += 1;
        }
        day = date.next_day();
    }

    Ok(OhlcvSeries::new(req.symbol.clone(), records))
}

fn mock_recommendations(symbol: &Symbol) -> Result<RecommendationsTable, SourceError> {
    mock_listing(symbol)?;
    let seed = symbol_seed(symbol);

    let records = ["0m", "-1m", "-2m", "-3m"]
        .iter()
        .enumerate()
        .filter_map(|(offset, period)| {
            let base = seed.wrapping_add(offset as u64);
            match json!({
                "period": period,
                "strongBuy": 5 + base % 7,
                "buy": 10 + base % 11,
                "hold": 6 + base % 5,
                "sell": base % 3,
                "strongSell": base % 2,
            }) {
                Value::Object(map) => Some(map),
                _ => None,
            }
        })
        .collect();

    Ok(RecommendationsTable::from_records(records))
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}
