//! Market data client contract and request/error types.
//!
//! The pipeline only talks to a provider through [`MarketDataClient`]:
//!
//! | Method | Response | Description |
//! |--------|----------|-------------|
//! | [`profile`](MarketDataClient::profile) | [`CompanyProfile`] | Logo, long name, summary |
//! | [`history`](MarketDataClient::history) | [`OhlcvSeries`] | Daily OHLCV for a date range |
//! | [`recommendations`](MarketDataClient::recommendations) | [`RecommendationsTable`] | Analyst recommendations |

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::{CalendarDate, CompanyProfile, DateRange, OhlcvSeries, RecommendationsTable, Symbol};

/// What went wrong on the provider side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    NotFound,
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

impl SourceErrorKind {
    /// Stable dotted identifier used in JSON error bodies.
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotFound => "source.not_found",
            Self::Unavailable => "source.unavailable",
            Self::RateLimited => "source.rate_limited",
            Self::InvalidRequest => "source.invalid_request",
            Self::Internal => "source.internal",
        }
    }

    const fn is_transient(self) -> bool {
        matches!(self, Self::Unavailable | Self::RateLimited)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({})", .kind.code())]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(symbol: &Symbol) -> Self {
        Self::new(
            SourceErrorKind::NotFound,
            format!("no data found for symbol '{symbol}'"),
        )
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::RateLimited, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Internal, message)
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a later attempt could succeed. Informational only; nothing in
    /// this crate retries.
    pub const fn retryable(&self) -> bool {
        self.kind.is_transient()
    }

    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Request payload for daily history.
///
/// `start > end` is accepted and forwarded to the provider unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, range: DateRange) -> Self {
        Self {
            symbol,
            start: range.start,
            end: range.end,
        }
    }
}

/// Boxed future returned by client calls.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Market data client contract.
///
/// Implementations must be `Send + Sync`; the web server shares one client
/// across requests.
pub trait MarketDataClient: Send + Sync {
    /// Fetches the company profile panel fields.
    ///
    /// # Errors
    ///
    /// [`SourceErrorKind::NotFound`] when the provider does not know the
    /// symbol; other kinds for transport or provider failures.
    fn profile<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, CompanyProfile>;

    /// Fetches daily OHLCV records for the requested range.
    ///
    /// # Errors
    ///
    /// [`SourceErrorKind::NotFound`] for unknown symbols; other kinds for
    /// transport or provider failures, including provider rejection of an
    /// out-of-order range.
    fn history<'a>(&'a self, req: HistoryRequest) -> SourceFuture<'a, OhlcvSeries>;

    /// Fetches the analyst recommendations table.
    fn recommendations<'a>(&'a self, symbol: &'a Symbol)
        -> SourceFuture<'a, RecommendationsTable>;
}
