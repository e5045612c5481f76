//! # Simple Stock Core
//!
//! Ticker data retrieval and presentation pipeline for the Simple Stock
//! dashboard.
//!
//! ## Overview
//!
//! A dashboard interaction is a ticker selection plus a date range. This
//! crate turns that pair into a [`RenderPlan`]: either the static README
//! page or a [`TickerView`] holding the company profile, the Open/Close and
//! Volume chart projections, and the recommendations table.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Yahoo Finance adapter (real HTTP and offline mock) |
//! | [`config`] | Ticker allow-list and client settings |
//! | [`date_range`] | Default lookback window and user overrides |
//! | [`domain`] | Domain models (Symbol, CalendarDate, OHLCV, profile) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`market_data`] | Market data client trait and structured errors |
//! | [`pipeline`] | Orchestrator producing render plans |
//! | [`projector`] | OHLCV to chart series projection |
//! | [`readme`] | Static README page content |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use simple_stock_core::{
//!     resolve_default_range, run_pipeline, CalendarDate, DashboardConfig, RenderPlan,
//!     YahooAdapter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::from_env();
//!     let client = YahooAdapter::from_config(&config)?;
//!
//!     let ticker = config.select("AAPL")?;
//!     let range = resolve_default_range(CalendarDate::today())?;
//!
//!     if let RenderPlan::Ticker(view) = run_pipeline(&client, &ticker, range).await? {
//!         println!("{}: {} trading days", view.profile.long_name, view.price.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Provider failures arrive as [`SourceError`] and are folded into the three
//! pipeline outcomes the renderers show:
//!
//! ```rust
//! use simple_stock_core::PipelineError;
//!
//! fn status_for(error: &PipelineError) -> u16 {
//!     match error {
//!         PipelineError::SymbolNotFound { .. } => 404,
//!         PipelineError::EmptyRangeResult { .. } => 404,
//!         PipelineError::DataFetchFailure { .. } => 502,
//!     }
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod date_range;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod market_data;
pub mod pipeline;
pub mod projector;
pub mod readme;

// Adapter implementations
pub use adapters::{logo_url_for_website, YahooAdapter};

// Configuration
pub use config::{DashboardConfig, TickerList, DEFAULT_LOOKBACK_MONTHS, TICKER_ALLOW_LIST};

// Date range selection
pub use date_range::{apply_override, resolve_default_range, resolve_lookback, DateRange};

// Domain models
pub use domain::{
    CalendarDate, CompanyProfile, OhlcvRecord, OhlcvSeries, RecommendationsTable, Symbol,
    TickerSymbol, README_TICKER,
};

// Error types
pub use error::ValidationError;

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

// Market data client contract
pub use market_data::{
    HistoryRequest, MarketDataClient, SourceError, SourceErrorKind, SourceFuture,
};

// Pipeline
pub use pipeline::{fetch_ticker_view, run_pipeline, PipelineError, RenderPlan, TickerView};

// Projection
pub use projector::{
    project, PricePoint, PriceProjection, VolumePoint, VolumeProjection, PRICE_LABELS,
    VOLUME_LABEL,
};

// README content
pub use readme::{readme_page, ContentBlock, ReadmePage};
