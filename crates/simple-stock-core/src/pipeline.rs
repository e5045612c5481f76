//! Ticker retrieval and presentation pipeline.
//!
//! One call per user interaction: the current selection and date range go
//! in, a [`RenderPlan`] comes out. The `README` selection never touches the
//! market data client. For a stock the order is profile, history,
//! projection, recommendations. Any failure is returned as-is; there is no
//! retry and no partial result.

use serde::Serialize;
use thiserror::Error;

use crate::market_data::{HistoryRequest, MarketDataClient, SourceError, SourceErrorKind};
use crate::projector::{project, PriceProjection, VolumeProjection};
use crate::readme::{readme_page, ReadmePage};
use crate::{CompanyProfile, DateRange, RecommendationsTable, Symbol, TickerSymbol};

/// Everything the renderer needs for one stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerView {
    pub symbol: Symbol,
    pub range: DateRange,
    pub profile: CompanyProfile,
    pub price: PriceProjection,
    pub volume: VolumeProjection,
    pub recommendations: RecommendationsTable,
}

/// Render instruction set produced by one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum RenderPlan {
    Readme(ReadmePage),
    Ticker(TickerView),
}

/// Failures surfaced to the renderer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("symbol '{symbol}' was not found by the market data provider")]
    SymbolNotFound { symbol: Symbol },

    #[error("failed to fetch {what} for '{symbol}': {source}")]
    DataFetchFailure {
        symbol: Symbol,
        what: &'static str,
        #[source]
        source: SourceError,
    },

    #[error("no price history for '{symbol}' between {} and {}", .range.start, .range.end)]
    EmptyRangeResult { symbol: Symbol, range: DateRange },
}

impl PipelineError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SymbolNotFound { .. } => "pipeline.symbol_not_found",
            Self::DataFetchFailure { .. } => "pipeline.data_fetch_failure",
            Self::EmptyRangeResult { .. } => "pipeline.empty_range_result",
        }
    }

    fn from_source(symbol: &Symbol, what: &'static str, source: SourceError) -> Self {
        if source.kind() == SourceErrorKind::NotFound {
            Self::SymbolNotFound {
                symbol: symbol.clone(),
            }
        } else {
            Self::DataFetchFailure {
                symbol: symbol.clone(),
                what,
                source,
            }
        }
    }
}

/// Run the pipeline for one interaction.
pub async fn run_pipeline<C>(
    client: &C,
    ticker: &TickerSymbol,
    range: DateRange,
) -> Result<RenderPlan, PipelineError>
where
    C: MarketDataClient + ?Sized,
{
    match ticker {
        TickerSymbol::Readme => {
            tracing::debug!("README selected; skipping market data");
            Ok(RenderPlan::Readme(readme_page()))
        }
        TickerSymbol::Stock(symbol) => fetch_ticker_view(client, symbol, range)
            .await
            .map(RenderPlan::Ticker),
    }
}

/// Fetch and project the data panels for one stock.
pub async fn fetch_ticker_view<C>(
    client: &C,
    symbol: &Symbol,
    range: DateRange,
) -> Result<TickerView, PipelineError>
where
    C: MarketDataClient + ?Sized,
{
    tracing::info!(%symbol, start = %range.start, end = %range.end, "fetching ticker data");

    let profile = client
        .profile(symbol)
        .await
        .map_err(|error| PipelineError::from_source(symbol, "profile", error))
        .inspect_err(log_failure)?;

    let series = client
        .history(HistoryRequest::new(symbol.clone(), range))
        .await
        .map_err(|error| PipelineError::from_source(symbol, "history", error))
        .inspect_err(log_failure)?;

    if series.is_empty() {
        let error = PipelineError::EmptyRangeResult {
            symbol: symbol.clone(),
            range,
        };
        log_failure(&error);
        return Err(error);
    }

    let (price, volume) = project(&series);

    let recommendations = client
        .recommendations(symbol)
        .await
        .map_err(|error| PipelineError::from_source(symbol, "recommendations", error))
        .inspect_err(log_failure)?;

    tracing::info!(%symbol, days = price.len(), "ticker data ready");

    Ok(TickerView {
        symbol: symbol.clone(),
        range,
        profile,
        price,
        volume,
        recommendations,
    })
}

fn log_failure(error: &PipelineError) {
    tracing::warn!(code = error.code(), %error, "pipeline failed");
}
