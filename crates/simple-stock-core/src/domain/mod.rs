//! # Domain Models
//!
//! Canonical types that flow through the dashboard pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated stock symbol |
//! | [`TickerSymbol`] | Dashboard selection (README sentinel or stock) |
//! | [`CalendarDate`] | Date without time of day |
//! | [`CompanyProfile`] | Logo, long name, business summary |
//! | [`OhlcvRecord`] | One trading day of OHLCV data |
//! | [`OhlcvSeries`] | Chronological OHLCV history |
//! | [`RecommendationsTable`] | Opaque provider table |
//!
//! Every value is rebuilt on each interaction; nothing here is cached.

mod date;
mod models;
mod symbol;

pub use date::CalendarDate;
pub use models::{CompanyProfile, OhlcvRecord, OhlcvSeries, RecommendationsTable};
pub use symbol::{Symbol, TickerSymbol, README_TICKER};
