//! Provider adapters implementing [`crate::MarketDataClient`].

mod yahoo;

pub use yahoo::{logo_url_for_website, YahooAdapter};
