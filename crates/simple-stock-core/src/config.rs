//! Dashboard configuration: the ticker allow-list and client settings.

use serde::Serialize;

use crate::{TickerSymbol, ValidationError};

/// Ordered ticker allow-list shown in the selector. The first entry is the
/// default selection.
pub const TICKER_ALLOW_LIST: [&str; 6] = ["README", "PFE", "GOOGL", "AAPL", "MSFT", "STG.AX"];

/// Default lookback window for the price history, in calendar months.
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 12;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_USER_AGENT: &str = concat!("simple-stock/", env!("CARGO_PKG_VERSION"));

/// Selector contents as shown to users: allow-list order plus the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerList {
    pub tickers: Vec<String>,
    pub default: String,
}

/// Read-only settings shared by every pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardConfig {
    pub tickers: Vec<TickerSymbol>,
    pub lookback_months: u32,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `SIMPLE_STOCK_TIMEOUT_MS` and
    /// `SIMPLE_STOCK_USER_AGENT` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(timeout_ms) = std::env::var("SIMPLE_STOCK_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
        {
            config.timeout_ms = timeout_ms;
        }
        if let Ok(user_agent) = std::env::var("SIMPLE_STOCK_USER_AGENT") {
            if !user_agent.trim().is_empty() {
                config.user_agent = user_agent;
            }
        }
        config
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn default_ticker(&self) -> TickerSymbol {
        self.tickers.first().cloned().unwrap_or(TickerSymbol::Readme)
    }

    pub fn ticker_list(&self) -> TickerList {
        TickerList {
            tickers: self
                .tickers
                .iter()
                .map(|ticker| ticker.as_str().to_owned())
                .collect(),
            default: self.default_ticker().as_str().to_owned(),
        }
    }

    /// Parse user input and require it to be on the allow-list.
    pub fn select(&self, input: &str) -> Result<TickerSymbol, ValidationError> {
        let ticker = TickerSymbol::parse(input)?;
        if self.tickers.contains(&ticker) {
            Ok(ticker)
        } else {
            Err(ValidationError::SymbolNotListed {
                value: input.trim().to_owned(),
            })
        }
    }
}

fn default_tickers() -> Vec<TickerSymbol> {
    TICKER_ALLOW_LIST
        .iter()
        .filter_map(|raw| TickerSymbol::parse(raw).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_keeps_order_and_readme_default() {
        let config = DashboardConfig::default();
        let names = config
            .tickers
            .iter()
            .map(TickerSymbol::as_str)
            .collect::<Vec<_>>();
        assert_eq!(names, TICKER_ALLOW_LIST.to_vec());
        assert_eq!(config.default_ticker(), TickerSymbol::Readme);
    }

    #[test]
    fn select_rejects_unlisted_ticker() {
        let config = DashboardConfig::default();
        let err = config.select("TSLA").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolNotListed { .. }));
        assert!(config.select("msft").is_ok());
    }

    #[test]
    fn ticker_list_follows_allow_list() {
        let list = DashboardConfig::default().ticker_list();
        assert_eq!(list.tickers, TICKER_ALLOW_LIST.to_vec());
        assert_eq!(list.default, "README");
    }
}
