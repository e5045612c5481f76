mod readme;
mod show;

use serde::Serialize;
use simple_stock_core::{CalendarDate, DashboardConfig, RenderPlan, TickerList, YahooAdapter};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command produced, ready for the output layer.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Tickers(TickerList),
    Plan(RenderPlan),
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    let mut config = DashboardConfig::from_env();
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    let client = if cli.mock {
        YahooAdapter::mock()
    } else {
        YahooAdapter::from_config(&config)?
    };
    tracing::debug!(mock = client.is_mock(), timeout_ms = config.timeout_ms, "client ready");

    match &cli.command {
        Command::Tickers => Ok(Report::Tickers(config.ticker_list())),
        Command::Show(args) => show::run(args, &config, &client, CalendarDate::today())
            .await
            .map(Report::Plan),
        Command::Readme => Ok(Report::Plan(readme::run())),
    }
}
