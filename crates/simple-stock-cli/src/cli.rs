//! CLI argument definitions for Simple Stock.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tickers` | List the selectable tickers |
//! | `show` | Render the dashboard for one ticker |
//! | `readme` | Render the static README page |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--mock` | `false` | Serve offline data instead of calling Yahoo |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//! | `--log-level` | `warn` | Log level when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! simple-stock tickers
//! simple-stock show AAPL --from 2022-01-01 --to 2022-01-10 --format table
//! simple-stock show MSFT --mock --pretty
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;

/// 📈 Simple Stock - company profile, price history and analyst
/// recommendations for a fixed list of tickers.
#[derive(Debug, Parser)]
#[command(
    name = "simple-stock",
    author,
    version,
    about = "Simple stock dashboard in the terminal",
    long_about = "Simple Stock fetches a company profile, daily Open/Close and Volume \
history, and analyst recommendations from Yahoo Finance for one of a fixed list of \
tickers.\n\
\n\
Use 'simple-stock <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Use deterministic offline data instead of the Yahoo Finance API.
    #[arg(long, global = true, env = "SIMPLE_STOCK_MOCK", default_value_t = false)]
    pub mock: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, env = "SIMPLE_STOCK_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Log level used when `RUST_LOG` is not set. Logs go to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text tables for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📋 List the selectable tickers in display order.
    ///
    /// The first entry is the default selection.
    Tickers,

    /// 📊 Render the dashboard for one ticker.
    ///
    /// Prints the company profile, the Open/Close and Volume series, and the
    /// recommendations table. Selecting README prints the README page.
    ///
    /// # Examples
    ///
    ///   simple-stock show AAPL
    ///   simple-stock show PFE --from 2023-01-01
    ///   simple-stock show STG.AX --to 2023-06-30 --format table
    Show(ShowArgs),

    /// 📖 Render the static README page.
    Readme,
}

/// Arguments for the `show` command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Ticker from the allow-list (case-insensitive).
    pub symbol: String,

    /// First day of the range (YYYY-MM-DD). Defaults to twelve months before today.
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of the range, inclusive (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_parses_symbol_and_range_flags() {
        let cli = Cli::try_parse_from([
            "simple-stock",
            "show",
            "aapl",
            "--from",
            "2022-01-01",
            "--to",
            "2022-01-10",
            "--format",
            "table",
        ])
        .expect("valid arguments");

        assert_eq!(cli.format, OutputFormat::Table);
        let Command::Show(args) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(args.symbol, "aapl");
        assert_eq!(args.from.as_deref(), Some("2022-01-01"));
        assert_eq!(args.to.as_deref(), Some("2022-01-10"));
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["simple-stock", "tickers", "--mock", "--pretty"])
            .expect("valid arguments");

        assert!(cli.mock);
        assert!(cli.pretty);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn show_requires_symbol() {
        assert!(Cli::try_parse_from(["simple-stock", "show"]).is_err());
    }
}
