use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use simple_stock_core::{DashboardConfig, MarketDataClient, YahooAdapter};
use simple_stock_web::{router, AppState, WebError};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// 📈 Simple Stock web dashboard
#[derive(Debug, Parser)]
#[command(name = "simple-stock-web", author, version, about = "Simple Stock browser dashboard")]
struct ServerArgs {
    /// Address to bind.
    #[arg(long, env = "SIMPLE_STOCK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8501)]
    port: u16,

    /// Use deterministic offline data instead of the Yahoo Finance API.
    #[arg(long, env = "SIMPLE_STOCK_MOCK", default_value_t = false)]
    mock: bool,

    /// Directory served under `/assets`.
    #[arg(long, env = "SIMPLE_STOCK_ASSETS")]
    assets: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info,tower_http=debug")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = ServerArgs::parse();
    init_tracing(&args.log_level);

    match serve(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(code = error.code(), %error, "server stopped");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(args: ServerArgs) -> Result<(), WebError> {
    let config = DashboardConfig::from_env();
    let client: Arc<dyn MarketDataClient> = if args.mock {
        Arc::new(YahooAdapter::mock())
    } else {
        Arc::new(YahooAdapter::from_config(&config)?)
    };

    let mut state = AppState::new(client, config)?;
    if let Some(assets) = args.assets {
        state = state.with_assets_dir(assets);
    }

    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(%address, mock = args.mock, "simple-stock-web listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
