//! HTTP routes.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | HTML dashboard (`?symbol=&from=&to=`) |
//! | `GET /api/tickers` | Allow-list and default selection |
//! | `GET /api/dashboard` | Render plan as JSON (`?symbol=&from=&to=`) |
//! | `GET /healthz` | Liveness probe |
//! | `GET /assets/*` | Static files |

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use simple_stock_core::{
    apply_override, resolve_lookback, run_pipeline, CalendarDate, DashboardConfig, DateRange,
    RenderPlan, TickerList, TickerSymbol,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::WebError;
use crate::page::DashboardPage;
use crate::state::AppState;

/// Sidebar inputs. Blank values fall back to the defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DashboardQuery {
    pub symbol: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.assets_dir);
    Router::new()
        .route("/", get(dashboard))
        .route("/api/tickers", get(tickers))
        .route("/api/dashboard", get(api_dashboard))
        .route("/healthz", get(healthz))
        .nest_service("/assets", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<(StatusCode, Html<String>), WebError> {
    let default_range = resolve_lookback(CalendarDate::today(), state.config.lookback_months)?;

    let (selected, range, outcome) =
        match resolve_selection(&state.config, &query, default_range) {
            Ok((ticker, range)) => {
                let outcome = run_pipeline(state.client.as_ref(), &ticker, range)
                    .await
                    .map_err(WebError::from);
                (Some(ticker), range, outcome)
            }
            Err(error) => (None, default_range, Err(error)),
        };

    let status = outcome.as_ref().err().map_or(StatusCode::OK, WebError::status);
    let page = DashboardPage::new(&state.config, selected.as_ref(), range, outcome);
    Ok((status, Html(state.render(&page)?)))
}

async fn api_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<RenderPlan>, WebError> {
    let default_range = resolve_lookback(CalendarDate::today(), state.config.lookback_months)?;
    let (ticker, range) = resolve_selection(&state.config, &query, default_range)?;
    let plan = run_pipeline(state.client.as_ref(), &ticker, range).await?;
    Ok(Json(plan))
}

async fn tickers(State(state): State<AppState>) -> Json<TickerList> {
    Json(state.config.ticker_list())
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Allow-listed ticker plus the default range with any supplied bound
/// replaced. Date inputs are ignored for the README page.
fn resolve_selection(
    config: &DashboardConfig,
    query: &DashboardQuery,
    default_range: DateRange,
) -> Result<(TickerSymbol, DateRange), WebError> {
    let ticker = match non_blank(query.symbol.as_deref()) {
        Some(raw) => config.select(raw)?,
        None => config.default_ticker(),
    };
    if ticker.is_readme() {
        return Ok((ticker, default_range));
    }
    let from = non_blank(query.from.as_deref())
        .map(CalendarDate::parse)
        .transpose()?;
    let to = non_blank(query.to.as_deref())
        .map(CalendarDate::parse)
        .transpose()?;

    Ok((ticker, apply_override(default_range, from, to)))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
