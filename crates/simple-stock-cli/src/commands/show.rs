use simple_stock_core::{
    apply_override, resolve_lookback, run_pipeline, CalendarDate, DashboardConfig,
    MarketDataClient, RenderPlan,
};

use crate::cli::ShowArgs;
use crate::error::CliError;

pub async fn run<C>(
    args: &ShowArgs,
    config: &DashboardConfig,
    client: &C,
    today: CalendarDate,
) -> Result<RenderPlan, CliError>
where
    C: MarketDataClient + ?Sized,
{
    let ticker = config.select(&args.symbol)?;
    let default_range = resolve_lookback(today, config.lookback_months)?;
    if ticker.is_readme() {
        return Ok(run_pipeline(client, &ticker, default_range).await?);
    }

    let from = args.from.as_deref().map(CalendarDate::parse).transpose()?;
    let to = args.to.as_deref().map(CalendarDate::parse).transpose()?;

    let range = apply_override(default_range, from, to);
    Ok(run_pipeline(client, &ticker, range).await?)
}
