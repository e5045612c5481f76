use std::path::PathBuf;
use std::sync::Arc;

use simple_stock_core::{DashboardConfig, MarketDataClient};
use tera::{Context, Tera};

use crate::error::WebError;
use crate::page::DashboardPage;

const DASHBOARD_TEMPLATE: &str = "dashboard.html";

/// Shared, read-only handles for every request.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn MarketDataClient>,
    pub config: Arc<DashboardConfig>,
    pub assets_dir: PathBuf,
    templates: Arc<Tera>,
}

impl AppState {
    pub fn new(
        client: Arc<dyn MarketDataClient>,
        config: DashboardConfig,
    ) -> Result<Self, WebError> {
        Ok(Self {
            client,
            config: Arc::new(config),
            assets_dir: default_assets_dir(),
            templates: Arc::new(templates()?),
        })
    }

    pub fn with_assets_dir(mut self, assets_dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = assets_dir.into();
        self
    }

    pub fn render(&self, page: &DashboardPage) -> Result<String, WebError> {
        let context = Context::from_serialize(page)?;
        Ok(self.templates.render(DASHBOARD_TEMPLATE, &context)?)
    }
}

/// Assets shipped next to this crate's manifest.
pub fn default_assets_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
}

fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("chart_macros.html", include_str!("../templates/chart_macros.html")),
        (DASHBOARD_TEMPLATE, include_str!("../templates/dashboard.html")),
    ])?;
    Ok(tera)
}
