//! View model handed to the dashboard template.

use serde::Serialize;
use simple_stock_core::{
    CompanyProfile, ContentBlock, DashboardConfig, DateRange, RecommendationsTable, RenderPlan,
    TickerSymbol,
};

use crate::charts::{price_chart, volume_chart, BarChart, LineChart};
use crate::error::{ErrorBody, WebError};

pub const APP_TITLE: &str = "Simple Stock";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerOption {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl From<&RecommendationsTable> for TableView {
    fn from(table: &RecommendationsTable) -> Self {
        Self {
            columns: table.columns.clone(),
            rows: table.text_rows(),
        }
    }
}

/// Main panel content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContent {
    Readme {
        blocks: Vec<ContentBlock>,
    },
    Ticker {
        profile: CompanyProfile,
        price_chart: LineChart,
        volume_chart: BarChart,
        recommendations: TableView,
    },
    Error(ErrorBody),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub title: &'static str,
    pub tickers: Vec<TickerOption>,
    pub from: String,
    pub to: String,
    pub content: PageContent,
}

impl DashboardPage {
    pub fn new(
        config: &DashboardConfig,
        selected: Option<&TickerSymbol>,
        range: DateRange,
        outcome: Result<RenderPlan, WebError>,
    ) -> Self {
        let tickers = config
            .tickers
            .iter()
            .map(|ticker| TickerOption {
                value: ticker.as_str().to_owned(),
                selected: Some(ticker) == selected,
            })
            .collect();

        let content = match outcome {
            Ok(RenderPlan::Readme(page)) => PageContent::Readme {
                blocks: page.blocks,
            },
            Ok(RenderPlan::Ticker(view)) => PageContent::Ticker {
                price_chart: price_chart(&view.price),
                volume_chart: volume_chart(&view.volume),
                recommendations: TableView::from(&view.recommendations),
                profile: view.profile,
            },
            Err(error) => PageContent::Error(error.body()),
        };

        Self {
            title: APP_TITLE,
            tickers,
            from: range.start.to_string(),
            to: range.end.to_string(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_stock_core::{readme_page, CalendarDate, ValidationError};

    fn range() -> DateRange {
        DateRange::new(
            CalendarDate::parse("2022-01-01").expect("date"),
            CalendarDate::parse("2022-01-10").expect("date"),
        )
    }

    #[test]
    fn selected_ticker_is_marked_in_allow_list_order() {
        let config = DashboardConfig::default();
        let selected = config.select("msft").expect("listed");

        let page = DashboardPage::new(
            &config,
            Some(&selected),
            range(),
            Ok(RenderPlan::Readme(readme_page())),
        );

        let marked = page
            .tickers
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value.as_str())
            .collect::<Vec<_>>();
        assert_eq!(marked, vec!["MSFT"]);
        assert_eq!(page.tickers[0].value, "README");
        assert_eq!(page.from, "2022-01-01");
        assert_eq!(page.to, "2022-01-10");
    }

    #[test]
    fn failure_becomes_error_panel() {
        let page = DashboardPage::new(
            &DashboardConfig::default(),
            None,
            range(),
            Err(WebError::from(ValidationError::EmptySymbol)),
        );

        match page.content {
            PageContent::Error(body) => assert_eq!(body.status, 400),
            other => panic!("unexpected content: {other:?}"),
        }
        assert!(page.tickers.iter().all(|option| !option.selected));
    }
}
