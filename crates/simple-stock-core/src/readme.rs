//! Static README page shown for the `README` selection.

use serde::Serialize;

/// One renderable piece of the README page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Title { text: &'static str },
    Heading { level: u8, text: &'static str },
    Paragraph { text: &'static str },
    Image { src: &'static str, alt: &'static str },
    Code { language: &'static str, source: &'static str },
    InlineCode { text: &'static str },
    Latex { source: &'static str },
    Link { href: &'static str },
}

/// The README page as an ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadmePage {
    pub blocks: Vec<ContentBlock>,
}

impl ReadmePage {
    pub fn title(&self) -> &'static str {
        self.blocks
            .iter()
            .find_map(|block| match block {
                ContentBlock::Title { text } => Some(*text),
                _ => None,
            })
            .unwrap_or("Simple Stock")
    }
}

const FETCH_SAMPLE: &str = r#"use simple_stock_core::{
    resolve_default_range, CalendarDate, DashboardConfig, HistoryRequest, MarketDataClient, Symbol,
    YahooAdapter,
};

let client = YahooAdapter::from_config(&DashboardConfig::from_env())?;
let symbol = Symbol::parse("PFE")?;
let profile = client.profile(&symbol).await?;
let range = resolve_default_range(CalendarDate::today())?;
let history = client.history(HistoryRequest::new(symbol, range)).await?;"#;

const DASHBOARD_SAMPLE: &str = r#"let plan = run_pipeline(&client, &ticker, range).await?;
match plan {
    RenderPlan::Readme(page) => render_readme(&page),
    RenderPlan::Ticker(view) => {
        render_profile(&view.profile);
        render_line_chart(&view.price);
        render_bar_chart(&view.volume);
        render_table("Recommendations", &view.recommendations);
    }
}"#;

const DOCKERFILE_SAMPLE: &str = r#"FROM rust:1.83 AS build
WORKDIR /code
COPY . .
RUN cargo build --release --bin simple-stock-web

FROM debian:bookworm-slim
RUN apt-get update && apt-get install -y ca-certificates && rm -rf /var/lib/apt/lists/*
COPY --from=build /code/target/release/simple-stock-web /usr/local/bin/
COPY crates/simple-stock-web/assets /srv/assets
ENV SIMPLE_STOCK_ASSETS=/srv/assets
ENV PORT=8501

# expose app port
EXPOSE $PORT

CMD simple-stock-web --port $PORT"#;

const LAYOUT_SAMPLE: &str = r#"├── Cargo.toml
├── Dockerfile
└── crates
   ├── simple-stock-core
   ├── simple-stock-cli
   └── simple-stock-web
      └── assets
         └── simple-stock.svg"#;

/// Builds the README page content.
pub fn readme_page() -> ReadmePage {
    use ContentBlock::*;

    let blocks = vec![
        Title {
            text: "Welcome to Simple Stock",
        },
        Paragraph {
            text: "This is a simple application to display companies stock data. \
                   Getting financial data is easy with public APIs. Straker Translations \
                   is an ASX listed company and its stock data is public too.",
        },
        Image {
            src: "/assets/simple-stock.svg",
            alt: "Simple Stock",
        },
        Heading {
            level: 3,
            text: "Getting Stock Data",
        },
        Paragraph {
            text: "The market data client talks to Yahoo Finance. Pass the stock symbol \
                   to fetch the company profile and the daily price history. This example \
                   works with Pfizer, whose ticker is PFE.",
        },
        Code {
            language: "rust",
            source: FETCH_SAMPLE,
        },
        Heading {
            level: 3,
            text: "Displaying Information",
        },
        Paragraph {
            text: "Each selection runs the pipeline once and returns a render plan: the \
                   profile panel, an Open/Close line chart, a Volume bar chart and the \
                   recommendations table.",
        },
        Code {
            language: "rust",
            source: DASHBOARD_SAMPLE,
        },
        Heading {
            level: 3,
            text: "Containerise the Application",
        },
        Paragraph {
            text: "To run the dashboard in a container, pack it as a Docker image and \
                   start a container from it. The Dockerfile holds the build instructions.",
        },
        Heading {
            level: 5,
            text: "Dockerfile",
        },
        Code {
            language: "dockerfile",
            source: DOCKERFILE_SAMPLE,
        },
        Heading {
            level: 3,
            text: "Build an Image and Run the Container",
        },
        Paragraph {
            text: "The application folder structure should look like this.",
        },
        Code {
            language: "text",
            source: LAYOUT_SAMPLE,
        },
        Paragraph {
            text: "To build a Docker image, run docker build from the repository root.",
        },
        InlineCode {
            text: "docker build -t simple-stock .",
        },
        Paragraph {
            text: "With the image in place, run it with docker run. The -p option exposes \
                   the port used by the container.",
        },
        InlineCode {
            text: "docker run -p 8501:8501 -e PORT=8501 simple-stock",
        },
        Paragraph {
            text: "Once the container is up, browse to http://localhost:8501.",
        },
        Heading {
            level: 3,
            text: "Wrapping up",
        },
        Paragraph {
            text: "This page showed how to fetch market data, render it as a dashboard \
                   and run the whole thing in Docker. Happy coding!",
        },
        Latex {
            source: r"x^2 = \frac{n^{2}+n}{10}",
        },
        Heading {
            level: 3,
            text: "References",
        },
        Link {
            href: "https://finance.yahoo.com/",
        },
        Link {
            href: "https://docs.rs/axum/",
        },
        Link {
            href: "https://www.docker.com/blog/containerized-python-development-part-1/",
        },
    ];

    ReadmePage { blocks }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readme_starts_with_title() {
        let page = readme_page();
        assert_eq!(page.title(), "Welcome to Simple Stock");
        assert!(matches!(page.blocks.first(), Some(ContentBlock::Title { .. })));
    }

    #[test]
    fn readme_blocks_serialize_with_kind_tag() {
        let value = serde_json::to_value(readme_page()).expect("serialize");
        assert_eq!(value["blocks"][0]["kind"], "title");
    }
}
