use std::io::Write;

use simple_stock_core::{ContentBlock, ReadmePage, RenderPlan, TickerList, TickerView};

use crate::cli::OutputFormat;
use crate::commands::Report;
use crate::error::CliError;

pub fn render<W: Write>(
    out: &mut W,
    report: &Report,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => match report {
            Report::Tickers(list) => render_tickers(out, list)?,
            Report::Plan(RenderPlan::Readme(page)) => render_readme(out, page)?,
            Report::Plan(RenderPlan::Ticker(view)) => render_ticker(out, view)?,
        },
    }

    Ok(())
}

fn render_tickers<W: Write>(out: &mut W, list: &TickerList) -> Result<(), CliError> {
    for ticker in &list.tickers {
        let marker = if *ticker == list.default { " (default)" } else { "" };
        writeln!(out, "{ticker}{marker}")?;
    }
    Ok(())
}

fn render_readme<W: Write>(out: &mut W, page: &ReadmePage) -> Result<(), CliError> {
    for block in &page.blocks {
        match block {
            ContentBlock::Title { text } => writeln!(out, "# {text}")?,
            ContentBlock::Heading { level, text } => {
                writeln!(out, "{} {text}", "#".repeat(usize::from(*level)))?;
            }
            ContentBlock::Paragraph { text } => writeln!(out, "{text}")?,
            ContentBlock::Image { src, alt } => writeln!(out, "[{alt}]({src})")?,
            ContentBlock::Code { language, source } => {
                writeln!(out, "```{language}\n{source}\n```")?;
            }
            ContentBlock::InlineCode { text } => writeln!(out, "`{text}`")?,
            ContentBlock::Latex { source } => writeln!(out, "$$ {source} $$")?,
            ContentBlock::Link { href } => writeln!(out, "<{href}>")?,
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_ticker<W: Write>(out: &mut W, view: &TickerView) -> Result<(), CliError> {
    let profile = &view.profile;
    writeln!(out, "{}  {}", view.symbol, profile.long_name)?;
    if !profile.logo_url.is_empty() {
        writeln!(out, "logo : {}", profile.logo_url)?;
    }
    writeln!(out, "range: {} .. {}", view.range.start, view.range.end)?;
    writeln!(out)?;
    if !profile.business_summary.is_empty() {
        writeln!(out, "{}", profile.business_summary)?;
        writeln!(out)?;
    }

    let mut headers = vec![String::from("Date")];
    headers.extend(view.price.labels.iter().cloned());
    headers.push(view.volume.label.clone());

    let rows = view
        .price
        .points
        .iter()
        .zip(&view.volume.points)
        .map(|(price, volume)| {
            vec![
                price.date.to_string(),
                format!("{:.4}", price.open),
                format!("{:.4}", price.close),
                volume.volume.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    write_table(out, &headers, &rows)?;

    writeln!(out)?;
    writeln!(out, "Recommendations")?;
    write_table(
        out,
        &view.recommendations.columns,
        &view.recommendations.text_rows(),
    )?;

    Ok(())
}

fn write_table<W: Write>(
    out: &mut W,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<(), CliError> {
    let mut widths = headers.iter().map(String::len).collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    writeln!(out, "{}", line(headers))?;
    writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  ")
    )?;
    for row in rows {
        writeln!(out, "{}", line(row.as_slice()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use simple_stock_core::{
        project, readme_page, CalendarDate, CompanyProfile, DateRange, OhlcvRecord, OhlcvSeries,
        RecommendationsTable, Symbol,
    };

    fn view() -> TickerView {
        let symbol = Symbol::parse("AAPL").expect("valid symbol");
        let day = |raw: &str| CalendarDate::parse(raw).expect("valid date");
        let series = OhlcvSeries::new(
            symbol.clone(),
            vec![
                OhlcvRecord::new(day("2022-01-04"), 182.63, 182.94, 179.12, 179.7, 99_310_400),
                OhlcvRecord::new(day("2022-01-03"), 177.83, 182.88, 177.71, 182.01, 104_487_900),
            ],
        );
        let (price, volume) = project(&series);
        let record = json!({"period": "0m", "strongBuy": 11, "sell": null});

        TickerView {
            symbol: symbol.clone(),
            range: DateRange::new(day("2022-01-01"), day("2022-01-10")),
            profile: CompanyProfile::new(
                symbol,
                "https://logo.clearbit.com/apple.com",
                "Apple Inc.",
                "Apple designs smartphones.",
            ),
            price,
            volume,
            recommendations: RecommendationsTable::from_records(vec![record
                .as_object()
                .cloned()
                .expect("object")]),
        }
    }

    fn rendered(report: &Report, format: OutputFormat, pretty: bool) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer, report, format, pretty).expect("render");
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn table_lists_price_rows_chronologically_then_recommendations() {
        let text = rendered(
            &Report::Plan(RenderPlan::Ticker(view())),
            OutputFormat::Table,
            false,
        );

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "AAPL  Apple Inc.");
        let header = lines
            .iter()
            .position(|line| line.starts_with("Date"))
            .expect("price header");
        assert_eq!(lines[header], "Date        Open      Close     Volume");
        assert!(lines[header + 2].starts_with("2022-01-03  177.8300  182.0100  104487900"));
        assert!(lines[header + 3].starts_with("2022-01-04"));
        assert!(text.contains("Recommendations\nperiod  strongBuy  sell\n"));
        assert!(text.contains("\n0m      11\n"));
    }

    #[test]
    fn json_output_is_tagged_by_page() {
        let text = rendered(
            &Report::Plan(RenderPlan::Ticker(view())),
            OutputFormat::Json,
            false,
        );
        let value: Value = serde_json::from_str(&text).expect("json");

        assert_eq!(value["page"], "ticker");
        assert_eq!(value["price"]["labels"], json!(["Open", "Close"]));
        assert_eq!(value["volume"]["points"][0]["volume"], 104_487_900);
    }

    #[test]
    fn table_readme_renders_code_fences() {
        let text = rendered(
            &Report::Plan(RenderPlan::Readme(readme_page())),
            OutputFormat::Table,
            false,
        );

        assert!(text.starts_with("# Welcome to Simple Stock"));
        assert!(text.contains("```dockerfile"));
    }

    #[test]
    fn table_tickers_mark_default() {
        let report = Report::Tickers(TickerList {
            tickers: vec![String::from("README"), String::from("PFE")],
            default: String::from("README"),
        });

        assert_eq!(
            rendered(&report, OutputFormat::Table, false),
            "README (default)\nPFE\n"
        );
    }
}
