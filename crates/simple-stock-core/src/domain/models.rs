use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CalendarDate, Symbol};

/// Company profile panel fields, passed through from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: Symbol,
    pub logo_url: String,
    pub long_name: String,
    pub business_summary: String,
}

impl CompanyProfile {
    pub fn new(
        symbol: Symbol,
        logo_url: impl Into<String>,
        long_name: impl Into<String>,
        business_summary: impl Into<String>,
    ) -> Self {
        Self {
            symbol,
            logo_url: logo_url.into(),
            long_name: long_name.into(),
            business_summary: business_summary.into(),
        }
    }
}

/// One trading day of OHLCV data plus corporate actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    pub date: CalendarDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub dividends: f64,
    pub stock_splits: f64,
}

impl OhlcvRecord {
    pub fn new(date: CalendarDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    pub fn with_dividends(mut self, dividends: f64) -> Self {
        self.dividends = dividends;
        self
    }

    pub fn with_stock_splits(mut self, stock_splits: f64) -> Self {
        self.stock_splits = stock_splits;
        self
    }
}

/// Daily OHLCV history for one symbol, ordered by date ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvSeries {
    pub symbol: Symbol,
    records: Vec<OhlcvRecord>,
}

impl OhlcvSeries {
    /// Builds a series, sorting records chronologically. Records sharing a
    /// date keep their relative order.
    pub fn new(symbol: Symbol, mut records: Vec<OhlcvRecord>) -> Self {
        records.sort_by_key(|record| record.date);
        Self { symbol, records }
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[OhlcvRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Provider-shaped table, rendered as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RecommendationsTable {
    /// Builds a table from JSON objects. Columns follow first-seen key order;
    /// a row missing a column gets `null` in that cell.
    pub fn from_records(records: Vec<serde_json::Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as display text: strings unquoted, `null` blank.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(input: &str) -> CalendarDate {
        CalendarDate::parse(input).expect("valid date")
    }

    #[test]
    fn series_sorts_records_chronologically() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let series = OhlcvSeries::new(
            symbol,
            vec![
                OhlcvRecord::new(date("2022-01-05"), 2.0, 2.0, 2.0, 2.0, 20),
                OhlcvRecord::new(date("2022-01-03"), 1.0, 1.0, 1.0, 1.0, 10),
            ],
        );

        let dates = series
            .records()
            .iter()
            .map(|record| record.date.to_string())
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["2022-01-03", "2022-01-05"]);
    }

    #[test]
    fn recommendations_keep_provider_column_order() {
        let records = vec![
            json!({"period": "0m", "strongBuy": 11, "buy": 21}),
            json!({"period": "-1m", "buy": 20, "hold": 6}),
        ]
        .into_iter()
        .filter_map(|value| value.as_object().cloned())
        .collect();

        let table = RecommendationsTable::from_records(records);
        assert_eq!(table.columns, vec!["period", "strongBuy", "buy", "hold"]);
        assert_eq!(table.rows[1], vec![json!("-1m"), Value::Null, json!(20), json!(6)]);
        assert_eq!(table.text_rows()[1], vec!["-1m", "", "20", "6"]);
    }
}
