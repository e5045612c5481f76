//! Server-side SVG chart geometry.
//!
//! Charts are laid out here and drawn by the dashboard template as plain
//! `<polyline>` and `<rect>` elements. Trading days are spaced evenly along
//! the x axis, so weekends and holidays leave no gaps.

use serde::Serialize;
use simple_stock_core::{PricePoint, PriceProjection, VolumeProjection};

pub const CHART_WIDTH: f64 = 720.0;
pub const CHART_HEIGHT: f64 = 260.0;

const PAD_LEFT: f64 = 64.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 32.0;

const X_TICKS: usize = 6;
const Y_TICKS: usize = 5;

const SERIES_COLORS: [&str; 2] = ["#1f77b4", "#ff7f0e"];
const BAR_COLOR: &str = "#1f77b4";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

/// One polyline of the price chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub label: String,
    pub color: &'static str,
    /// SVG `points` attribute: `x,y` pairs separated by spaces.
    pub points: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub width: f64,
    pub height: f64,
    pub axes: Axes,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub color: &'static str,
    pub axes: Axes,
    pub bars: Vec<Bar>,
}

/// Linear map from a value domain onto a pixel range.
#[derive(Debug, Clone, Copy)]
struct Scale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Scale {
    fn new(min: f64, max: f64, range: (f64, f64)) -> Self {
        let domain = if (max - min).abs() < f64::EPSILON {
            (min - 1.0, max + 1.0)
        } else {
            (min, max)
        };
        Self { domain, range }
    }

    fn map(self, value: f64) -> f64 {
        let ratio = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + ratio * (self.range.1 - self.range.0)
    }

    fn ticks(self, count: usize, format: impl Fn(f64) -> String) -> Vec<Tick> {
        let steps = count.saturating_sub(1).max(1);
        (0..=steps)
            .map(|step| {
                let value =
                    self.domain.0 + (self.domain.1 - self.domain.0) * step as f64 / steps as f64;
                Tick {
                    position: round2(self.map(value)),
                    label: format(value),
                }
            })
            .collect()
    }
}

/// Open/Close line chart.
pub fn price_chart(price: &PriceProjection) -> LineChart {
    let values = price
        .points
        .iter()
        .flat_map(|point| [point.open, point.close]);
    let (min, max) = bounds(values).unwrap_or((0.0, 1.0));
    let y = Scale::new(min, max, (CHART_HEIGHT - PAD_BOTTOM, PAD_TOP));
    let dates = price
        .points
        .iter()
        .map(|point| point.date.to_string())
        .collect::<Vec<_>>();

    let columns: [fn(&PricePoint) -> f64; 2] =
        [|point: &PricePoint| point.open, |point: &PricePoint| point.close];
    let series = price
        .labels
        .iter()
        .zip(columns)
        .zip(SERIES_COLORS)
        .map(|((label, column), color)| LineSeries {
            label: label.clone(),
            color,
            points: price
                .points
                .iter()
                .enumerate()
                .map(|(index, point)| {
                    format!(
                        "{},{}",
                        round2(x_center(index, dates.len())),
                        round2(y.map(column(point)))
                    )
                })
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect();

    LineChart {
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        axes: axes(&dates, y.ticks(Y_TICKS, |value| format!("{value:.2}"))),
        series,
    }
}

/// Volume bar chart with bars rising from zero.
pub fn volume_chart(volume: &VolumeProjection) -> BarChart {
    let max = volume
        .points
        .iter()
        .map(|point| point.volume)
        .max()
        .unwrap_or(0) as f64;
    let y = Scale::new(0.0, max, (CHART_HEIGHT - PAD_BOTTOM, PAD_TOP));
    let dates = volume
        .points
        .iter()
        .map(|point| point.date.to_string())
        .collect::<Vec<_>>();

    let slot = plot_width() / dates.len().max(1) as f64;
    let bar_width = (slot * 0.8).max(1.0);
    let baseline = y.map(0.0);

    let bars = volume
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let top = y.map(point.volume as f64);
            Bar {
                x: round2(x_center(index, dates.len()) - bar_width / 2.0),
                y: round2(top),
                width: round2(bar_width),
                height: round2(baseline - top),
                title: format!("{}: {}", point.date, point.volume),
            }
        })
        .collect();

    BarChart {
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        label: volume.label.clone(),
        color: BAR_COLOR,
        axes: axes(&dates, y.ticks(Y_TICKS, compact_number)),
        bars,
    }
}

/// Short human form of large counts: `1.25M`, `830.0K`.
pub fn compact_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{value:.0}")
    }
}

fn axes(dates: &[String], y_ticks: Vec<Tick>) -> Axes {
    Axes {
        left: PAD_LEFT,
        right: CHART_WIDTH - PAD_RIGHT,
        top: PAD_TOP,
        bottom: CHART_HEIGHT - PAD_BOTTOM,
        x_ticks: date_ticks(dates),
        y_ticks,
    }
}

fn date_ticks(dates: &[String]) -> Vec<Tick> {
    if dates.is_empty() {
        return Vec::new();
    }
    let stride = dates.len().div_ceil(X_TICKS).max(1);
    dates
        .iter()
        .enumerate()
        .step_by(stride)
        .map(|(index, date)| Tick {
            position: round2(x_center(index, dates.len())),
            label: date.clone(),
        })
        .collect()
}

fn plot_width() -> f64 {
    CHART_WIDTH - PAD_LEFT - PAD_RIGHT
}

fn x_center(index: usize, count: usize) -> f64 {
    let slot = plot_width() / count.max(1) as f64;
    PAD_LEFT + slot * (index as f64 + 0.5)
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|value| value.is_finite()).fold(None, |acc, value| {
        Some(match acc {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        })
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
