//! Column projections of an OHLCV series for chart display.

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, OhlcvSeries};

/// Series labels for the price line chart, in column order.
pub const PRICE_LABELS: [&str; 2] = ["Open", "Close"];

/// Series label for the volume bar chart.
pub const VOLUME_LABEL: &str = "Volume";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: CalendarDate,
    pub open: f64,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub date: CalendarDate,
    pub volume: u64,
}

/// Open/close columns keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceProjection {
    pub labels: Vec<String>,
    pub points: Vec<PricePoint>,
}

impl PriceProjection {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Volume column keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeProjection {
    pub label: String,
    pub points: Vec<VolumePoint>,
}

impl VolumeProjection {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Select open/close and volume from every record, keeping order.
pub fn project(series: &OhlcvSeries) -> (PriceProjection, VolumeProjection) {
    let records = series.records();

    let price = PriceProjection {
        labels: PRICE_LABELS.iter().map(|label| (*label).to_owned()).collect(),
        points: records
            .iter()
            .map(|record| PricePoint {
                date: record.date,
                open: record.open,
                close: record.close,
            })
            .collect(),
    };

    let volume = VolumeProjection {
        label: VOLUME_LABEL.to_owned(),
        points: records
            .iter()
            .map(|record| VolumePoint {
                date: record.date,
                volume: record.volume,
            })
            .collect(),
    };

    (price, volume)
}
