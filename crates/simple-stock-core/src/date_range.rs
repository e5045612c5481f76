//! Date range selection for the price history lookback window.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LOOKBACK_MONTHS;
use crate::{CalendarDate, ValidationError};

/// Inclusive calendar range requested from the provider.
///
/// Nothing enforces `start <= end`; an inverted range is forwarded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateRange {
    pub const fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }
}

/// Trailing 12-month window ending at `now`.
pub fn resolve_default_range(now: CalendarDate) -> Result<DateRange, ValidationError> {
    resolve_lookback(now, DEFAULT_LOOKBACK_MONTHS)
}

/// Trailing window of `months` calendar months ending at `now`.
pub fn resolve_lookback(now: CalendarDate, months: u32) -> Result<DateRange, ValidationError> {
    Ok(DateRange::new(now.checked_sub_months(months)?, now))
}

/// Replace whichever bounds the user supplied.
pub fn apply_override(
    range: DateRange,
    user_start: Option<CalendarDate>,
    user_end: Option<CalendarDate>,
) -> DateRange {
    DateRange {
        start: user_start.unwrap_or(range.start),
        end: user_end.unwrap_or(range.end),
    }
}
