//! Behavior-driven tests for date range selection
//!
//! These tests verify HOW the default lookback window is computed and how the
//! From/To overrides replace it.

use simple_stock_core::{
    apply_override, resolve_default_range, resolve_lookback, CalendarDate, DashboardConfig,
    DateRange, ValidationError, DEFAULT_LOOKBACK_MONTHS,
};

fn date(raw: &str) -> CalendarDate {
    CalendarDate::parse(raw).expect("valid date")
}

// =============================================================================
// Date Range: Default window
// =============================================================================

#[test]
fn when_no_dates_are_chosen_range_covers_the_last_twelve_months() {
    // Given: Today is 2023-06-15
    let today = date("2023-06-15");

    // When: The default range is resolved
    let range = resolve_default_range(today).expect("range");

    // Then: The window runs from the same day last year to today
    assert_eq!(range, DateRange::new(date("2022-06-15"), date("2023-06-15")));
}

#[test]
fn when_today_is_a_leap_day_start_clamps_to_end_of_february() {
    // Given: Today is 2024-02-29
    let today = date("2024-02-29");

    // When: The default range is resolved
    let range = resolve_default_range(today).expect("range");

    // Then: The start is the last day of February in the prior year
    assert_eq!(range.start, date("2023-02-28"));
    assert_eq!(range.end, today);
}

#[test]
fn month_end_days_clamp_in_shorter_months() {
    // Given: A month-end date and a short lookback
    let today = date("2023-03-31");

    // When: Looking back one month
    let range = resolve_lookback(today, 1).expect("range");

    // Then: The start lands on the last day of February
    assert_eq!(range.start, date("2023-02-28"));
}

#[test]
fn configured_lookback_matches_default_window() {
    // Given: The default dashboard configuration
    let config = DashboardConfig::default();
    let today = date("2021-12-31");

    // When: Resolving with the configured lookback
    let configured = resolve_lookback(today, config.lookback_months).expect("range");

    // Then: It equals the default range
    assert_eq!(config.lookback_months, DEFAULT_LOOKBACK_MONTHS);
    assert_eq!(configured, resolve_default_range(today).expect("range"));
}

// =============================================================================
// Date Range: User overrides
// =============================================================================

#[test]
fn when_only_to_is_chosen_from_keeps_its_default() {
    // Given: The default range
    let range = resolve_default_range(date("2023-06-15")).expect("range");

    // When: Only the To date is overridden
    let updated = apply_override(range, None, Some(date("2023-01-31")));

    // Then: From is unchanged and To is replaced
    assert_eq!(updated.start, date("2022-06-15"));
    assert_eq!(updated.end, date("2023-01-31"));
}

#[test]
fn when_both_dates_are_chosen_both_are_replaced() {
    let range = resolve_default_range(date("2023-06-15")).expect("range");

    let updated = apply_override(range, Some(date("2022-01-01")), Some(date("2022-01-10")));

    assert_eq!(updated, DateRange::new(date("2022-01-01"), date("2022-01-10")));
}

#[test]
fn out_of_order_overrides_pass_through_unchanged() {
    // Given: The default range
    let range = resolve_default_range(date("2023-06-15")).expect("range");

    // When: From is moved after To
    let updated = apply_override(range, Some(date("2023-07-01")), None);

    // Then: Nothing is swapped or rejected
    assert_eq!(updated.start, date("2023-07-01"));
    assert_eq!(updated.end, date("2023-06-15"));
}

#[test]
fn malformed_date_input_is_a_validation_error() {
    // Given/When: A date string that is not YYYY-MM-DD
    let error = CalendarDate::parse("15/06/2023").expect_err("invalid format");

    // Then: The raw value is reported back
    assert_eq!(
        error,
        ValidationError::InvalidDate {
            value: String::from("15/06/2023")
        }
    );
}
