use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime};

use crate::ValidationError;

/// Calendar date (no time of day), serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    /// Today's date in UTC.
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, ValidationError> {
        let out_of_range = || ValidationError::DateOutOfRange { year, month, day };
        let month_value = Month::try_from(month).map_err(|_| out_of_range())?;
        Date::from_calendar_date(year, month_value, day)
            .map(Self)
            .map_err(|_| out_of_range())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let format = format_description!("[year]-[month]-[day]");
        Date::parse(input.trim(), &format)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    /// Step back `months` calendar months, clamping the day to the length of
    /// the target month (2024-02-29 minus 12 months is 2023-02-28).
    pub fn checked_sub_months(self, months: u32) -> Result<Self, ValidationError> {
        let index = i64::from(self.0.year()) * 12 + i64::from(u8::from(self.0.month())) - 1
            - i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).map_err(|_| self.out_of_range())?;
        let month = (index.rem_euclid(12) + 1) as u8;
        let month_value = Month::try_from(month).map_err(|_| self.out_of_range())?;
        let day = self
            .0
            .day()
            .min(time::util::days_in_year_month(year, month_value));

        Date::from_calendar_date(year, month_value, day)
            .map(Self)
            .map_err(|_| ValidationError::DateOutOfRange { year, month, day })
    }

    /// Unix timestamp of midnight UTC at the start of this date.
    pub fn unix_midnight(self) -> i64 {
        self.0.midnight().assume_utc().unix_timestamp()
    }

    pub fn is_weekend(self) -> bool {
        matches!(
            self.0.weekday(),
            time::Weekday::Saturday | time::Weekday::Sunday
        )
    }

    pub fn next_day(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    pub fn format_iso(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }

    fn out_of_range(self) -> ValidationError {
        ValidationError::DateOutOfRange {
            year: self.0.year(),
            month: u8::from(self.0.month()),
            day: self.0.day(),
        }
    }
}

impl From<Date> for CalendarDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
