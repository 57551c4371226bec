//! Date parsing and calendar arithmetic.
//!
//! Record dates arrive as free strings from the store. Parsing never fails
//! loudly: an unparseable value yields `None` and callers treat it as
//! "matches nothing".

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Formats accepted for local date-times without an offset.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a record date into its calendar day.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` and RFC 3339.
/// Offset-bearing values are normalized to UTC before taking the day.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Parse a record date into an instant. Date-only values resolve to
/// midnight UTC of that day.
pub fn parse_instant(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Format a day the way the store expects date fields (`YYYY-MM-DD`).
pub fn format_store_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// MonthRef
// ---------------------------------------------------------------------------

/// A calendar month, represented by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthRef(NaiveDate);

impl MonthRef {
    /// Build a month from a year and a 1-based month number.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| CoreError::Validation(format!("Invalid month {year}-{month:02}")))
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The month containing `now` (UTC).
    pub fn current(now: Timestamp) -> Self {
        Self::of(now.date_naive())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Every day of the month in ascending order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let month = self.0.month();
        self.0.iter_days().take_while(move |d| d.month() == month)
    }

    pub fn last_day(self) -> NaiveDate {
        self.days().last().unwrap_or(self.0)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.0.year() && date.month() == self.0.month()
    }

    /// Blank cells before day 1 in a Sunday-first week grid.
    pub fn leading_blank_days(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn next(self) -> Self {
        self.0.checked_add_months(Months::new(1)).map(Self).unwrap_or(self)
    }

    pub fn prev(self) -> Self {
        self.0.checked_sub_months(Months::new(1)).map(Self).unwrap_or(self)
    }
}

impl Serialize for MonthRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.format("%Y-%m").to_string())
    }
}

impl<'de> Deserialize<'de> for MonthRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::Validation(format!(
                "Range start {start} is after range end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days` days ending today, e.g. the default 30-day reports window.
    pub fn trailing_days(today: NaiveDate, days: u64) -> Self {
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(today);
        Self { start, end: today }
    }

    /// Whether the period `[start, end]` lies entirely inside the range.
    pub fn covers(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start >= self.start && end <= self.end
    }
}
