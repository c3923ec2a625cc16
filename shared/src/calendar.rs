//! Calendar helpers shared by the derived-state computations
//!
//! Every comparison is made on calendar dates in the caller's local time;
//! callers pass `today` explicitly so results are reproducible.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// First day of a calendar week
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// en-US convention, used unless configured otherwise
    #[default]
    Sunday,
    Monday,
}

/// Inclusive first and last day of the week containing `day`
pub fn week_bounds(day: NaiveDate, week_start: WeekStart) -> (NaiveDate, NaiveDate) {
    let offset = match week_start {
        WeekStart::Sunday => day.weekday().num_days_from_sunday(),
        WeekStart::Monday => day.weekday().num_days_from_monday(),
    };
    let start = day - Duration::days(i64::from(offset));
    (start, start + Duration::days(6))
}

/// Whether `date` falls in the same calendar week as `today`
pub fn is_same_week(date: NaiveDate, today: NaiveDate, week_start: WeekStart) -> bool {
    let (start, end) = week_bounds(today, week_start);
    date >= start && date <= end
}

/// Whether `date` falls in the same calendar month and year as `today`
pub fn is_same_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

/// `YYYY-MM` bucket key; sorts chronologically as a string
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Short display label for a month, e.g. `Jan 2024`
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", year, month))
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}
