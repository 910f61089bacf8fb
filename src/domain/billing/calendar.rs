//! Calendar arithmetic for billing dates.
//!
//! Month arithmetic clamps to the last valid day of the target month
//! (Jan 31 + 1 month = Feb 28/29). Occurrences are always computed from the
//! original anchor, never from the previous occurrence, so a 31st anchor
//! returns to the 31st in months that have one.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};

use crate::domain::subscription::BillingInterval;

use super::BillingError;

/// Returns `anchor` advanced by `k` billing intervals.
pub fn add_intervals(
    anchor: NaiveDate,
    interval: BillingInterval,
    k: u32,
) -> Result<NaiveDate, BillingError> {
    let months = u64::from(interval.months()) * u64::from(k);
    let out_of_range = || BillingError::OutOfRange { anchor, months };
    let months = u32::try_from(months).map_err(|_| out_of_range())?;
    anchor
        .checked_add_months(Months::new(months))
        .ok_or_else(out_of_range)
}

/// Parses a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps contribute the date as written, without shifting zones.
pub fn parse_calendar_date(field: &str, text: &str) -> Result<NaiveDate, BillingError> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.date());
    }
    Err(BillingError::invalid_date(field, text))
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
