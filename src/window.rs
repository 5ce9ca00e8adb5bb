//! Half-open time windows for the analytical views.
//!
//! The views filter event and price timestamps with
//! `ts >= start AND ts < end`; these helpers turn validated (month, year)
//! or day inputs into those bounds so that range checks happen once at the
//! boundary instead of per row inside the queries.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ApiError;

// ---

/// Bounds for one calendar month: first of the month at midnight up to
/// (but excluding) the first of the next month.
///
/// Rejects month values outside 1..=12 and years chrono cannot represent.
pub fn month_window(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime), ApiError> {
    // ---
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ApiError::Validation(format!("invalid month/year: {month}/{year}")))?;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| ApiError::Validation(format!("invalid month/year: {month}/{year}")))?;

    Ok((start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN)))
}

/// Bounds for one calendar day: midnight up to (but excluding) the next
/// midnight.
pub fn day_window(day: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime), ApiError> {
    // ---
    let end = day
        .succ_opt()
        .ok_or_else(|| ApiError::Validation(format!("day out of range: {day}")))?;

    Ok((day.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN)))
}
