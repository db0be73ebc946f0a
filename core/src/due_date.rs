//! Codec for the remote `dueDate` array.
//!
//! The wire form is `[encoded, year, month, day, hour, minute]`. `encoded` is
//! the decimal concatenation of year, month and day without zero padding, so
//! 2024-03-01 becomes `202431`. The server expects exactly that, ambiguity
//! included: 2024-12-1 and 2024-1-21 both encode to `2024121`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{ApiError, Result};

/// Number of elements in a wire due date.
pub const DUE_DATE_LEN: usize = 6;

/// Reads a wire due date. The leading encoded integer is ignored.
pub fn decode(values: &[i64]) -> Result<NaiveDateTime> {
    if values.len() != DUE_DATE_LEN {
        return Err(malformed(
            values,
            format!("expected {DUE_DATE_LEN} elements, got {}", values.len()),
        ));
    }

    let year = i32::try_from(values[1]).map_err(|_| malformed(values, "year out of range"))?;
    let [month, day, hour, minute] = [values[2], values[3], values[4], values[5]]
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX));

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| malformed(values, "invalid calendar date"))?
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| malformed(values, "invalid time of day"))
}

/// Writes a due date in wire form. Seconds are dropped.
pub fn encode(due: &NaiveDateTime) -> [i64; DUE_DATE_LEN] {
    let (year, month, day) = (due.year(), due.month(), due.day());
    [
        encoded_day(year, month, day),
        i64::from(year),
        i64::from(month),
        i64::from(day),
        i64::from(due.hour()),
        i64::from(due.minute()),
    ]
}

fn encoded_day(year: i32, month: u32, day: u32) -> i64 {
    // At most 11 digits plus a sign, always fits.
    format!("{year}{month}{day}").parse().unwrap_or_default()
}

fn malformed(values: &[i64], reason: impl Into<String>) -> ApiError {
    ApiError::MalformedDueDate {
        values: values.to_vec(),
        reason: reason.into(),
    }
}
