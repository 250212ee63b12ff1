// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Midnight (in `tz`) of the calendar day containing `ms`.
///
/// Returns `None` if `ms` is outside chrono's representable range.
pub fn local_midnight_ms<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<i64> {
    let date = DateTime::from_timestamp_millis(ms)?
        .with_timezone(tz)
        .date_naive();
    midnight_of_date(date, tz)
}

/// Start of `date` in `tz`, in milliseconds since the Unix epoch.
///
/// When a DST transition skips midnight the first instant of the day is used.
pub fn midnight_of_date<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<i64> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => Some(dt.timestamp_millis()),
        None => (1..=3)
            .filter_map(|h| date.and_hms_opt(h, 0, 0))
            .find_map(|t| tz.from_local_datetime(&t).earliest())
            .map(|dt| dt.timestamp_millis()),
    }
}
