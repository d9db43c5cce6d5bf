//! Date and time helpers for order records
//!
//! Orders carry `date` and `time` as separate free-form strings written by
//! the ordering front end. They are combined and parsed against a fixed set
//! of formats, as local wall-clock time.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};

/// Date formats accepted in the `date` field
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Time formats accepted in the `time` field
const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S",
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
];

/// Current local wall-clock time
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse `date` + `time` into a point in time
///
/// Returns `None` when no known format matches; callers decide what an
/// order of unknown age means.
pub fn parse_order_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let combined = format!("{} {}", date.trim(), time.trim());

    DATE_FORMATS.iter().find_map(|date_fmt| {
        TIME_FORMATS.iter().find_map(|time_fmt| {
            NaiveDateTime::parse_from_str(&combined, &format!("{date_fmt} {time_fmt}")).ok()
        })
    })
}

/// Parse just the calendar date of an order
pub fn parse_order_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    // ISO timestamps in the date field: keep the calendar part
    let date = date.split_once('T').map_or(date, |(day, _)| day);

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
}

/// Short US-style date (`M/D/YYYY`) used for display and search
///
/// Falls back to the raw string when the date does not parse.
pub fn localized_date(date: &str) -> String {
    match parse_order_date(date) {
        Some(day) => day.format("%-m/%-d/%Y").to_string(),
        None => date.to_string(),
    }
}

/// Whether `ts` is no older than `window` at `now` (boundary inclusive)
///
/// Timestamps in the future always count as recent.
pub fn within_window(ts: NaiveDateTime, now: NaiveDateTime, window: TimeDelta) -> bool {
    now.signed_duration_since(ts) <= window
}
