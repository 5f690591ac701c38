// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.
//!
//! Local times are always resolved against an IANA zone per timestamp, so
//! the UTC offset follows daylight-saving changes.

use chrono::{
    DateTime, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;

/// Offset-less ISO 8601 layouts accepted for stored timestamps.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format a local time as a two-digit clock time with AM/PM marker ("08:05 AM").
pub fn format_clock_time(at: &DateTime<Tz>) -> String {
    at.format("%I:%M %p").to_string()
}

/// Parse an ISO 8601 timestamp into the display zone.
///
/// Strings carrying an offset (RFC3339) are converted; naive strings are
/// wall-clock times in `tz`.
pub fn parse_local_timestamp(raw: &str, tz: &Tz) -> Result<DateTime<Tz>, chrono::ParseError> {
    let raw = raw.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(tz)),
        Err(rfc_err) => NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| resolve_wall_clock(&naive, tz))
            .ok_or(rfc_err),
    }
}

/// Pin a wall-clock time to an instant in `tz`.
///
/// A repeated hour (fall back) takes the earlier instant. A skipped hour
/// (spring forward) is read with the offset in force before the jump, so
/// 02:30 on a 02:00→03:00 night lands at 03:30.
fn resolve_wall_clock(naive: &NaiveDateTime, tz: &Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(*naive - TimeDelta::hours(24)))
                .fix();
            let utc = *naive - TimeDelta::seconds(i64::from(before.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}

/// Parse an IANA zone name such as `America/Los_Angeles` or `UTC`.
pub fn parse_time_zone(raw: &str) -> Option<Tz> {
    raw.trim().parse::<Tz>().ok()
}
