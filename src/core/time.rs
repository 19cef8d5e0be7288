//! Timestamp parsing and formatting for query cursors and record timestamps.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Timelike};

use crate::core::SgError;

/// The format `start`/`end` are sent in: UTC, second precision, no offset suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render a cursor value for the query string.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Drop sub-second precision.
pub fn truncate_to_second(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Parse a timestamp as sent by the API or supplied by a caller.
///
/// Offsets are converted to UTC; the result is truncated to whole seconds. Accepted:
/// RFC 3339 (`2021-06-20T00:05:00Z`), offset with a space separator
/// (`2021-06-20 00:05:00+00:00`), naive date-times with either separator and optional
/// fraction, and bare dates (taken as midnight).
///
/// # Errors
///
/// Returns `SgError::InvalidTimestamp` if no format matches.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, SgError> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(truncate_to_second(dt.naive_utc()));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(truncate_to_second(dt.naive_utc()));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(truncate_to_second(ts));
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(chrono::NaiveTime::MIN));
    }

    Err(SgError::InvalidTimestamp(raw.to_string()))
}

/// Cursor used when a price-metrics page comes back empty: 23:00:00 on the day before `end`.
///
/// # Errors
///
/// Returns `SgError::InvalidTimestamp` if `end` is at the start of the representable range.
pub fn gap_cursor(end: NaiveDateTime) -> Result<NaiveDateTime, SgError> {
    end.date()
        .checked_sub_days(Days::new(1))
        .and_then(|d| d.and_hms_opt(23, 0, 0))
        .ok_or_else(|| SgError::InvalidTimestamp(format!("no day before {end}")))
}
