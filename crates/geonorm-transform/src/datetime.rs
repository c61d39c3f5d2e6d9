//! Timestamp parsing for the primary date column.
//!
//! Output timestamps are epoch milliseconds. Parsing is per-record and
//! non-fatal: an unparseable cell yields `None`.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

use geonorm_model::DateKind;

/// Parse one date cell into epoch milliseconds.
///
/// `Date` cells parse with the annotation's strftime-style format,
/// first as a full datetime and then as a bare date at midnight UTC.
/// `Epoch` cells pass through as milliseconds. `Year` cells anchor to
/// January 1st; `Month` and `Day` are component columns that cannot
/// stand alone as a timestamp.
pub fn parse_timestamp_ms(value: &str, kind: DateKind, time_format: Option<&str>) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let result = match kind {
        DateKind::Epoch => value
            .parse::<i64>()
            .ok()
            .or_else(|| value.parse::<f64>().ok().map(|v| v.trunc() as i64)),
        DateKind::Date => {
            let format = time_format?;
            NaiveDateTime::parse_from_str(value, format)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(value, format)
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
                .map(|datetime| datetime.and_utc().timestamp_millis())
        }
        DateKind::Year => value
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|datetime| datetime.and_utc().timestamp_millis()),
        DateKind::Month | DateKind::Day => None,
    };
    if result.is_none() {
        trace!(value, ?kind, "unparseable date cell");
    }
    result
}
