//! Time rendering and parsing
//!
//! Entries carry their fire time either as an ISO-8601 UTC string or as a
//! numeric Unix timestamp, chosen once per request and applied to every
//! entry. Parsing is lenient in the same way the transport layer is:
//! RFC 3339 with an offset, or a naive date/time taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::entry::When;

/// How `when` is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// `2022-04-15T05:20:00.123456+00:00`
    #[default]
    Iso,
    /// `1650000000.123456`
    Timestamp,
}

impl TimeFormat {
    /// Pick the format from the transport's "timestamp" flag.
    pub fn from_timestamp_flag(timestamp: bool) -> Self {
        if timestamp {
            TimeFormat::Timestamp
        } else {
            TimeFormat::Iso
        }
    }

    /// Render a fire time.
    pub fn format(self, time_fired: &DateTime<Utc>) -> When {
        match self {
            TimeFormat::Iso => When::Iso(to_utc_isoformat(time_fired)),
            TimeFormat::Timestamp => When::Timestamp(to_timestamp(time_fired)),
        }
    }
}

/// ISO-8601 with an explicit `+00:00` offset; microseconds only when non-zero.
pub fn to_utc_isoformat(time: &DateTime<Utc>) -> String {
    if time.nanosecond() / 1_000 == 0 {
        time.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
    } else {
        time.format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
    }
}

/// Seconds since the Unix epoch with microsecond precision.
pub fn to_timestamp(time: &DateTime<Utc>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_micros()) / 1_000_000.0
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a caller-supplied date/time.
///
/// Accepts RFC 3339 (`Z` or numeric offset), naive date-times and bare
/// dates. Naive values are taken as UTC. Returns `None` when nothing matches.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Midnight (UTC) of the day containing `now`.
pub fn start_of_day(now: &DateTime<Utc>) -> DateTime<Utc> {
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| now.naive_utc());
    Utc.from_utc_datetime(&midnight)
}
