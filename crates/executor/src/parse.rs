//! Parsing of caller-supplied request values

use chrono::{DateTime, Utc};
use logbook_core::time::parse_datetime;
use logbook_core::valid_entity_id;

use crate::{Error, Result};

/// Parse a date/time, reporting failure with `invalid`.
///
/// ```
/// use logbook_executor::{parse_time, Error};
///
/// let err = parse_time("soon", |value| Error::InvalidEndTime { value }).unwrap_err();
/// assert_eq!(err.error_code(), "invalid_end_time");
/// ```
pub fn parse_time<F>(value: &str, invalid: F) -> Result<DateTime<Utc>>
where
    F: FnOnce(String) -> Error,
{
    parse_datetime(value).ok_or_else(|| invalid(value.to_string()))
}

/// Split a comma-separated entity list, lower-case and validate each id.
pub fn parse_entity_ids(csv: &str) -> Result<Vec<String>> {
    csv.split(',')
        .map(|member| {
            let entity_id = member.trim().to_lowercase();
            if valid_entity_id(&entity_id) {
                Ok(entity_id)
            } else {
                Err(Error::InvalidEntityId {
                    value: member.trim().to_string(),
                })
            }
        })
        .collect()
}

/// Parse the `period` query value (days). Absent means one day.
pub(crate) fn parse_period(period: Option<&str>) -> Result<i64> {
    match period {
        None => Ok(1),
        Some(value) => value.trim().parse::<i64>().map_err(|_| Error::InvalidPeriod {
            value: value.to_string(),
        }),
    }
}
