//! Query handlers: get_events and logbook

use chrono::{DateTime, Duration, Utc};
use logbook_core::time::start_of_day;
use logbook_core::TimeFormat;
use logbook_engine::EventsRequest;
use tracing::debug;

use crate::parse::{parse_entity_ids, parse_period, parse_time};
use crate::{Error, Executor, Output, Result};

// =============================================================================
// Individual Handlers
// =============================================================================

/// Handle GetEvents command.
pub fn get_events(
    executor: &Executor,
    start_time: String,
    end_time: Option<String>,
    entity_ids: Option<Vec<String>>,
    context_id: Option<String>,
) -> Result<Output> {
    let now = (executor.clock)();
    let start = parse_time(&start_time, |value| Error::InvalidStartTime { value })?;
    let end = match end_time {
        Some(value) => parse_time(&value, |value| Error::InvalidEndTime { value })?,
        None => now,
    };
    let entity_ids = entity_ids.filter(|ids| !ids.is_empty());
    check_exclusive(&entity_ids, &context_id)?;

    if start > now {
        debug!(start = %start, now = %now, "start_time in the future, nothing to fetch");
        return Ok(Output::Entries(Vec::new()));
    }

    run(executor, start, end, entity_ids, context_id, TimeFormat::Timestamp)
}

/// Handle Logbook command.
pub fn logbook(
    executor: &Executor,
    datetime: Option<String>,
    period: Option<String>,
    entity: Option<String>,
    end_time: Option<String>,
    context_id: Option<String>,
) -> Result<Output> {
    let anchor = match datetime {
        Some(value) => parse_time(&value, |value| Error::InvalidDatetime { value })?,
        None => start_of_day(&(executor.clock)()),
    };
    let period = parse_period(period.as_deref())?;
    let entity_ids = match entity.as_deref().map(str::trim) {
        Some(csv) if !csv.is_empty() => Some(parse_entity_ids(csv)?),
        _ => None,
    };

    let (start, end) = match end_time {
        None => period_window(anchor, period)?,
        Some(value) => (
            anchor,
            parse_time(&value, |value| Error::InvalidEndTime { value })?,
        ),
    };
    check_exclusive(&entity_ids, &context_id)?;

    run(executor, start, end, entity_ids, context_id, TimeFormat::Iso)
}

// =============================================================================
// Helpers
// =============================================================================

fn check_exclusive(entity_ids: &Option<Vec<String>>, context_id: &Option<String>) -> Result<()> {
    if entity_ids.is_some() && context_id.is_some() {
        return Err(Error::ConflictingFilters);
    }
    Ok(())
}

/// `[anchor - (period - 1) days, start + period days)`
fn period_window(anchor: DateTime<Utc>, period: i64) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = period
        .checked_sub(1)
        .and_then(Duration::try_days)
        .and_then(|back| anchor.checked_sub_signed(back));
    let end = start.and_then(|start| {
        Duration::try_days(period).and_then(|span| start.checked_add_signed(span))
    });
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(Error::InvalidPeriod {
            value: period.to_string(),
        }),
    }
}

fn run(
    executor: &Executor,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    entity_ids: Option<Vec<String>>,
    context_id: Option<String>,
    time_format: TimeFormat,
) -> Result<Output> {
    let mut request = EventsRequest::new(start, end)
        .with_filter(executor.filter.clone())
        .with_time_format(time_format);
    request.entity_ids = entity_ids;
    request.context_id = context_id;

    let entries = logbook_engine::get_events(
        executor.store.as_ref(),
        &executor.registry,
        executor.metadata.as_ref(),
        &request,
    )?;
    Ok(Output::Entries(entries))
}
