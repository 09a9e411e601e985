//! Row selection for logbook queries
//!
//! Three query shapes are supported, matching the recorder's logbook
//! statements:
//!
//! - context: every row of one context
//! - entities: rows naming the requested entities, plus `context_only`
//!   copies of other rows in their contexts
//! - everything else: requested event types and filtered state rows
//!
//! Input rows must already be sorted by `time_fired`; the output keeps that
//! order.

use logbook_core::entity_id::split_entity_id;
use logbook_core::event_type::{ATTR_UNIT_OF_MEASUREMENT, EVENT_CALL_SERVICE, SENSOR_DOMAIN};
use logbook_core::extract::Field;
use logbook_core::{EventKind, EventQuery, Row};
use rustc_hash::FxHashSet;

/// Select and copy the rows answering `query`.
pub fn select(rows: &[Row], query: &EventQuery) -> Vec<Row> {
    let window = window(rows, query);

    if let Some(context_id) = &query.context_id {
        return window
            .iter()
            .filter(|row| row.context_id.as_deref() == Some(context_id.as_str()))
            .filter(|row| is_state(row) || query.wants_event_type(&row.event_type))
            .cloned()
            .collect();
    }

    if let Some(entity_ids) = &query.entity_ids {
        return select_entities(window, query, entity_ids);
    }

    window
        .iter()
        .filter(|row| {
            if is_state(row) {
                state_row_selected(row, query)
            } else {
                row.event_type == EVENT_CALL_SERVICE || query.wants_event_type(&row.event_type)
            }
        })
        .cloned()
        .collect()
}

fn window<'a>(rows: &'a [Row], query: &EventQuery) -> &'a [Row] {
    let lo = rows.partition_point(|r| r.time_fired < query.start);
    let hi = rows.partition_point(|r| r.time_fired < query.end);
    if lo >= hi {
        &[]
    } else {
        &rows[lo..hi]
    }
}

fn is_state(row: &Row) -> bool {
    matches!(row.kind(), EventKind::StateChanged)
}

fn state_row_selected(row: &Row, query: &EventQuery) -> bool {
    let Some(entity_id) = row.entity_id.as_deref() else {
        return false;
    };
    if let Some(filter) = &query.filter {
        if !filter.accepts(entity_id) {
            return false;
        }
    }
    !(split_entity_id(entity_id).0 == SENSOR_DOMAIN && has_unit_of_measurement(row))
}

fn has_unit_of_measurement(row: &Row) -> bool {
    let needle = format!("\"{}\"", ATTR_UNIT_OF_MEASUREMENT);
    row.attributes_source()
        .map(|raw| raw.contains(&needle))
        .unwrap_or(false)
}

fn select_entities(window: &[Row], query: &EventQuery, entity_ids: &[String]) -> Vec<Row> {
    let wanted: FxHashSet<&str> = entity_ids.iter().map(String::as_str).collect();

    let names_entity = |row: &Row| -> bool {
        if is_state(row) {
            row.entity_id
                .as_deref()
                .map(|id| wanted.contains(id))
                .unwrap_or(false)
        } else {
            query.wants_event_type(&row.event_type)
                && row
                    .event_data_extract(Field::EntityId)
                    .map(|id| wanted.contains(id))
                    .unwrap_or(false)
        }
    };

    let contexts: FxHashSet<&str> = window
        .iter()
        .filter(|row| names_entity(row))
        .filter_map(|row| row.context_id.as_deref())
        .collect();

    window
        .iter()
        .filter_map(|row| {
            if names_entity(row) {
                Some(row.clone())
            } else if row
                .context_id
                .as_deref()
                .map(|id| contexts.contains(id))
                .unwrap_or(false)
            {
                Some(row.clone().as_context_only())
            } else {
                None
            }
        })
        .collect()
}
