//! `get_events`: query the row source and humanize the result
//!
//! Both transport commands end up here. The request is assumed to be
//! validated already, except for the `entity_ids`/`context_id` exclusion,
//! which is checked before the row source is touched.

use chrono::{DateTime, Utc};
use logbook_core::event_type::ALL_EVENT_TYPES_EXCEPT_STATE_CHANGED;
use logbook_core::{EntityFilter, Error, EventQuery, LogbookEntry, Result, RowSource, TimeFormat};
use tracing::debug;

use crate::humanize::Humanizer;
use crate::metadata::EntityMetadata;
use crate::registry::DescriberRegistry;

/// Parameters of one `get_events` call.
#[derive(Debug, Clone)]
pub struct EventsRequest {
    /// Inclusive start of the window
    pub start: DateTime<Utc>,
    /// Exclusive end of the window
    pub end: DateTime<Utc>,
    /// Only these entities
    pub entity_ids: Option<Vec<String>>,
    /// Only this context
    pub context_id: Option<String>,
    /// Configured filter handed to the row source for state rows
    pub filters: Option<EntityFilter>,
    /// Configured filter applied to event rows during the pass
    pub entities_filter: Option<EntityFilter>,
    /// How `when` is rendered
    pub time_format: TimeFormat,
}

impl EventsRequest {
    /// Unfiltered request for a window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            entity_ids: None,
            context_id: None,
            filters: None,
            entities_filter: None,
            time_format: TimeFormat::Iso,
        }
    }

    /// Apply one configured filter both at the source and during the pass.
    pub fn with_filter(mut self, filter: Option<EntityFilter>) -> Self {
        self.filters = filter.clone();
        self.entities_filter = filter;
        self
    }

    /// Restrict to entities.
    pub fn with_entity_ids(mut self, entity_ids: Vec<String>) -> Self {
        self.entity_ids = Some(entity_ids);
        self
    }

    /// Restrict to a context.
    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    /// Render `when` with `format`.
    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }
}

/// Query `source` for the request window and humanize every row.
///
/// Requested entity ids replace the configured filters: the pass then only
/// keeps events naming one of those entities.
///
/// # Errors
///
/// - [`Error::InvalidInput`] when both `entity_ids` and `context_id` are set,
///   before any row is fetched
/// - any error from the row source or from payload decoding
pub fn get_events(
    source: &dyn RowSource,
    registry: &DescriberRegistry,
    metadata: &dyn EntityMetadata,
    request: &EventsRequest,
) -> Result<Vec<LogbookEntry>> {
    if request.entity_ids.is_some() && request.context_id.is_some() {
        return Err(Error::invalid_input(
            "entity_ids and context_id cannot be combined",
        ));
    }

    let mut event_types: Vec<String> = ALL_EVENT_TYPES_EXCEPT_STATE_CHANGED
        .iter()
        .map(|t| t.to_string())
        .collect();
    event_types.extend(registry.event_types());

    let (filters, entities_filter) = match &request.entity_ids {
        Some(ids) => (None, Some(EntityFilter::from_entity_ids(ids.iter().cloned()))),
        None => (request.filters.clone(), request.entities_filter.clone()),
    };

    let query = EventQuery {
        start: request.start,
        end: request.end,
        event_types,
        entity_ids: request.entity_ids.clone(),
        context_id: request.context_id.clone(),
        filter: filters,
    };
    debug!(
        start = %query.start,
        end = %query.end,
        event_types = ?query.event_types,
        entity_ids = ?query.entity_ids,
        context_id = ?query.context_id,
        filtered = query.filter.is_some(),
        "logbook row query"
    );

    let rows = source.rows(&query)?;
    let entries = Humanizer::new(rows, registry, metadata)
        .with_entities_filter(entities_filter.as_ref())
        .with_time_format(request.time_format)
        .collect::<Result<Vec<_>>>()?;

    debug!(entries = entries.len(), "logbook entries produced");
    Ok(entries)
}
