//! Contract with the query layer
//!
//! The engine never builds queries or talks to storage. It describes what it
//! needs as an [`EventQuery`] and pulls rows from whatever implements
//! [`RowSource`]: an in-memory store, or a database cursor.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::filter::EntityFilter;
use crate::row::Row;

/// Lazily produced rows, ordered by `time_fired` ascending.
///
/// Fetching the next row is the only point where a humanization pass can
/// block.
pub type Rows<'a> = Box<dyn Iterator<Item = Result<Row>> + 'a>;

/// Rows requested for one humanization pass.
#[derive(Debug, Clone)]
pub struct EventQuery {
    /// Inclusive lower bound on `time_fired`
    pub start: DateTime<Utc>,
    /// Exclusive upper bound on `time_fired`
    pub end: DateTime<Utc>,
    /// Event types to select, besides state changes
    pub event_types: Vec<String>,
    /// Restrict to these entities (plus context-only seeding rows)
    pub entity_ids: Option<Vec<String>>,
    /// Restrict to one context
    pub context_id: Option<String>,
    /// Configured filter applied to state rows by the query layer
    pub filter: Option<EntityFilter>,
}

impl EventQuery {
    /// Query for a time window with no further restriction.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            event_types: Vec::new(),
            entity_ids: None,
            context_id: None,
            filter: None,
        }
    }

    /// Whether `time` falls in `[start, end)`.
    pub fn in_window(&self, time: &DateTime<Utc>) -> bool {
        *time >= self.start && *time < self.end
    }

    /// Whether the event type was requested.
    pub fn wants_event_type(&self, event_type: &str) -> bool {
        self.event_types.iter().any(|t| t == event_type)
    }
}

/// Something that can produce rows for a query.
pub trait RowSource {
    /// Open a row stream for `query`.
    ///
    /// The stream is consumed once. Errors are yielded in-band and abort the
    /// pass.
    fn rows<'a>(&'a self, query: &EventQuery) -> Result<Rows<'a>>;
}

impl RowSource for Vec<Row> {
    fn rows<'a>(&'a self, _query: &EventQuery) -> Result<Rows<'a>> {
        Ok(Box::new(self.iter().cloned().map(Ok)))
    }
}
