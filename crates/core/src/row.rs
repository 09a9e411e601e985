//! Persisted rows
//!
//! A [`Row`] is one record as handed over by the query layer: either an
//! event (with an event payload) or a state change (with an entity id, a
//! state and an attribute payload). Payloads stay as raw strings here;
//! decoding happens lazily in the engine's event cache.
//!
//! Each payload comes in two columns. The `shared_*` column holds a
//! de-duplicated blob that many rows may reference byte-for-byte; the plain
//! column holds a per-row payload. At most one of the two is set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event_type::EventKind;
use crate::extract::{extract, Field};

/// A persisted event or state change.
///
/// Rows are immutable once read and are only valid for the duration of one
/// humanization pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Storage identity of the row, unique within one query result
    pub event_id: u64,
    /// Event type string (`state_changed`, `call_service`, ...)
    pub event_type: String,
    /// When the event fired. Non-decreasing within a query result.
    pub time_fired: DateTime<Utc>,
    /// Entity of a state change
    #[serde(default)]
    pub entity_id: Option<String>,
    /// New state of a state change
    #[serde(default)]
    pub state: Option<String>,
    /// Context this event was fired in
    #[serde(default)]
    pub context_id: Option<String>,
    /// User that caused the context
    #[serde(default)]
    pub context_user_id: Option<String>,
    /// Context that caused this context
    #[serde(default)]
    pub context_parent_id: Option<String>,
    /// De-duplicated event payload
    #[serde(default)]
    pub shared_data: Option<String>,
    /// Per-row event payload
    #[serde(default)]
    pub event_data: Option<String>,
    /// De-duplicated attribute payload
    #[serde(default)]
    pub shared_attrs: Option<String>,
    /// Per-row attribute payload
    #[serde(default)]
    pub attributes: Option<String>,
    /// Row was selected only to seed context resolution; never emitted.
    #[serde(default)]
    pub context_only: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Row {
    /// Create a bare row of the given type.
    pub fn new(event_id: u64, event_type: impl Into<String>, time_fired: DateTime<Utc>) -> Self {
        Self {
            event_id,
            event_type: event_type.into(),
            time_fired,
            entity_id: None,
            state: None,
            context_id: None,
            context_user_id: None,
            context_parent_id: None,
            shared_data: None,
            event_data: None,
            shared_attrs: None,
            attributes: None,
            context_only: false,
        }
    }

    /// Set the entity id and state of a state change row.
    pub fn with_state(mut self, entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self.state = Some(state.into());
        self
    }

    /// Set the context id.
    pub fn with_context(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    /// Set the context user id.
    pub fn with_context_user(mut self, user_id: impl Into<String>) -> Self {
        self.context_user_id = Some(user_id.into());
        self
    }

    /// Set the parent context id.
    pub fn with_context_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.context_parent_id = Some(parent_id.into());
        self
    }

    /// Set a per-row event payload.
    pub fn with_event_data(mut self, raw: impl Into<String>) -> Self {
        self.event_data = Some(raw.into());
        self.shared_data = None;
        self
    }

    /// Set a de-duplicated event payload.
    pub fn with_shared_data(mut self, raw: impl Into<String>) -> Self {
        self.shared_data = Some(raw.into());
        self.event_data = None;
        self
    }

    /// Set a per-row attribute payload.
    pub fn with_attributes(mut self, raw: impl Into<String>) -> Self {
        self.attributes = Some(raw.into());
        self.shared_attrs = None;
        self
    }

    /// Set a de-duplicated attribute payload.
    pub fn with_shared_attrs(mut self, raw: impl Into<String>) -> Self {
        self.shared_attrs = Some(raw.into());
        self.attributes = None;
        self
    }

    /// Mark the row as a context-seeding row.
    pub fn as_context_only(mut self) -> Self {
        self.context_only = true;
        self
    }

    /// Classify the row's event type.
    pub fn kind(&self) -> EventKind<'_> {
        EventKind::of(&self.event_type)
    }

    /// Raw event payload, preferring the shared blob.
    pub fn event_data_source(&self) -> Option<&str> {
        non_empty(&self.shared_data).or_else(|| non_empty(&self.event_data))
    }

    /// Raw attribute payload, preferring the shared blob.
    pub fn attributes_source(&self) -> Option<&str> {
        non_empty(&self.shared_attrs).or_else(|| non_empty(&self.attributes))
    }

    /// Extract a string field from the raw event payload.
    pub fn event_data_extract(&self, field: Field) -> Option<&str> {
        self.event_data_source().and_then(|raw| extract(raw, field))
    }

    /// Extract a string field from the raw attribute payload.
    pub fn attributes_extract(&self, field: Field) -> Option<&str> {
        self.attributes_source().and_then(|raw| extract(raw, field))
    }

    /// Whether `other` is the same event as `self`.
    ///
    /// Two rows are the same event when event type, context id and fire time
    /// all agree. This is the test for "is this row the origin of its own
    /// context".
    pub fn matches(&self, other: &Row) -> bool {
        self.event_type == other.event_type
            && self.context_id == other.context_id
            && self.time_fired == other.time_fired
    }
}
