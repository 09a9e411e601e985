//! Borrowed view of one row with its decoded payload

use logbook_core::{EventData, Row};
use serde_json::Value;

/// A row plus its decoded event payload.
///
/// The payload is owned by the pass's [`EventCache`](crate::EventCache);
/// rows whose payload bytes are identical share the same decoded map.
#[derive(Debug, Clone, Copy)]
pub struct LazyEventPayload<'a> {
    row: &'a Row,
    data: &'a EventData,
}

impl<'a> LazyEventPayload<'a> {
    pub(crate) fn new(row: &'a Row, data: &'a EventData) -> Self {
        Self { row, data }
    }

    /// The underlying row
    pub fn row(&self) -> &'a Row {
        self.row
    }

    /// Event type string
    pub fn event_type(&self) -> &'a str {
        &self.row.event_type
    }

    /// Entity id of a state change
    pub fn entity_id(&self) -> Option<&'a str> {
        self.row.entity_id.as_deref()
    }

    /// New state of a state change
    pub fn state(&self) -> Option<&'a str> {
        self.row.state.as_deref()
    }

    /// Context id
    pub fn context_id(&self) -> Option<&'a str> {
        self.row.context_id.as_deref()
    }

    /// Context user id
    pub fn context_user_id(&self) -> Option<&'a str> {
        self.row.context_user_id.as_deref()
    }

    /// Parent context id
    pub fn context_parent_id(&self) -> Option<&'a str> {
        self.row.context_parent_id.as_deref()
    }

    /// Decoded event payload. Empty when the row carries none.
    pub fn data(&self) -> &'a EventData {
        self.data
    }

    /// A payload value, if present and a string.
    pub fn data_str(&self, key: &str) -> Option<&'a str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// Render a payload value as entry text. `null` is absent.
pub(crate) fn value_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
