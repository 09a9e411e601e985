//! Output entries
//!
//! A [`LogbookEntry`] is what the humanizer emits for one row. Fields are
//! serialized in declaration order and omitted when absent, so the JSON
//! shape of an entry depends on the event kind and on what context could be
//! resolved. Only `when` is always present.

use serde::{Deserialize, Serialize};

/// Rendered fire time of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum When {
    /// ISO-8601 UTC string
    Iso(String),
    /// Seconds since the Unix epoch
    Timestamp(f64),
}

impl When {
    /// The ISO string, if this is an ISO time.
    pub fn as_iso(&self) -> Option<&str> {
        match self {
            When::Iso(s) => Some(s),
            When::Timestamp(_) => None,
        }
    }

    /// The numeric timestamp, if this is a numeric time.
    pub fn as_timestamp(&self) -> Option<f64> {
        match self {
            When::Iso(_) => None,
            When::Timestamp(ts) => Some(*ts),
        }
    }
}

/// One human-readable logbook entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogbookEntry {
    /// Fire time of the row
    pub when: When,
    /// Display name of the entity or event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// New state, for state changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Entity the entry concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Domain the entry belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Icon from the state attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// User that triggered the context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_user_id: Option<String>,
    /// Entity whose event caused this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_entity_id: Option<String>,
    /// Display name of `context_entity_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_entity_id_name: Option<String>,
    /// Event type of the causing event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_event_type: Option<String>,
    /// Domain of the causing service call or described event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_domain: Option<String>,
    /// Service of the causing service call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_service: Option<String>,
    /// Name of the causing described event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_name: Option<String>,
}

impl LogbookEntry {
    /// Create an entry carrying only its time.
    pub fn new(when: When) -> Self {
        Self {
            when,
            name: None,
            message: None,
            state: None,
            entity_id: None,
            domain: None,
            icon: None,
            context_user_id: None,
            context_entity_id: None,
            context_entity_id_name: None,
            context_event_type: None,
            context_domain: None,
            context_service: None,
            context_name: None,
        }
    }

    /// Build an entry from a describer's partial output.
    pub fn from_description(when: When, domain: &str, description: Description) -> Self {
        Self {
            name: description.name,
            message: description.message,
            entity_id: description.entity_id,
            icon: description.icon,
            domain: Some(domain.to_string()),
            ..Self::new(when)
        }
    }

    /// Whether any `context_*` field is set.
    pub fn has_context(&self) -> bool {
        self.context_entity_id.is_some()
            || self.context_event_type.is_some()
            || self.context_domain.is_some()
            || self.context_service.is_some()
            || self.context_name.is_some()
    }
}

/// Partial entry produced by an external describer.
///
/// The humanizer stamps `when` and `domain` onto it and resolves context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// Display name of the described event
    pub name: Option<String>,
    /// Human-readable message
    pub message: Option<String>,
    /// Entity the event concerns, used for context resolution
    pub entity_id: Option<String>,
    /// Icon override
    pub icon: Option<String>,
}

impl Description {
    /// Shorthand for the common name + message description.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Attach the entity the event concerns.
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }
}
