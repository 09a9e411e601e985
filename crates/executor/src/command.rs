//! Commands accepted by the executor

use serde::{Deserialize, Serialize};

/// A request from a transport.
///
/// Times are passed as the caller wrote them and parsed by the executor, so
/// that a bad value is reported with the field it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Subscription-style query. Entries carry numeric timestamps.
    GetEvents {
        /// Start of the window (required)
        start_time: String,
        /// End of the window, defaults to now
        #[serde(default)]
        end_time: Option<String>,
        /// Only these entities
        #[serde(default)]
        entity_ids: Option<Vec<String>>,
        /// Only this context
        #[serde(default)]
        context_id: Option<String>,
    },

    /// Point-in-time query. Entries carry ISO timestamps.
    Logbook {
        /// Anchor of the window, defaults to the start of today
        #[serde(default)]
        datetime: Option<String>,
        /// Number of days, defaults to 1. Ignored when `end_time` is set.
        #[serde(default)]
        period: Option<String>,
        /// Comma-separated entity ids
        #[serde(default)]
        entity: Option<String>,
        /// Explicit end of the window
        #[serde(default)]
        end_time: Option<String>,
        /// Only this context
        #[serde(default)]
        context_id: Option<String>,
    },

    /// Record a custom entry.
    LogEntry {
        /// Display name
        name: String,
        /// Message text
        message: String,
        /// Domain to file the entry under
        #[serde(default)]
        domain: Option<String>,
        /// Entity the entry is about
        #[serde(default)]
        entity_id: Option<String>,
        /// Context to record the entry in; a new one is created if absent
        #[serde(default)]
        context_id: Option<String>,
    },
}

impl Command {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetEvents { .. } => "get_events",
            Command::Logbook { .. } => "logbook",
            Command::LogEntry { .. } => "log_entry",
        }
    }
}
