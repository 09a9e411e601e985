//! Command results

use logbook_core::LogbookEntry;
use serde::{Deserialize, Serialize};

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Output {
    /// Humanized entries, oldest first
    Entries(Vec<LogbookEntry>),
    /// A logbook entry was recorded
    Recorded {
        /// Row id of the recorded event
        event_id: u64,
        /// Context the event was recorded in
        context_id: String,
    },
}

impl Output {
    /// The entries, if this is an entry list.
    pub fn into_entries(self) -> Option<Vec<LogbookEntry>> {
        match self {
            Output::Entries(entries) => Some(entries),
            Output::Recorded { .. } => None,
        }
    }
}
