//! Convenient imports for the logbook.
//!
//! ```
//! use logbook::prelude::*;
//!
//! let logbook = Logbook::new()?;
//! # Ok::<(), logbook::Error>(())
//! ```

// Main entry point
pub use crate::logbook::{Logbook, LogbookBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Data model
pub use logbook_core::{Description, EventData, LogbookConfig, LogbookEntry, Row, When};

// Humanization
pub use logbook_engine::{EntityMetadata, EventsRequest, LazyEventPayload, StaticEntityMetadata};

// Recording
pub use logbook_storage::RecordContext;

// Re-export serde_json for convenience
pub use serde_json::json;
