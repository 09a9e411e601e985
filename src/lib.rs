//! # Logbook
//!
//! Human-readable activity log built from persisted home automation events.
//!
//! State changes, service calls, lifecycle events and integration events are
//! read from a time-ordered row store and turned into entries such as
//! "Kitchen Light turned on, triggered by automation Morning". Each entry is
//! attributed to the event or service call that caused it.
//!
//! ## Quick Start
//!
//! ```
//! use logbook::prelude::*;
//!
//! let logbook = Logbook::new()?;
//! logbook.record_state(
//!     "light.kitchen",
//!     "on",
//!     json!({"friendly_name": "Kitchen Light"}).as_object().unwrap(),
//!     &RecordContext::with_id("c1"),
//! )?;
//!
//! let entries = logbook.logbook(None, None, None, None, None)?;
//! assert_eq!(entries[0].name.as_deref(), Some("Kitchen Light"));
//! # Ok::<(), logbook::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`logbook_core`]: rows, entries, filters, configuration
//! - [`logbook_storage`]: in-memory row store and JSON-lines dumps
//! - [`logbook_engine`]: the humanization pass
//! - [`logbook_executor`]: request validation and commands

#![warn(missing_docs)]

mod error;
mod logbook;

pub mod prelude;

// Re-export main entry points
pub use crate::logbook::{Logbook, LogbookBuilder};
pub use error::{Error, Result};

// Re-export the layers
pub use logbook_core;
pub use logbook_engine;
pub use logbook_executor;
pub use logbook_storage;

// Re-export the types most callers touch
pub use logbook_core::{
    Description, EntityFilter, EventData, FilterSpec, LogbookConfig, LogbookEntry, Row,
    TimeFormat, When,
};
pub use logbook_engine::{
    DescriberRegistry, EntityMetadata, EventsRequest, LazyEventPayload, NoMetadata,
    StaticEntityMetadata,
};
pub use logbook_executor::{fixed_clock, system_clock, Clock, Command, Output};
pub use logbook_storage::{MemoryStore, RecordContext};
