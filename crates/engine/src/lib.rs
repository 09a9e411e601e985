//! Humanization engine for the logbook
//!
//! Turns a time-ordered stream of [`Row`](logbook_core::Row)s into
//! [`LogbookEntry`](logbook_core::LogbookEntry)s in a single forward pass:
//!
//! - [`keep`]: cheap keep/drop decision on raw payload strings
//! - [`humanize`]: per-kind entry building, pulled lazily as an iterator
//! - [`context`]: "caused by" resolution against a first-seen context index
//! - [`cache`]: pass-scoped payload and display-name caches
//! - [`registry`]: describers for externally defined event types
//! - [`describers`]: the automation and script describers
//! - [`metadata`]: live entity names and continuous-sensor classification
//!
//! [`get_events`] ties it together on top of a
//! [`RowSource`](logbook_core::RowSource).
//!
//! Every cache lives for exactly one pass. Nothing here is shared between
//! concurrent requests, so nothing here locks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod context;
pub mod describers;
pub mod events;
pub mod humanize;
pub mod keep;
pub mod lazy;
pub mod metadata;
pub mod registry;

pub use cache::{EntityNameCache, EventCache};
pub use context::{ContextAugmenter, ContextLookup};
pub use events::{get_events, EventsRequest};
pub use humanize::Humanizer;
pub use keep::keep_row;
pub use lazy::LazyEventPayload;
pub use metadata::{EntityMetadata, NoMetadata, StaticEntityMetadata};
pub use registry::{DescribeFn, DescriberRegistry, DescriberRegistryBuilder};
