//! Core types for the logbook
//!
//! This crate defines the data model shared by every other logbook crate:
//! - [`Row`]: one persisted event or state change as read from storage
//! - [`EventKind`]: closed classification of the built-in event types
//! - [`LogbookEntry`]: one human-readable output entry
//! - [`EntityFilter`] / [`LogbookConfig`]: include/exclude filtering
//! - [`RowSource`] / [`EventQuery`]: the contract with the query layer
//!
//! Nothing in here decodes payloads eagerly. The pattern extractors in
//! [`extract`] work on the raw payload strings so that rows can be filtered
//! without a full JSON decode.

#![warn(missing_docs)]

pub mod config;
pub mod entity_id;
pub mod entry;
pub mod error;
pub mod event_type;
pub mod extract;
pub mod filter;
pub mod row;
pub mod source;
pub mod time;

pub use config::{FilterSpec, LogbookConfig};
pub use entity_id::{split_entity_id, valid_entity_id};
pub use entry::{Description, LogbookEntry, When};
pub use error::{Error, Result};
pub use event_type::EventKind;
pub use filter::EntityFilter;
pub use row::Row;
pub use source::{EventQuery, RowSource, Rows};
pub use time::TimeFormat;

/// Decoded event payload: a JSON object keyed by attribute name.
pub type EventData = serde_json::Map<String, serde_json::Value>;
