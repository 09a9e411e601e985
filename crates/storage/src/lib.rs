//! Storage layer for the logbook
//!
//! This crate provides the in-memory row store used by tests, the CLI and
//! embedders that do not bring their own database:
//! - MemoryStore: time-ordered rows behind a RwLock
//! - Query selection with the same semantics as the recorder's logbook query
//!   (time window, event types, entity ids, context id, context-only rows)
//! - JSON-lines import and export
//! - Event/state recording with shared payload de-duplication

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod jsonl;
pub mod memory;
pub mod select;

pub use memory::{MemoryStore, RecordContext};
