//! Command handlers.
//!
//! Each handler validates its arguments, runs the operation and wraps the
//! result in an [`Output`](crate::Output).

pub mod events;
pub mod log_entry;
