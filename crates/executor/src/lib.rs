//! Command execution layer for the logbook
//!
//! Transport code (a websocket handler, an HTTP view, the CLI) builds a
//! [`Command`], hands it to an [`Executor`] and serializes the [`Output`] or
//! the [`Error`]. All request validation happens here, before the engine is
//! invoked:
//!
//! - [`Command::GetEvents`]: subscription-style query, numeric timestamps
//! - [`Command::Logbook`]: point-in-time query, ISO timestamps
//! - [`Command::LogEntry`]: record a custom logbook entry
//!
//! [`LogbookApi`] wraps the executor with typed methods.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
mod clock;
mod command;
mod error;
mod executor;
mod handlers;
mod output;
mod parse;


pub use api::LogbookApi;
pub use clock::{fixed_clock, system_clock, Clock};
pub use command::Command;
pub use error::{Error, Result};
pub use executor::Executor;
pub use output::Output;
pub use parse::{parse_entity_ids, parse_time};
