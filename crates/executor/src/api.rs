//! High-level typed wrapper for the Executor.
//!
//! [`LogbookApi`] wraps the [`Executor`] and the [`Command`]/[`Output`]
//! enums with typed method calls.
//!
//! # Example
//!
//! ```ignore
//! use logbook_executor::LogbookApi;
//!
//! let api = LogbookApi::new(executor);
//! api.log_entry("Front door", "was opened", None, Some("binary_sensor.front_door"))?;
//! let entries = api.get_events("2022-04-15T00:00:00Z", None, None, None)?;
//! ```

use logbook_core::LogbookEntry;

use crate::{Command, Error, Executor, Output, Result};

/// Typed access to the logbook commands.
///
/// Each method builds the [`Command`], executes it and unpacks the
/// [`Output`]; the semantics are exactly those of the command interface.
#[derive(Debug, Clone)]
pub struct LogbookApi {
    executor: Executor,
}

impl LogbookApi {
    /// Wrap an executor.
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Subscription-style query; entries carry numeric timestamps.
    pub fn get_events(
        &self,
        start_time: &str,
        end_time: Option<&str>,
        entity_ids: Option<Vec<String>>,
        context_id: Option<&str>,
    ) -> Result<Vec<LogbookEntry>> {
        let output = self.executor.execute(Command::GetEvents {
            start_time: start_time.to_string(),
            end_time: end_time.map(str::to_string),
            entity_ids,
            context_id: context_id.map(str::to_string),
        })?;
        entries(output, "GetEvents")
    }

    /// Point-in-time query; entries carry ISO timestamps.
    pub fn logbook(
        &self,
        datetime: Option<&str>,
        period: Option<&str>,
        entity: Option<&str>,
        end_time: Option<&str>,
        context_id: Option<&str>,
    ) -> Result<Vec<LogbookEntry>> {
        let output = self.executor.execute(Command::Logbook {
            datetime: datetime.map(str::to_string),
            period: period.map(str::to_string),
            entity: entity.map(str::to_string),
            end_time: end_time.map(str::to_string),
            context_id: context_id.map(str::to_string),
        })?;
        entries(output, "Logbook")
    }

    /// Record a custom entry; returns the row id and context id.
    pub fn log_entry(
        &self,
        name: &str,
        message: &str,
        domain: Option<&str>,
        entity_id: Option<&str>,
    ) -> Result<(u64, String)> {
        match self.executor.execute(Command::LogEntry {
            name: name.to_string(),
            message: message.to_string(),
            domain: domain.map(str::to_string),
            entity_id: entity_id.map(str::to_string),
            context_id: None,
        })? {
            Output::Recorded {
                event_id,
                context_id,
            } => Ok((event_id, context_id)),
            _ => Err(Error::Internal {
                reason: "Unexpected output for LogEntry".into(),
            }),
        }
    }
}

fn entries(output: Output, command: &str) -> Result<Vec<LogbookEntry>> {
    output.into_entries().ok_or_else(|| Error::Internal {
        reason: format!("Unexpected output for {}", command),
    })
}
