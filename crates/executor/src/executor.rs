//! The command executor

use std::sync::Arc;

use logbook_core::EntityFilter;
use logbook_engine::{DescriberRegistry, EntityMetadata, NoMetadata};
use logbook_storage::MemoryStore;
use tracing::debug;

use crate::clock::{system_clock, Clock};
use crate::handlers;
use crate::{Command, Output, Result};

/// Executes [`Command`]s against a row store.
///
/// The executor is cheap to clone and safe to share: every field is either
/// immutable after construction or internally synchronized. Each command
/// runs its own humanization pass with fresh caches.
#[derive(Clone)]
pub struct Executor {
    pub(crate) store: Arc<MemoryStore>,
    pub(crate) registry: Arc<DescriberRegistry>,
    pub(crate) metadata: Arc<dyn EntityMetadata>,
    pub(crate) filter: Option<EntityFilter>,
    pub(crate) clock: Clock,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("rows", &self.store.len())
            .field("registry", &self.registry)
            .field("filter", &self.filter)
            .finish()
    }
}

impl Executor {
    /// Executor over `store` with no metadata, no filter and the wall clock.
    pub fn new(store: Arc<MemoryStore>, registry: Arc<DescriberRegistry>) -> Self {
        Self {
            store,
            registry,
            metadata: Arc::new(NoMetadata),
            filter: None,
            clock: system_clock(),
        }
    }

    /// Use `metadata` for live names and continuous-sensor checks.
    pub fn with_metadata(mut self, metadata: Arc<dyn EntityMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Apply the configured include/exclude filter to queries.
    pub fn with_filter(mut self, filter: Option<EntityFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Use `clock` for "now".
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// The describer registry
    pub fn registry(&self) -> &Arc<DescriberRegistry> {
        &self.registry
    }

    /// Execute one command.
    pub fn execute(&self, command: Command) -> Result<Output> {
        debug!(command = command.name(), "executing logbook command");
        match command {
            Command::GetEvents {
                start_time,
                end_time,
                entity_ids,
                context_id,
            } => handlers::events::get_events(self, start_time, end_time, entity_ids, context_id),
            Command::Logbook {
                datetime,
                period,
                entity,
                end_time,
                context_id,
            } => handlers::events::logbook(self, datetime, period, entity, end_time, context_id),
            Command::LogEntry {
                name,
                message,
                domain,
                entity_id,
                context_id,
            } => handlers::log_entry::log_entry(self, name, message, domain, entity_id, context_id),
        }
    }
}
