//! Main entry point for the logbook.
//!
//! This module provides the [`Logbook`] struct, which owns a row store and
//! everything needed to humanize it, and [`LogbookBuilder`] to wire it up.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use logbook_core::{Description, EventData, LogbookConfig, LogbookEntry, Row};
use logbook_engine::{
    DescribeFn, DescriberRegistry, EntityMetadata, EventsRequest, LazyEventPayload, NoMetadata,
};
use logbook_executor::{system_clock, Clock, Command, Executor, LogbookApi, Output};
use logbook_storage::{jsonl, MemoryStore, RecordContext};
use tracing::debug;

use crate::error::Result;

/// A logbook over an in-memory row store.
///
/// Queries run a fresh humanization pass each time; the store may be
/// appended to concurrently.
///
/// # Example
///
/// ```
/// use logbook::prelude::*;
///
/// let logbook = Logbook::new()?;
/// logbook.log_entry("Front door", "was opened", None, Some("binary_sensor.front_door"))?;
/// assert_eq!(logbook.store().len(), 1);
/// # Ok::<(), logbook::Error>(())
/// ```
#[derive(Clone)]
pub struct Logbook {
    api: LogbookApi,
    metadata: Arc<dyn EntityMetadata>,
    clock: Clock,
}

impl std::fmt::Debug for Logbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logbook")
            .field("executor", self.api.executor())
            .finish()
    }
}

impl Logbook {
    /// Empty logbook with the standard describers, no filter and the wall
    /// clock.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Logbook over the rows of a JSON-lines dump.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().rows_path(path).build()
    }

    /// Create a builder for logbook configuration.
    pub fn builder() -> LogbookBuilder {
        LogbookBuilder::new()
    }

    /// Subscription-style query; entries carry numeric timestamps.
    ///
    /// A `start_time` in the future yields no entries.
    pub fn get_events(
        &self,
        start_time: &str,
        end_time: Option<&str>,
        entity_ids: Option<Vec<String>>,
        context_id: Option<&str>,
    ) -> Result<Vec<LogbookEntry>> {
        Ok(self
            .api
            .get_events(start_time, end_time, entity_ids, context_id)?)
    }

    /// Point-in-time query; entries carry ISO timestamps.
    ///
    /// `datetime` defaults to the start of the current UTC day, `period` to
    /// one day, and `entity` is a comma-separated list of entity ids.
    pub fn logbook(
        &self,
        datetime: Option<&str>,
        period: Option<&str>,
        entity: Option<&str>,
        end_time: Option<&str>,
        context_id: Option<&str>,
    ) -> Result<Vec<LogbookEntry>> {
        Ok(self
            .api
            .logbook(datetime, period, entity, end_time, context_id)?)
    }

    /// Record a custom entry. Returns the row id and the context id.
    pub fn log_entry(
        &self,
        name: &str,
        message: &str,
        domain: Option<&str>,
        entity_id: Option<&str>,
    ) -> Result<(u64, String)> {
        Ok(self.api.log_entry(name, message, domain, entity_id)?)
    }

    /// Run an already-built request straight against the engine.
    ///
    /// No request validation beyond the engine's own precondition checks.
    pub fn query(&self, request: &EventsRequest) -> Result<Vec<LogbookEntry>> {
        let executor = self.api.executor();
        Ok(logbook_engine::get_events(
            &**executor.store(),
            executor.registry(),
            &*self.metadata,
            request,
        )?)
    }

    /// Execute a raw command.
    pub fn execute(&self, command: Command) -> Result<Output> {
        Ok(self.api.executor().execute(command)?)
    }

    /// Record an event fired now.
    pub fn record_event(
        &self,
        event_type: &str,
        data: &EventData,
        context: &RecordContext,
    ) -> Result<Row> {
        Ok(self
            .store()
            .record_event(event_type, (self.clock)(), data, context)?)
    }

    /// Record a state change that happened now.
    pub fn record_state(
        &self,
        entity_id: &str,
        state: &str,
        attributes: &EventData,
        context: &RecordContext,
    ) -> Result<Row> {
        Ok(self
            .store()
            .record_state(entity_id, state, attributes, (self.clock)(), context)?)
    }

    /// Write every row to a JSON-lines file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(jsonl::save(self.store(), path)?)
    }

    /// The underlying row store.
    pub fn store(&self) -> &MemoryStore {
        &**self.api.executor().store()
    }

    /// The describer registry.
    pub fn registry(&self) -> &DescriberRegistry {
        &**self.api.executor().registry()
    }

    /// The command executor.
    pub fn executor(&self) -> &Executor {
        self.api.executor()
    }
}

/// Builder for logbook configuration.
///
/// # Example
///
/// ```
/// use logbook::prelude::*;
///
/// let logbook = Logbook::builder()
///     .config(LogbookConfig::from_toml_str("[exclude]\ndomains = [\"automation\"]")?)
///     .metadata(StaticEntityMetadata::new().with_name("light.kitchen", "Kitchen"))
///     .describer("alarm", "alarm_fired", |_| Description::new("Alarm", "fired"))
///     .build()?;
/// assert!(logbook.registry().contains("alarm_fired"));
/// # Ok::<(), logbook::Error>(())
/// ```
pub struct LogbookBuilder {
    rows: Vec<Row>,
    rows_path: Option<PathBuf>,
    config: LogbookConfig,
    metadata: Arc<dyn EntityMetadata>,
    describers: Vec<(String, String, DescribeFn)>,
    standard_describers: bool,
    clock: Clock,
}

impl LogbookBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            rows_path: None,
            config: LogbookConfig::default(),
            metadata: Arc::new(NoMetadata),
            describers: Vec::new(),
            standard_describers: true,
            clock: system_clock(),
        }
    }

    /// Seed the store with rows.
    pub fn rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Seed the store from a JSON-lines dump.
    pub fn rows_path(mut self, path: impl AsRef<Path>) -> Self {
        self.rows_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Include/exclude configuration applied to unrestricted queries.
    pub fn config(mut self, config: LogbookConfig) -> Self {
        self.config = config;
        self
    }

    /// Live entity names and continuous-sensor classification.
    pub fn metadata(mut self, metadata: impl EntityMetadata + 'static) -> Self {
        self.metadata = Arc::new(metadata);
        self
    }

    /// Register a describer for an externally defined event type.
    ///
    /// Registering a built-in event type fails at [`build`](Self::build).
    pub fn describer<F>(mut self, domain: &str, event_type: &str, describe: F) -> Self
    where
        F: Fn(&LazyEventPayload<'_>) -> Description + Send + Sync + 'static,
    {
        self.describers
            .push((domain.to_string(), event_type.to_string(), Box::new(describe)));
        self
    }

    /// Leave out the automation and script describers.
    pub fn without_standard_describers(mut self) -> Self {
        self.standard_describers = false;
        self
    }

    /// Use `clock` for "now".
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the logbook.
    pub fn build(self) -> Result<Logbook> {
        let mut registry = DescriberRegistry::builder();
        if self.standard_describers {
            registry = registry.with_standard_describers()?;
        }
        for (domain, event_type, describe) in self.describers {
            registry = registry.register(&domain, &event_type, describe)?;
        }
        let registry = registry.build();

        let filter = self.config.entity_filter()?;

        let store = match self.rows_path {
            Some(path) => {
                let store = jsonl::load(path)?;
                for row in self.rows {
                    store.insert(row);
                }
                store
            }
            None => MemoryStore::from_rows(self.rows),
        };
        debug!(
            rows = store.len(),
            describers = registry.len(),
            filtered = filter.is_some(),
            "built logbook"
        );

        let executor = Executor::new(Arc::new(store), Arc::new(registry))
            .with_metadata(Arc::clone(&self.metadata))
            .with_filter(filter)
            .with_clock(Arc::clone(&self.clock));

        Ok(Logbook {
            api: LogbookApi::new(executor),
            metadata: self.metadata,
            clock: self.clock,
        })
    }
}

impl Default for LogbookBuilder {
    fn default() -> Self {
        Self::new()
    }
}
