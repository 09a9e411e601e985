//! Describers for externally defined event types
//!
//! Integrations register, once at startup, a domain and a describe function
//! per event type they own. The finished [`DescriberRegistry`] is immutable
//! and is handed to every pass by reference.
//!
//! # Example
//!
//! ```
//! use logbook_core::Description;
//! use logbook_engine::DescriberRegistry;
//!
//! let registry = DescriberRegistry::builder()
//!     .register("automation", "automation_triggered", |event| {
//!         let name = event.data_str("name").unwrap_or("automation");
//!         let mut description = Description::new(name, "triggered");
//!         description.entity_id = event.data_str("entity_id").map(str::to_string);
//!         description
//!     })
//!     .unwrap()
//!     .build();
//!
//! assert!(registry.contains("automation_triggered"));
//! ```

use std::fmt;

use logbook_core::{Description, Error, EventKind, Result};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::lazy::LazyEventPayload;

/// Turns one decoded event into a partial entry.
pub type DescribeFn = Box<dyn Fn(&LazyEventPayload<'_>) -> Description + Send + Sync>;

struct Describer {
    domain: String,
    describe: DescribeFn,
}

/// Immutable map from event type to `(domain, describe function)`.
#[derive(Default)]
pub struct DescriberRegistry {
    describers: FxHashMap<String, Describer>,
}

impl fmt::Debug for DescriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<(&str, &str)> = self
            .describers
            .iter()
            .map(|(event_type, d)| (event_type.as_str(), d.domain.as_str()))
            .collect();
        types.sort_unstable();
        f.debug_struct("DescriberRegistry")
            .field("describers", &types)
            .finish()
    }
}

impl DescriberRegistry {
    /// Registry with no describers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start registering describers.
    pub fn builder() -> DescriberRegistryBuilder {
        DescriberRegistryBuilder::default()
    }

    /// Whether a describer is registered for `event_type`.
    pub fn contains(&self, event_type: &str) -> bool {
        self.describers.contains_key(event_type)
    }

    /// Domain registered for `event_type`.
    pub fn domain(&self, event_type: &str) -> Option<&str> {
        self.describers.get(event_type).map(|d| d.domain.as_str())
    }

    /// Domain and describe function for `event_type`.
    pub fn get(&self, event_type: &str) -> Option<(&str, &DescribeFn)> {
        self.describers
            .get(event_type)
            .map(|d| (d.domain.as_str(), &d.describe))
    }

    /// Registered event types, sorted.
    pub fn event_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.describers.keys().cloned().collect();
        types.sort_unstable();
        types
    }

    /// Number of registered describers
    pub fn len(&self) -> usize {
        self.describers.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.describers.is_empty()
    }
}

/// Collects describers before the registry is frozen.
#[derive(Default)]
pub struct DescriberRegistryBuilder {
    describers: FxHashMap<String, Describer>,
}

impl DescriberRegistryBuilder {
    /// Register `describe` for `event_type` under `domain`.
    ///
    /// A later registration for the same event type replaces the earlier one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when `event_type` is one of the built-in
    /// kinds, which are always rendered by the engine itself.
    pub fn register<F>(mut self, domain: &str, event_type: &str, describe: F) -> Result<Self>
    where
        F: Fn(&LazyEventPayload<'_>) -> Description + Send + Sync + 'static,
    {
        if EventKind::of(event_type).is_builtin() {
            return Err(Error::invalid_input(format!(
                "cannot register a describer for built-in event type {}",
                event_type
            )));
        }
        let previous = self.describers.insert(
            event_type.to_string(),
            Describer {
                domain: domain.to_string(),
                describe: Box::new(describe),
            },
        );
        match previous {
            Some(old) => warn!(
                event_type,
                domain,
                previous_domain = %old.domain,
                "replaced logbook describer"
            ),
            None => debug!(event_type, domain, "registered logbook describer"),
        }
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> DescriberRegistry {
        DescriberRegistry {
            describers: self.describers,
        }
    }
}
