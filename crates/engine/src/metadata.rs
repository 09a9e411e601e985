//! Live entity metadata
//!
//! The engine asks the running system two things about an entity: its
//! current display name, and whether it is a continuous sensor (a sensor
//! whose registry entry advertises a state class). Both answers may change
//! over time, which is why the engine only caches them for one pass.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

/// Entity information supplied by the running system.
pub trait EntityMetadata: Send + Sync {
    /// Current display name, if the entity exists right now.
    fn friendly_name(&self, entity_id: &str) -> Option<String>;

    /// Whether the entity is a continuous sensor.
    fn is_continuous_sensor(&self, entity_id: &str) -> bool;
}

/// Metadata provider that knows nothing: no live names, no continuous
/// sensors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl EntityMetadata for NoMetadata {
    fn friendly_name(&self, _entity_id: &str) -> Option<String> {
        None
    }

    fn is_continuous_sensor(&self, _entity_id: &str) -> bool {
        false
    }
}

/// Fixed metadata, built in code or loaded from JSON:
///
/// ```json
/// {
///   "names": { "light.kitchen": "Kitchen Light" },
///   "continuous_sensors": ["sensor.power"]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticEntityMetadata {
    names: FxHashMap<String, String>,
    continuous_sensors: FxHashSet<String>,
}

impl StaticEntityMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a live display name.
    pub fn with_name(mut self, entity_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(entity_id.into(), name.into());
        self
    }

    /// Mark an entity as a continuous sensor.
    pub fn with_continuous_sensor(mut self, entity_id: impl Into<String>) -> Self {
        self.continuous_sensors.insert(entity_id.into());
        self
    }

    /// Parse from JSON.
    pub fn from_json_str(source: &str) -> logbook_core::Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

impl EntityMetadata for StaticEntityMetadata {
    fn friendly_name(&self, entity_id: &str) -> Option<String> {
        self.names.get(entity_id).cloned()
    }

    fn is_continuous_sensor(&self, entity_id: &str) -> bool {
        self.continuous_sensors.contains(entity_id)
    }
}
