//! Describers for the automation and script event types
//!
//! These two event types are fired by the automation engine itself and are
//! described the same way everywhere, so they ship with the engine.
//! [`DescriberRegistryBuilder::with_standard_describers`] registers both.

use logbook_core::event_type::{
    ATTR_ENTITY_ID, ATTR_NAME, EVENT_AUTOMATION_TRIGGERED, EVENT_SCRIPT_STARTED,
};
use logbook_core::{Description, Result};

use crate::lazy::LazyEventPayload;
use crate::registry::DescriberRegistryBuilder;

/// Payload key naming what triggered an automation.
const ATTR_SOURCE: &str = "source";

/// `<name> triggered [by <source>]`
pub fn automation_triggered(event: &LazyEventPayload<'_>) -> Description {
    let message = match event.data_str(ATTR_SOURCE) {
        Some(source) => format!("triggered by {}", source),
        None => "triggered".to_string(),
    };
    describe(event, "automation", message)
}

/// `<name> started`
pub fn script_started(event: &LazyEventPayload<'_>) -> Description {
    describe(event, "script", "started".to_string())
}

fn describe(event: &LazyEventPayload<'_>, fallback: &str, message: String) -> Description {
    let name = event.data_str(ATTR_NAME).unwrap_or(fallback);
    let description = Description::new(name, message);
    match event.data_str(ATTR_ENTITY_ID) {
        Some(entity_id) => description.with_entity_id(entity_id),
        None => description,
    }
}

impl DescriberRegistryBuilder {
    /// Register the automation and script describers.
    pub fn with_standard_describers(self) -> Result<Self> {
        self.register("automation", EVENT_AUTOMATION_TRIGGERED, automation_triggered)?
            .register("script", EVENT_SCRIPT_STARTED, script_started)
    }
}
