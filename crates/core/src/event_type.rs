//! Event type names and the closed set of built-in kinds
//!
//! Event types arrive from storage as plain strings. The humanizer only
//! knows how to render a handful of them natively; everything else must be
//! described by a registered describer (see the engine crate).

/// A state machine transition of one entity.
pub const EVENT_STATE_CHANGED: &str = "state_changed";
/// A service call. Never emitted, only used as a context root.
pub const EVENT_CALL_SERVICE: &str = "call_service";
/// The system finished starting.
pub const EVENT_HOMEASSISTANT_START: &str = "homeassistant_start";
/// The system is stopping.
pub const EVENT_HOMEASSISTANT_STOP: &str = "homeassistant_stop";
/// A custom entry written through the logbook `log` service.
pub const EVENT_LOGBOOK_ENTRY: &str = "logbook_entry";
/// An automation fired.
pub const EVENT_AUTOMATION_TRIGGERED: &str = "automation_triggered";
/// A script started running.
pub const EVENT_SCRIPT_STARTED: &str = "script_started";

/// Domain of the system itself.
pub const HA_DOMAIN: &str = "homeassistant";
/// Pseudo entity id used to filter system lifecycle events.
pub const HA_DOMAIN_ENTITY_ID: &str = "homeassistant._";
/// Display name of the system in start/stop entries.
pub const HA_NAME: &str = "Home Assistant";
/// Domain of the logbook itself.
pub const LOGBOOK_DOMAIN: &str = "logbook";
/// Domain of sensors. Only sensors can be continuous.
pub const SENSOR_DOMAIN: &str = "sensor";

// Payload keys

/// Domain of a service call or custom entry.
pub const ATTR_DOMAIN: &str = "domain";
/// Entity the event refers to.
pub const ATTR_ENTITY_ID: &str = "entity_id";
/// Display name stored in state attributes.
pub const ATTR_FRIENDLY_NAME: &str = "friendly_name";
/// Message of a custom entry.
pub const ATTR_MESSAGE: &str = "message";
/// Name of a custom entry or described event.
pub const ATTR_NAME: &str = "name";
/// Service name of a service call.
pub const ATTR_SERVICE: &str = "service";
/// Registry capability marking a sensor as continuous.
pub const ATTR_STATE_CLASS: &str = "state_class";
/// Attribute carried by measuring sensors.
pub const ATTR_UNIT_OF_MEASUREMENT: &str = "unit_of_measurement";

/// Event types that are queried in addition to state changes, before any
/// externally described types are added.
pub const ALL_EVENT_TYPES_EXCEPT_STATE_CHANGED: [&str; 4] = [
    EVENT_LOGBOOK_ENTRY,
    EVENT_CALL_SERVICE,
    EVENT_HOMEASSISTANT_START,
    EVENT_HOMEASSISTANT_STOP,
];

/// Classification of an event type string.
///
/// The built-in kinds are closed; anything else is `External` and is only
/// rendered when a describer is registered for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind<'a> {
    /// `state_changed`
    StateChanged,
    /// `call_service`
    CallService,
    /// `homeassistant_start`
    Start,
    /// `homeassistant_stop`
    Stop,
    /// `logbook_entry`
    LogbookEntry,
    /// Any other event type
    External(&'a str),
}

impl<'a> EventKind<'a> {
    /// Classify an event type string.
    pub fn of(event_type: &'a str) -> Self {
        match event_type {
            EVENT_STATE_CHANGED => EventKind::StateChanged,
            EVENT_CALL_SERVICE => EventKind::CallService,
            EVENT_HOMEASSISTANT_START => EventKind::Start,
            EVENT_HOMEASSISTANT_STOP => EventKind::Stop,
            EVENT_LOGBOOK_ENTRY => EventKind::LogbookEntry,
            other => EventKind::External(other),
        }
    }

    /// Whether this is one of the built-in kinds.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, EventKind::External(_))
    }

    /// Whether this is a system lifecycle event (start or stop).
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, EventKind::Start | EventKind::Stop)
    }

    /// The event type string this kind was classified from.
    pub fn as_str(&self) -> &'a str {
        match self {
            EventKind::StateChanged => EVENT_STATE_CHANGED,
            EventKind::CallService => EVENT_CALL_SERVICE,
            EventKind::Start => EVENT_HOMEASSISTANT_START,
            EventKind::Stop => EVENT_HOMEASSISTANT_STOP,
            EventKind::LogbookEntry => EVENT_LOGBOOK_ENTRY,
            EventKind::External(s) => s,
        }
    }
}

/// Whether the event type is one of the automation/script trigger kinds.
///
/// An entity is never attributed as its own context when the context event
/// is one of these.
pub fn is_script_automation_event(event_type: &str) -> bool {
    matches!(
        event_type,
        EVENT_AUTOMATION_TRIGGERED | EVENT_SCRIPT_STARTED
    )
}
