//! Logbook API Test Suite
//!
//! End-to-end tests through the facade and the engine entry points:
//! humanization per event kind, context attribution, include/exclude
//! filtering, the transport commands, and property tests over random row
//! sequences.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test logbook_api
//!
//! # Run the context tests only
//! cargo test --test logbook_api context::
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use logbook::logbook_core::{EventQuery, RowSource};
use logbook::logbook_engine::Humanizer;
use logbook::prelude::*;
use logbook::{fixed_clock, DescriberRegistry};

// Test modules
pub mod commands;
pub mod context;
pub mod filtering;
pub mod properties;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// 2022-04-15 12:00:00 UTC, the frozen "now" of every test logbook
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 4, 15, 12, 0, 0).unwrap()
}

/// `secs` seconds after 2022-04-15 08:00:00 UTC
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 4, 15, 8, 0, 0).unwrap() + Duration::seconds(secs)
}

/// Build an event payload from a JSON object literal
pub fn data(value: serde_json::Value) -> EventData {
    value.as_object().cloned().unwrap_or_default()
}

/// Registry with the automation and script describers
pub fn standard_registry() -> DescriberRegistry {
    DescriberRegistry::builder()
        .with_standard_describers()
        .unwrap()
        .build()
}

/// Empty logbook with a frozen clock
pub fn create_logbook() -> Logbook {
    Logbook::builder().clock(fixed_clock(now())).build().unwrap()
}

/// Logbook over `rows` with a frozen clock
pub fn logbook_with_rows(rows: Vec<Row>) -> Logbook {
    Logbook::builder()
        .rows(rows)
        .clock(fixed_clock(now()))
        .build()
        .unwrap()
}

/// Humanize `rows` in order, without any query-layer selection
pub fn humanize(
    rows: Vec<Row>,
    registry: &DescriberRegistry,
    metadata: &dyn EntityMetadata,
) -> Vec<LogbookEntry> {
    let query = EventQuery::new(at(0), at(0));
    Humanizer::new(rows.rows(&query).unwrap(), registry, metadata)
        .collect::<logbook::logbook_core::Result<Vec<_>>>()
        .unwrap()
}

/// Whole-day logbook query for 2022-04-15 (ISO times)
pub fn whole_day(logbook: &Logbook) -> Vec<LogbookEntry> {
    logbook
        .logbook(Some("2022-04-15"), None, None, None, None)
        .unwrap()
}

// -----------------------------------------------------------------------------
// Row constructors
// -----------------------------------------------------------------------------

/// `call_service` row for `domain.service`
pub fn call_service(id: u64, secs: i64, context: &str, domain: &str, service: &str) -> Row {
    Row::new(id, "call_service", at(secs))
        .with_context(context)
        .with_event_data(format!(
            r#"{{"domain": "{}", "service": "{}"}}"#,
            domain, service
        ))
}

/// `state_changed` row without attributes
pub fn state(id: u64, secs: i64, entity_id: &str, new_state: &str, context: &str) -> Row {
    Row::new(id, "state_changed", at(secs))
        .with_state(entity_id, new_state)
        .with_context(context)
}

/// `automation_triggered` row for `automation.<object_id>`
pub fn automation(id: u64, secs: i64, object_id: &str, name: &str, context: &str) -> Row {
    Row::new(id, "automation_triggered", at(secs))
        .with_context(context)
        .with_event_data(format!(
            r#"{{"name": "{}", "entity_id": "automation.{}"}}"#,
            name, object_id
        ))
}
