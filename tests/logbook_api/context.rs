//! Context Attribution Tests
//!
//! "Caused by" resolution: service calls, described events, state changes
//! and parent contexts, plus the cases that must stay unattributed.

use crate::*;
use logbook::NoMetadata;

// =============================================================================
// ATTRIBUTION SOURCES
// =============================================================================

#[test]
fn test_service_call_context() {
    let logbook = logbook_with_rows(vec![
        call_service(1, 0, "c1", "light", "turn_on"),
        state(2, 0, "light.kitchen", "on", "c1"),
    ]);

    let entries = whole_day(&logbook);

    assert_eq!(entries.len(), 1);
    let light = &entries[0];
    assert_eq!(light.context_domain.as_deref(), Some("light"));
    assert_eq!(light.context_service.as_deref(), Some("turn_on"));
    assert_eq!(light.context_event_type.as_deref(), Some("call_service"));
    assert!(light.context_entity_id.is_none());
}

#[test]
fn test_automation_context() {
    let logbook = logbook_with_rows(vec![
        automation(1, 0, "morning", "Morning", "c2"),
        state(2, 1, "switch.fan", "on", "c2"),
    ]);

    let entries = whole_day(&logbook);

    assert_eq!(entries.len(), 2);
    let fan = &entries[1];
    assert_eq!(fan.context_entity_id.as_deref(), Some("automation.morning"));
    assert_eq!(fan.context_entity_id_name.as_deref(), Some("morning"));
    assert_eq!(fan.context_event_type.as_deref(), Some("automation_triggered"));
    assert_eq!(fan.context_domain.as_deref(), Some("automation"));
    assert_eq!(fan.context_name.as_deref(), Some("Morning"));
}

#[test]
fn test_state_change_context() {
    let rows = vec![
        state(1, 0, "binary_sensor.motion", "on", "c1")
            .with_attributes(r#"{"friendly_name": "Hallway Motion"}"#),
        state(2, 1, "light.hallway", "on", "c1"),
    ];

    let entries = humanize(rows, &DescriberRegistry::empty(), &NoMetadata);

    let light = &entries[1];
    assert_eq!(light.context_entity_id.as_deref(), Some("binary_sensor.motion"));
    assert_eq!(light.context_entity_id_name.as_deref(), Some("Hallway Motion"));
    assert_eq!(light.context_event_type.as_deref(), Some("state_changed"));
    assert!(light.context_domain.is_none());
}

#[test]
fn test_parent_context() {
    let rows = vec![
        automation(1, 0, "porch", "Porch", "parent"),
        state(2, 1, "light.porch", "on", "child").with_context_parent("parent"),
    ];

    let entries = humanize(rows, &standard_registry(), &NoMetadata);

    let light = &entries[1];
    assert_eq!(light.context_entity_id.as_deref(), Some("automation.porch"));
    assert_eq!(light.context_name.as_deref(), Some("Porch"));
}

#[test]
fn test_context_user_is_always_copied() {
    let rows = vec![state(1, 0, "lock.front", "unlocked", "c1").with_context_user("user-1")];
    let entries = humanize(rows, &DescriberRegistry::empty(), &NoMetadata);
    assert_eq!(entries[0].context_user_id.as_deref(), Some("user-1"));
    assert!(entries[0].context_event_type.is_none());
}

#[test]
fn test_logbook_entry_in_service_context() {
    let rows = vec![
        call_service(1, 0, "c1", "script", "turn_on"),
        Row::new(2, "logbook_entry", at(1))
            .with_context("c1")
            .with_event_data(r#"{"name": "Alarm", "message": "armed", "domain": "alarm_control_panel"}"#),
    ];
    let entries = humanize(rows, &DescriberRegistry::empty(), &NoMetadata);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].context_domain.as_deref(), Some("script"));
    assert_eq!(entries[0].context_service.as_deref(), Some("turn_on"));
}

// =============================================================================
// NO ATTRIBUTION
// =============================================================================

#[test]
fn test_origin_row_is_not_attributed_to_itself() {
    let rows = vec![state(1, 0, "light.kitchen", "on", "c1")];
    let entries = humanize(rows, &DescriberRegistry::empty(), &NoMetadata);
    assert!(!entries[0].has_context());
}

#[test]
fn test_later_cause_is_not_seen() {
    let rows = vec![
        state(1, 0, "light.kitchen", "on", "c1"),
        call_service(2, 1, "c1", "light", "turn_on"),
    ];
    let entries = humanize(rows, &DescriberRegistry::empty(), &NoMetadata);
    assert!(entries[0].context_event_type.is_none());
}

#[test]
fn test_self_parenting_origin() {
    let rows = vec![state(1, 0, "light.kitchen", "on", "c1").with_context_parent("c1")];
    let entries = humanize(rows, &DescriberRegistry::empty(), &NoMetadata);
    assert!(entries[0].context_event_type.is_none());
}

#[test]
fn test_unknown_parent() {
    let rows = vec![state(1, 0, "light.kitchen", "on", "c1").with_context_parent("gone")];
    let entries = humanize(rows, &DescriberRegistry::empty(), &NoMetadata);
    assert!(entries[0].context_event_type.is_none());
}

#[test]
fn test_automation_not_attributed_to_its_own_trigger() {
    let rows = vec![
        automation(1, 0, "morning", "Morning", "c1"),
        state(2, 1, "automation.morning", "on", "c1"),
    ];
    let entries = humanize(rows, &standard_registry(), &NoMetadata);

    let own_state = &entries[1];
    assert_eq!(own_state.entity_id.as_deref(), Some("automation.morning"));
    assert!(own_state.context_entity_id.is_none());
    assert!(own_state.context_event_type.is_none());
}

#[test]
fn test_entity_less_entry_gets_no_event_context() {
    let rows = vec![
        automation(1, 0, "morning", "Morning", "c1"),
        Row::new(2, "logbook_entry", at(1))
            .with_context("c1")
            .with_event_data(r#"{"name": "Note", "message": "hello", "domain": "logbook"}"#),
    ];
    let entries = humanize(rows, &standard_registry(), &NoMetadata);
    assert_eq!(entries.len(), 2);
    assert!(entries[1].context_entity_id.is_none());
}

// =============================================================================
// CONTEXT ROWS OUTSIDE THE REQUEST
// =============================================================================

#[test]
fn test_entity_query_still_resolves_context() {
    let logbook = logbook_with_rows(vec![
        automation(1, 0, "morning", "Morning", "c2"),
        state(2, 1, "switch.fan", "on", "c2"),
        state(3, 2, "light.kitchen", "on", "c3"),
    ]);

    let entries = logbook
        .logbook(Some("2022-04-15"), None, Some("switch.fan"), None, None)
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entity_id.as_deref(), Some("switch.fan"));
    assert_eq!(entries[0].context_name.as_deref(), Some("Morning"));
}

#[test]
fn test_context_query() {
    let logbook = logbook_with_rows(vec![
        call_service(1, 0, "c1", "light", "turn_on"),
        state(2, 1, "light.kitchen", "on", "c1"),
        state(3, 2, "light.porch", "on", "c1"),
        state(4, 3, "switch.fan", "on", "c2"),
    ]);

    let entries = logbook
        .get_events("2022-04-15T00:00:00Z", None, None, Some("c1"))
        .unwrap();

    let ids: Vec<_> = entries.iter().map(|e| e.entity_id.as_deref()).collect();
    assert_eq!(ids, vec![Some("light.kitchen"), Some("light.porch")]);
    assert!(entries
        .iter()
        .all(|e| e.context_service.as_deref() == Some("turn_on")));
}
