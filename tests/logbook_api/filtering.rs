//! Include/Exclude Filtering Tests
//!
//! The configured filter applies to state rows at the source and to event
//! rows during the pass; requested entity ids replace it.

use crate::*;

fn configured(toml: &str, rows: Vec<Row>) -> Logbook {
    Logbook::builder()
        .config(LogbookConfig::from_toml_str(toml).unwrap())
        .rows(rows)
        .clock(logbook::fixed_clock(now()))
        .build()
        .unwrap()
}

fn entity_ids(entries: &[LogbookEntry]) -> Vec<&str> {
    entries
        .iter()
        .filter_map(|e| e.entity_id.as_deref())
        .collect()
}

fn mixed_rows() -> Vec<Row> {
    vec![
        Row::new(1, "homeassistant_start", at(0)).with_context("boot"),
        automation(2, 10, "morning", "Morning", "c1"),
        state(3, 11, "switch.fan", "on", "c1"),
        call_service(4, 20, "c2", "light", "turn_on"),
        state(5, 21, "light.kitchen", "on", "c2"),
        state(6, 22, "light.garage", "on", "c2"),
        Row::new(7, "logbook_entry", at(30))
            .with_context("c3")
            .with_event_data(r#"{"name": "Garage", "message": "left open", "entity_id": "light.garage"}"#),
    ]
}

#[test]
fn test_no_filter_keeps_everything() {
    let logbook = logbook_with_rows(mixed_rows());
    let entries = whole_day(&logbook);
    assert_eq!(entries.len(), 6);
}

#[test]
fn test_exclude_domain() {
    let logbook = configured("[exclude]\ndomains = [\"light\"]\n", mixed_rows());
    let entries = whole_day(&logbook);

    assert_eq!(
        entity_ids(&entries),
        vec!["automation.morning", "switch.fan"]
    );
    assert_eq!(entries[0].message.as_deref(), Some("started"));
}

#[test]
fn test_excluded_event_still_provides_context() {
    let logbook = configured("[exclude]\ndomains = [\"automation\"]\n", mixed_rows());
    let entries = whole_day(&logbook);

    assert!(!entity_ids(&entries).contains(&"automation.morning"));
    let fan = entries
        .iter()
        .find(|e| e.entity_id.as_deref() == Some("switch.fan"))
        .unwrap();
    assert_eq!(fan.context_name.as_deref(), Some("Morning"));
}

#[test]
fn test_include_glob_drops_lifecycle() {
    let logbook = configured("[include]\nentity_globs = [\"light.*\"]\n", mixed_rows());
    let entries = whole_day(&logbook);

    assert_eq!(
        entity_ids(&entries),
        vec!["light.kitchen", "light.garage", "light.garage"]
    );
    assert!(entries.iter().all(|e| e.message.as_deref() != Some("started")));
}

#[test]
fn test_include_system_domain_keeps_lifecycle() {
    let logbook = configured(
        "[include]\ndomains = [\"homeassistant\", \"switch\"]\n",
        mixed_rows(),
    );
    let entries = whole_day(&logbook);

    assert_eq!(entries[0].domain.as_deref(), Some("homeassistant"));
    assert_eq!(entity_ids(&entries), vec!["switch.fan"]);
}

#[test]
fn test_include_domain_with_excluded_entity() {
    let logbook = configured(
        "[include]\ndomains = [\"light\"]\n[exclude]\nentities = [\"light.garage\"]\n",
        mixed_rows(),
    );
    let entries = whole_day(&logbook);
    assert_eq!(entity_ids(&entries), vec!["light.kitchen"]);
}

#[test]
fn test_requested_entities_replace_configured_filter() {
    let logbook = configured("[exclude]\ndomains = [\"light\"]\n", mixed_rows());

    let entries = logbook
        .get_events(
            "2022-04-15T00:00:00Z",
            None,
            Some(vec!["light.garage".to_string()]),
            None,
        )
        .unwrap();

    assert_eq!(entity_ids(&entries), vec!["light.garage", "light.garage"]);
    assert_eq!(entries[0].context_service.as_deref(), Some("turn_on"));
    assert_eq!(entries[1].message.as_deref(), Some("left open"));
}

#[test]
fn test_malformed_config_is_rejected() {
    let err = LogbookConfig::from_toml_str("[include]\ndomains = \"light\"\n").unwrap_err();
    assert!(matches!(err, logbook::logbook_core::Error::Config { .. }));

    let err = LogbookConfig::from_toml_str("[include]\nareas = [\"kitchen\"]\n").unwrap_err();
    assert!(matches!(err, logbook::logbook_core::Error::Config { .. }));
}
