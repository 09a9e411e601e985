//! Command Tests
//!
//! The transport-facing operations through the facade: queries, request
//! validation, recording, and persistence of the row store.

use std::cell::Cell;

use crate::*;
use logbook::logbook_core::{EventQuery, Rows};
use logbook::logbook_engine::get_events;
use logbook::{Command, NoMetadata, Output, TimeFormat};

// =============================================================================
// VALIDATION
// =============================================================================

struct CountingSource {
    rows: Vec<Row>,
    calls: Cell<usize>,
}

impl RowSource for CountingSource {
    fn rows<'a>(&'a self, query: &EventQuery) -> logbook::logbook_core::Result<Rows<'a>> {
        self.calls.set(self.calls.get() + 1);
        self.rows.rows(query)
    }
}

#[test]
fn test_entity_ids_and_context_id_rejected_before_fetch() {
    let source = CountingSource {
        rows: vec![state(1, 0, "light.kitchen", "on", "c1")],
        calls: Cell::new(0),
    };
    let request = EventsRequest::new(at(0), at(100))
        .with_entity_ids(vec!["light.kitchen".into()])
        .with_context_id("c1");

    let err = get_events(&source, &standard_registry(), &NoMetadata, &request).unwrap_err();

    assert!(matches!(err, logbook::logbook_core::Error::InvalidInput { .. }));
    assert_eq!(source.calls.get(), 0);
}

#[test]
fn test_conflict_is_a_request_error() {
    let logbook = create_logbook();

    let err = logbook
        .get_events(
            "2022-04-15T00:00:00Z",
            None,
            Some(vec!["light.kitchen".into()]),
            Some("c1"),
        )
        .unwrap_err();
    assert!(err.is_request_error());
    assert_eq!(err.error_code(), "conflicting_filters");

    let err = logbook
        .logbook(None, None, Some("light.kitchen"), None, Some("c1"))
        .unwrap_err();
    assert_eq!(err.error_code(), "conflicting_filters");
}

#[test]
fn test_malformed_request_values() {
    let logbook = create_logbook();

    let cases = [
        (
            logbook.get_events("yesterday", None, None, None).unwrap_err(),
            "invalid_start_time",
        ),
        (
            logbook
                .get_events("2022-04-15T00:00:00Z", Some("soon"), None, None)
                .unwrap_err(),
            "invalid_end_time",
        ),
        (
            logbook
                .logbook(Some("15.04.2022"), None, None, None, None)
                .unwrap_err(),
            "invalid_datetime",
        ),
        (
            logbook.logbook(None, Some("-"), None, None, None).unwrap_err(),
            "invalid_period",
        ),
        (
            logbook
                .logbook(None, None, Some("light.kitchen,light"), None, None)
                .unwrap_err(),
            "invalid_entity_id",
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code, "{}", err);
        assert!(err.is_request_error());
    }
}

#[test]
fn test_future_start_is_empty() {
    let logbook = logbook_with_rows(vec![state(1, 0, "light.kitchen", "on", "c1")]);
    let entries = logbook
        .get_events("2022-04-16T00:00:00Z", Some("2022-04-17T00:00:00Z"), None, None)
        .unwrap();
    assert!(entries.is_empty());
}

// =============================================================================
// QUERIES
// =============================================================================

#[test]
fn test_period_reaches_back() {
    let yesterday = state(1, 0, "light.kitchen", "on", "c1");
    let yesterday = Row {
        time_fired: yesterday.time_fired - chrono::Duration::days(1),
        ..yesterday
    };
    let logbook = logbook_with_rows(vec![yesterday, state(2, 0, "light.kitchen", "off", "c2")]);

    let one_day = logbook
        .logbook(Some("2022-04-15"), None, None, None, None)
        .unwrap();
    let two_days = logbook
        .logbook(Some("2022-04-15"), Some("2"), None, None, None)
        .unwrap();

    assert_eq!(one_day.len(), 1);
    assert_eq!(two_days.len(), 2);
    assert_eq!(two_days[0].when.as_iso(), Some("2022-04-14T08:00:00+00:00"));
}

#[test]
fn test_default_datetime_is_start_of_today() {
    let logbook = logbook_with_rows(vec![state(1, 0, "light.kitchen", "on", "c1")]);
    let entries = logbook.logbook(None, None, None, None, None).unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_direct_query() {
    let logbook = logbook_with_rows(vec![
        call_service(1, 0, "c1", "light", "turn_on"),
        state(2, 1, "light.kitchen", "on", "c1"),
    ]);
    let request = EventsRequest::new(at(0), at(10)).with_time_format(TimeFormat::Timestamp);

    let entries = logbook.query(&request).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].when.as_timestamp(), Some(at(1).timestamp() as f64));
    assert_eq!(entries[0].context_service.as_deref(), Some("turn_on"));
}

#[test]
fn test_execute_raw_command() {
    let logbook = create_logbook();

    let output = logbook
        .execute(Command::LogEntry {
            name: "Vacuum".into(),
            message: "finished".into(),
            domain: Some("vacuum".into()),
            entity_id: None,
            context_id: Some("run-1".into()),
        })
        .unwrap();

    assert_eq!(
        serde_json::to_value(&output).unwrap(),
        serde_json::json!({"event_id": 1, "context_id": "run-1"})
    );

    let output = logbook
        .execute(Command::Logbook {
            datetime: None,
            period: None,
            entity: None,
            end_time: None,
            context_id: Some("run-1".into()),
        })
        .unwrap();
    match output {
        Output::Entries(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].domain.as_deref(), Some("vacuum"));
        }
        other => panic!("Expected Entries output, got {:?}", other),
    }
}

// =============================================================================
// RECORDING
// =============================================================================

#[test]
fn test_log_entry_is_listed() {
    let logbook = create_logbook();
    let (event_id, context_id) = logbook
        .log_entry("Front door", "was opened", None, Some("binary_sensor.front_door"))
        .unwrap();
    assert_eq!(event_id, 1);
    assert_eq!(context_id.len(), 32);

    let entries = logbook.logbook(None, None, None, None, None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].domain.as_deref(), Some("binary_sensor"));
    assert_eq!(entries[0].when.as_iso(), Some("2022-04-15T12:00:00+00:00"));
}

#[test]
fn test_log_entry_defaults_to_logbook_domain() {
    let logbook = create_logbook();
    logbook.log_entry("Note", "hello", None, None).unwrap();

    let entries = logbook.logbook(None, None, None, None, None).unwrap();
    assert_eq!(entries[0].domain.as_deref(), Some("logbook"));
    assert!(entries[0].entity_id.is_none());
}

#[test]
fn test_recorded_rows_share_payloads() {
    let logbook = create_logbook();
    let trigger = data(json!({"name": "Morning", "entity_id": "automation.morning"}));
    for i in 0..3 {
        logbook
            .record_event(
                "automation_triggered",
                &trigger,
                &RecordContext::with_id(format!("c{}", i)),
            )
            .unwrap();
    }
    logbook
        .record_state(
            "light.kitchen",
            "on",
            &data(json!({"friendly_name": "Kitchen Light"})),
            &RecordContext::with_id("c0"),
        )
        .unwrap();

    assert_eq!(logbook.store().len(), 4);
    assert_eq!(logbook.store().shared_payload_count(), 2);

    let entries = logbook.logbook(None, None, None, None, None).unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[3].context_name.as_deref(), Some("Morning"));
}

#[test]
fn test_save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.jsonl");

    let logbook = logbook_with_rows(vec![
        call_service(1, 0, "c1", "light", "turn_on"),
        state(2, 1, "light.kitchen", "on", "c1")
            .with_shared_attrs(r#"{"friendly_name": "Kitchen Light"}"#),
    ]);
    logbook.save(&path).unwrap();

    let reopened = Logbook::builder()
        .rows_path(&path)
        .clock(logbook::fixed_clock(now()))
        .build()
        .unwrap();

    assert_eq!(reopened.store().snapshot(), logbook.store().snapshot());
    assert_eq!(whole_day(&reopened), whole_day(&logbook));
}

#[test]
fn test_open_missing_dump() {
    let dir = tempfile::tempdir().unwrap();
    let err = Logbook::open(dir.path().join("missing.jsonl")).unwrap_err();
    assert!(!err.is_request_error());
}
