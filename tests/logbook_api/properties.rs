//! Property Tests
//!
//! Invariants of a humanization pass over random row sequences.

use crate::*;
use logbook::logbook_engine::keep_row;
use logbook::{EntityFilter, FilterSpec, NoMetadata};
use proptest::prelude::*;

const ENTITIES: [&str; 5] = [
    "light.kitchen",
    "light.porch",
    "switch.fan",
    "automation.morning",
    "binary_sensor.front_door",
];

const EVENT_TYPES: [&str; 5] = [
    "automation_triggered",
    "script_started",
    "logbook_entry",
    "custom_event",
    "call_service",
];

/// Row `i` of a mixed sequence: a state change, a service call or a
/// described event, depending on `kind`.
fn mixed_row(i: usize, kind: usize, entity: usize, context: usize) -> Row {
    let id = i as u64 + 1;
    let secs = i as i64;
    let context = format!("c{}", context);
    match kind {
        0 | 1 => state(id, secs, ENTITIES[entity], if kind == 0 { "on" } else { "off" }, &context),
        2 => call_service(id, secs, &context, "light", "turn_on"),
        _ => automation(id, secs, ENTITIES[entity].replace('.', "_").as_str(), "Auto", &context),
    }
}

fn mixed_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0..4usize, 0..ENTITIES.len(), 0..4usize), 0..40).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (kind, entity, context))| mixed_row(i, kind, entity, context))
            .collect()
    })
}

fn filter_spec(entities: Vec<bool>, domains: Vec<bool>) -> FilterSpec {
    FilterSpec {
        entities: ENTITIES
            .iter()
            .zip(entities)
            .filter(|(_, pick)| *pick)
            .map(|(e, _)| e.to_string())
            .collect(),
        domains: ["light", "switch", "automation"]
            .iter()
            .zip(domains)
            .filter(|(_, pick)| *pick)
            .map(|(d, _)| d.to_string())
            .collect(),
        ..FilterSpec::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn shared_payloads_decode_once(picks in prop::collection::vec(0..3usize, 1..30)) {
        let payloads = [
            r#"{"name": "Morning", "entity_id": "automation.morning"}"#,
            r#"{"name": "Evening", "entity_id": "automation.evening"}"#,
            r#"{"name": "Night", "entity_id": "automation.night"}"#,
        ];
        let rows: Vec<Row> = picks
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                Row::new(i as u64 + 1, "automation_triggered", at(i as i64))
                    .with_context(format!("c{}", i))
                    .with_shared_data(payloads[p])
            })
            .collect();

        let registry = standard_registry();
        let query = EventQuery::new(at(0), at(100));
        let mut humanizer = Humanizer::new(rows.rows(&query).unwrap(), &registry, &NoMetadata);
        let entries: Vec<LogbookEntry> = humanizer.by_ref().map(|e| e.unwrap()).collect();

        let mut distinct = picks.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(humanizer.decode_count(), distinct.len());

        prop_assert_eq!(entries.len(), picks.len());
        for (entry, &p) in entries.iter().zip(&picks) {
            let expected = ["Morning", "Evening", "Night"][p];
            prop_assert_eq!(entry.name.as_deref(), Some(expected));
        }
    }

    #[test]
    fn keep_depends_only_on_entity_id(
        event_type in prop::sample::select(EVENT_TYPES.to_vec()),
        entity in 0..ENTITIES.len(),
        include_entities in prop::collection::vec(any::<bool>(), ENTITIES.len()),
        include_domains in prop::collection::vec(any::<bool>(), 3),
        exclude_entities in prop::collection::vec(any::<bool>(), ENTITIES.len()),
        exclude_domains in prop::collection::vec(any::<bool>(), 3),
    ) {
        let filter = EntityFilter::new(
            &filter_spec(include_entities, include_domains),
            &filter_spec(exclude_entities, exclude_domains),
        )
        .unwrap();
        let entity_id = ENTITIES[entity];
        let row = Row::new(1, event_type, at(0)).with_event_data(format!(
            r#"{{"entity_id": "{}", "domain": "other"}}"#,
            entity_id
        ));

        prop_assert_eq!(
            keep_row(&row, &standard_registry(), Some(&filter)),
            filter.accepts(entity_id)
        );
    }

    #[test]
    fn continuous_sensors_never_appear(states in prop::collection::vec(any::<bool>(), 0..30)) {
        let metadata = StaticEntityMetadata::new().with_continuous_sensor("sensor.power");
        let rows: Vec<Row> = states
            .iter()
            .enumerate()
            .map(|(i, &continuous)| {
                let entity_id = if continuous { "sensor.power" } else { "sensor.mode" };
                state(i as u64 + 1, i as i64, entity_id, "1", &format!("c{}", i))
            })
            .collect();

        let entries = humanize(rows, &DescriberRegistry::empty(), &metadata);

        prop_assert_eq!(entries.len(), states.iter().filter(|c| !**c).count());
        prop_assert!(entries
            .iter()
            .all(|e| e.entity_id.as_deref() == Some("sensor.mode")));
    }

    #[test]
    fn never_attributed_to_itself(
        specs in prop::collection::vec((0..ENTITIES.len(), 0..4usize), 1..30)
    ) {
        let rows: Vec<Row> = specs
            .iter()
            .enumerate()
            .map(|(i, &(entity, context))| {
                state(i as u64 + 1, i as i64, ENTITIES[entity], "on", &format!("c{}", context))
            })
            .collect();

        let entries = humanize(rows.clone(), &DescriberRegistry::empty(), &NoMetadata);
        prop_assert_eq!(entries.len(), rows.len());

        for (i, entry) in entries.iter().enumerate() {
            let origin = rows
                .iter()
                .find(|r| r.context_id == rows[i].context_id)
                .unwrap();
            if origin.event_id == rows[i].event_id {
                prop_assert!(!entry.has_context());
            } else {
                prop_assert_eq!(entry.context_event_type.as_deref(), Some("state_changed"));
                prop_assert_eq!(entry.context_entity_id.as_deref(), origin.entity_id.as_deref());
            }
        }
    }

    #[test]
    fn humanization_is_idempotent(rows in mixed_rows()) {
        let registry = standard_registry();
        let first = humanize(rows.clone(), &registry, &NoMetadata);
        let second = humanize(rows, &registry, &NoMetadata);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn store_selection_is_time_ordered(rows in mixed_rows()) {
        let mut shuffled = rows.clone();
        shuffled.reverse();
        let logbook = logbook_with_rows(shuffled);

        let entries = logbook
            .get_events("2022-04-15T00:00:00Z", None, None, None)
            .unwrap();
        let times: Vec<f64> = entries.iter().filter_map(|e| e.when.as_timestamp()).collect();
        prop_assert_eq!(times.len(), entries.len());
        prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }
}
