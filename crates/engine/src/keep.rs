//! Keep/drop decision for non-state rows
//!
//! Runs on every candidate row, so it only inspects the raw payload text
//! and never decodes it.

use logbook_core::event_type::HA_DOMAIN_ENTITY_ID;
use logbook_core::extract::Field;
use logbook_core::{EntityFilter, Row};

use crate::registry::DescriberRegistry;

/// Whether an event row should be humanized.
///
/// - start/stop: kept if the filter accepts `homeassistant._`
/// - payload names an entity: kept if the filter accepts it
/// - otherwise the registered domain, or a `domain` in the payload, is
///   checked as `<domain>._`; rows with no domain at all are dropped
///
/// A missing filter accepts everything that reaches the domain check.
pub fn keep_row(row: &Row, registry: &DescriberRegistry, filter: Option<&EntityFilter>) -> bool {
    let accepts = |entity_id: &str| filter.map_or(true, |f| f.accepts(entity_id));

    if row.kind().is_lifecycle() {
        return accepts(HA_DOMAIN_ENTITY_ID);
    }

    if let Some(entity_id) = row.event_data_extract(Field::EntityId) {
        return accepts(entity_id);
    }

    let domain = registry
        .domain(&row.event_type)
        .or_else(|| row.event_data_extract(Field::Domain));

    match domain {
        Some(domain) => accepts(&format!("{}._", domain)),
        None => false,
    }
}
