//! LogEntry command handler

use logbook_core::event_type::{
    ATTR_DOMAIN, ATTR_ENTITY_ID, ATTR_MESSAGE, ATTR_NAME, EVENT_LOGBOOK_ENTRY, LOGBOOK_DOMAIN,
};
use logbook_core::{valid_entity_id, EventData};
use logbook_storage::RecordContext;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::{Error, Executor, Output, Result};

/// Handle LogEntry command.
///
/// An entry with neither a domain nor an entity id is filed under the
/// `logbook` domain; otherwise nothing would ever let it through the row
/// filter.
pub fn log_entry(
    executor: &Executor,
    name: String,
    message: String,
    domain: Option<String>,
    entity_id: Option<String>,
    context_id: Option<String>,
) -> Result<Output> {
    if let Some(entity_id) = &entity_id {
        if !valid_entity_id(entity_id) {
            return Err(Error::InvalidEntityId {
                value: entity_id.clone(),
            });
        }
    }
    if let Some(domain) = &domain {
        if !is_slug(domain) {
            return Err(Error::InvalidInput {
                reason: format!("invalid domain: {}", domain),
            });
        }
    }
    let domain = match (&domain, &entity_id) {
        (None, None) => Some(LOGBOOK_DOMAIN.to_string()),
        _ => domain,
    };

    let mut data = EventData::new();
    data.insert(ATTR_NAME.to_string(), Value::String(name));
    data.insert(ATTR_MESSAGE.to_string(), Value::String(message));
    if let Some(domain) = domain {
        data.insert(ATTR_DOMAIN.to_string(), Value::String(domain));
    }
    if let Some(entity_id) = entity_id {
        data.insert(ATTR_ENTITY_ID.to_string(), Value::String(entity_id));
    }

    let context_id = context_id.unwrap_or_else(|| Uuid::new_v4().simple().to_string());
    let row = executor.store.record_event(
        EVENT_LOGBOOK_ENTRY,
        (executor.clock)(),
        &data,
        &RecordContext::with_id(context_id.clone()),
    )?;
    debug!(event_id = row.event_id, context_id = %context_id, "recorded logbook entry");

    Ok(Output::Recorded {
        event_id: row.event_id,
        context_id,
    })
}

fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
