//! Pass-scoped caches
//!
//! [`EventCache`] decodes each distinct payload string once. Decoded maps
//! live in an arena owned by the cache; rows are mapped to arena slots both
//! by payload text and by their pull sequence in the pass, so a row looked
//! up twice (once to build its entry, once as somebody's context) never
//! touches the payload again. Stored event ids are not trusted to be unique.
//!
//! [`EntityNameCache`] memoizes display names per entity id.

use logbook_core::entity_id::split_entity_id;
use logbook_core::extract::Field;
use logbook_core::{Error, EventData, Result, Row};
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::trace;

use crate::lazy::LazyEventPayload;
use crate::metadata::EntityMetadata;

/// Slot of the shared empty payload
const EMPTY_SLOT: usize = 0;

/// Decoded payloads for one pass.
#[derive(Debug)]
pub struct EventCache {
    decoded: Vec<EventData>,
    by_source: FxHashMap<String, usize>,
    by_seq: FxHashMap<usize, usize>,
}

impl Default for EventCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            decoded: vec![EventData::new()],
            by_source: FxHashMap::default(),
            by_seq: FxHashMap::default(),
        }
    }

    /// Number of payload decodes performed so far.
    pub fn decode_count(&self) -> usize {
        self.decoded.len() - 1
    }

    /// Arena slot holding the decoded payload of `row`, decoding on first use.
    ///
    /// `seq` is the position of `row` in the pass.
    ///
    /// # Errors
    ///
    /// [`Error::Payload`] when the stored payload is not a JSON object.
    pub fn slot(&mut self, seq: usize, row: &Row) -> Result<usize> {
        if let Some(&slot) = self.by_seq.get(&seq) {
            return Ok(slot);
        }
        let slot = match row.event_data_source() {
            None => EMPTY_SLOT,
            Some(raw) => match self.by_source.get(raw) {
                Some(&slot) => slot,
                None => {
                    let data = decode(raw)?;
                    self.decoded.push(data);
                    let slot = self.decoded.len() - 1;
                    self.by_source.insert(raw.to_string(), slot);
                    trace!(event_id = row.event_id, slot, "decoded payload");
                    slot
                }
            },
        };
        self.by_seq.insert(seq, slot);
        Ok(slot)
    }

    /// Decoded payload in `slot`.
    pub fn data(&self, slot: usize) -> &EventData {
        &self.decoded[slot]
    }

    /// View of `row` with its decoded payload.
    pub fn get<'r>(&'r mut self, seq: usize, row: &'r Row) -> Result<LazyEventPayload<'r>> {
        let slot = self.slot(seq, row)?;
        Ok(LazyEventPayload::new(row, &self.decoded[slot]))
    }
}

fn decode(raw: &str) -> Result<EventData> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(EventData::new()),
        other => Err(Error::Payload {
            message: format!("expected an object, found {}", kind_of(&other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Display names resolved during one pass.
#[derive(Debug, Default)]
pub struct EntityNameCache {
    names: FxHashMap<String, String>,
}

impl EntityNameCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the display name of `entity_id`.
    ///
    /// Live name first, then the `friendly_name` stored on `row`, then the
    /// object id with underscores as spaces. The last one is not memoized:
    /// a later row may still carry a stored name.
    pub fn get(&mut self, entity_id: &str, row: &Row, metadata: &dyn EntityMetadata) -> String {
        if let Some(name) = self.names.get(entity_id) {
            return name.clone();
        }
        let resolved = metadata
            .friendly_name(entity_id)
            .or_else(|| row.attributes_extract(Field::FriendlyName).map(str::to_string));
        match resolved {
            Some(name) => {
                self.names.insert(entity_id.to_string(), name.clone());
                name
            }
            None => split_entity_id(entity_id).1.replace('_', " "),
        }
    }

    /// Number of memoized names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing is memoized
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
