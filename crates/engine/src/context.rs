//! Context resolution
//!
//! Every event carries a context id; the first event seen with a given id
//! is the origin of that context. [`ContextLookup`] indexes the first row
//! per context id as rows stream past, and [`ContextAugmenter`] uses it to
//! annotate an entry with what caused it.
//!
//! The lookup only ever sees rows at or before the current one. A row
//! scanned before its parent context therefore gets no attribution; no
//! backward seek is attempted.

use logbook_core::event_type::{is_script_automation_event, ATTR_DOMAIN, ATTR_SERVICE};
use logbook_core::extract::Field;
use logbook_core::{EventKind, LogbookEntry, Result, Row};
use rustc_hash::FxHashMap;

use crate::cache::{EntityNameCache, EventCache};
use crate::lazy::value_string;
use crate::metadata::EntityMetadata;
use crate::registry::DescriberRegistry;

/// First row seen per context id, with its position in the pass.
#[derive(Debug, Default)]
pub struct ContextLookup {
    first: FxHashMap<String, (usize, Row)>,
}

impl ContextLookup {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `row`, pulled at position `seq`, if it is the first with its
    /// context id.
    pub fn observe(&mut self, seq: usize, row: &Row) {
        if let Some(context_id) = row.context_id.as_deref() {
            if !self.first.contains_key(context_id) {
                self.first.insert(context_id.to_string(), (seq, row.clone()));
            }
        }
    }

    /// Origin row of `context_id` and its position. Rows without a context
    /// never resolve.
    pub fn get(&self, context_id: Option<&str>) -> Option<(usize, &Row)> {
        context_id
            .and_then(|id| self.first.get(id))
            .map(|(seq, row)| (*seq, row))
    }

    /// Number of distinct contexts seen
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// Check if no context has been seen
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

/// Fills the `context_*` fields of an entry.
///
/// Borrows the pass state it needs for the duration of one call.
pub struct ContextAugmenter<'p> {
    /// Context index built so far
    pub lookup: &'p ContextLookup,
    /// Display names
    pub names: &'p mut EntityNameCache,
    /// Decoded payloads
    pub events: &'p mut EventCache,
    /// Describers for external event types
    pub registry: &'p DescriberRegistry,
    /// Live entity metadata
    pub metadata: &'p dyn EntityMetadata,
}

impl<'p> ContextAugmenter<'p> {
    /// Annotate `entry`, produced from `row`, with its cause.
    ///
    /// `entity_id` is the entity the entry is about, if any. Missing or
    /// ambiguous context leaves the entry untouched.
    ///
    /// # Errors
    ///
    /// Only payload decode failures of the context row, which abort the pass.
    pub fn augment(
        &mut self,
        entry: &mut LogbookEntry,
        entity_id: Option<&str>,
        row: &Row,
    ) -> Result<()> {
        if let Some(user_id) = &row.context_user_id {
            entry.context_user_id = Some(user_id.clone());
        }

        let lookup = self.lookup;
        let Some((mut context_seq, mut context_row)) = lookup.get(row.context_id.as_deref())
        else {
            return Ok(());
        };

        if row.matches(context_row) {
            // Origin of its own context: only a distinct parent can explain it.
            match lookup.get(row.context_parent_id.as_deref()) {
                Some((seq, parent)) if !row.matches(parent) => {
                    context_seq = seq;
                    context_row = parent;
                }
                _ => return Ok(()),
            }
        }

        let event_type = context_row.event_type.as_str();

        if let Some(context_entity_id) = context_row.entity_id.as_deref() {
            entry.context_entity_id = Some(context_entity_id.to_string());
            entry.context_entity_id_name =
                Some(self.names.get(context_entity_id, context_row, self.metadata));
            entry.context_event_type = Some(event_type.to_string());
            return Ok(());
        }

        if matches!(context_row.kind(), EventKind::CallService) {
            let event = self.events.get(context_seq, context_row)?;
            entry.context_domain = event.data().get(ATTR_DOMAIN).and_then(value_string);
            entry.context_service = event.data().get(ATTR_SERVICE).and_then(value_string);
            entry.context_event_type = Some(event_type.to_string());
            return Ok(());
        }

        let Some(entity_id) = entity_id else {
            return Ok(());
        };

        let Some(attr_entity_id) = context_row.event_data_extract(Field::EntityId) else {
            return Ok(());
        };
        if attr_entity_id == entity_id && is_script_automation_event(event_type) {
            return Ok(());
        }

        entry.context_entity_id = Some(attr_entity_id.to_string());
        entry.context_entity_id_name =
            Some(self.names.get(attr_entity_id, context_row, self.metadata));
        entry.context_event_type = Some(event_type.to_string());

        if let Some((domain, describe)) = self.registry.get(event_type) {
            entry.context_domain = Some(domain.to_string());
            let event = self.events.get(context_seq, context_row)?;
            if let Some(name) = describe(&event).name {
                entry.context_name = Some(name);
            }
        }
        Ok(())
    }
}
