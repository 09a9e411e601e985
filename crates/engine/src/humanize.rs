//! The humanization pass
//!
//! [`Humanizer`] pulls rows from a [`Rows`] stream and yields entries. Per
//! row it:
//!
//! 1. records the row in the context lookup (every row, including ones
//!    that are about to be dropped, so they can still act as a context)
//! 2. drops context-only rows, service calls, and event rows rejected by
//!    [`keep_row`]
//! 3. builds the entry for the row's kind and resolves its context
//!
//! The pass is lazy, single-use and stops at the first error.

use logbook_core::entity_id::split_entity_id;
use logbook_core::event_type::{
    ATTR_DOMAIN, ATTR_ENTITY_ID, ATTR_MESSAGE, ATTR_NAME, HA_DOMAIN, HA_NAME, SENSOR_DOMAIN,
};
use logbook_core::extract::Field;
use logbook_core::{EntityFilter, Error, EventKind, LogbookEntry, Result, Row, Rows, TimeFormat, When};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::cache::{EntityNameCache, EventCache};
use crate::context::{ContextAugmenter, ContextLookup};
use crate::keep::keep_row;
use crate::lazy::value_string;
use crate::metadata::EntityMetadata;
use crate::registry::DescriberRegistry;

/// Lazy stream of entries for one request.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use logbook_core::{Row, RowSource, EventQuery};
/// use logbook_engine::{DescriberRegistry, Humanizer, NoMetadata};
///
/// let t = Utc.with_ymd_and_hms(2022, 4, 15, 5, 20, 0).unwrap();
/// let rows = vec![Row::new(1, "homeassistant_start", t)];
/// let registry = DescriberRegistry::empty();
///
/// let entries: Vec<_> = Humanizer::new(rows.rows(&EventQuery::new(t, t)).unwrap(), &registry, &NoMetadata)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(entries[0].message.as_deref(), Some("started"));
/// ```
pub struct Humanizer<'a> {
    rows: Rows<'a>,
    registry: &'a DescriberRegistry,
    metadata: &'a dyn EntityMetadata,
    entities_filter: Option<&'a EntityFilter>,
    time_format: TimeFormat,
    lookup: ContextLookup,
    names: EntityNameCache,
    events: EventCache,
    continuous: FxHashMap<String, bool>,
    pulled: usize,
    finished: bool,
}

impl<'a> Humanizer<'a> {
    /// Start a pass over `rows` with ISO times and no entity filter.
    pub fn new(
        rows: Rows<'a>,
        registry: &'a DescriberRegistry,
        metadata: &'a dyn EntityMetadata,
    ) -> Self {
        Self {
            rows,
            registry,
            metadata,
            entities_filter: None,
            time_format: TimeFormat::Iso,
            lookup: ContextLookup::new(),
            names: EntityNameCache::new(),
            events: EventCache::new(),
            continuous: FxHashMap::default(),
            pulled: 0,
            finished: false,
        }
    }

    /// Filter event rows through `filter`.
    pub fn with_entities_filter(mut self, filter: Option<&'a EntityFilter>) -> Self {
        self.entities_filter = filter;
        self
    }

    /// Render `when` with `format`.
    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    /// Distinct payloads decoded so far in this pass.
    pub fn decode_count(&self) -> usize {
        self.events.decode_count()
    }

    fn selected(&self, row: &Row) -> bool {
        if row.context_only {
            return false;
        }
        match row.kind() {
            EventKind::StateChanged => true,
            EventKind::CallService => false,
            _ => keep_row(row, self.registry, self.entities_filter),
        }
    }

    fn is_continuous(&mut self, entity_id: &str) -> bool {
        if split_entity_id(entity_id).0 != SENSOR_DOMAIN {
            return false;
        }
        if let Some(&continuous) = self.continuous.get(entity_id) {
            return continuous;
        }
        let continuous = self.metadata.is_continuous_sensor(entity_id);
        self.continuous.insert(entity_id.to_string(), continuous);
        continuous
    }

    fn augmenter(&mut self) -> ContextAugmenter<'_> {
        ContextAugmenter {
            lookup: &self.lookup,
            names: &mut self.names,
            events: &mut self.events,
            registry: self.registry,
            metadata: self.metadata,
        }
    }

    fn humanize(&mut self, seq: usize, row: &Row) -> Result<Option<LogbookEntry>> {
        let when = self.time_format.format(&row.time_fired);
        match row.kind() {
            EventKind::StateChanged => self.state_changed(when, row),
            EventKind::External(event_type) => self.described(when, event_type, seq, row),
            EventKind::Start => Ok(Some(lifecycle(when, "started"))),
            EventKind::Stop => Ok(Some(lifecycle(when, "stopped"))),
            EventKind::LogbookEntry => self.logbook_entry(when, seq, row).map(Some),
            EventKind::CallService => Ok(None),
        }
    }

    fn state_changed(&mut self, when: When, row: &Row) -> Result<Option<LogbookEntry>> {
        let entity_id = row.entity_id.as_deref().ok_or_else(|| {
            Error::internal(format!("state_changed row {} has no entity_id", row.event_id))
        })?;

        if self.is_continuous(entity_id) {
            trace!(entity_id, "skipping continuous sensor");
            return Ok(None);
        }

        let mut entry = LogbookEntry::new(when);
        entry.name = Some(self.names.get(entity_id, row, self.metadata));
        entry.state = row.state.clone();
        entry.entity_id = Some(entity_id.to_string());
        entry.icon = row.attributes_extract(Field::Icon).map(str::to_string);

        self.augmenter().augment(&mut entry, Some(entity_id), row)?;
        Ok(Some(entry))
    }

    fn described(
        &mut self,
        when: When,
        event_type: &str,
        seq: usize,
        row: &Row,
    ) -> Result<Option<LogbookEntry>> {
        let registry = self.registry;
        let Some((domain, describe)) = registry.get(event_type) else {
            return Ok(None);
        };
        let description = describe(&self.events.get(seq, row)?);

        let mut entry = LogbookEntry::from_description(when, domain, description);
        let entity_id = entry.entity_id.clone();
        self.augmenter().augment(&mut entry, entity_id.as_deref(), row)?;
        Ok(Some(entry))
    }

    fn logbook_entry(&mut self, when: When, seq: usize, row: &Row) -> Result<LogbookEntry> {
        let event = self.events.get(seq, row)?;
        let data = event.data();

        let entity_id = data.get(ATTR_ENTITY_ID).and_then(value_string);
        let domain = data.get(ATTR_DOMAIN).and_then(value_string).or_else(|| {
            entity_id
                .as_deref()
                .map(|id| split_entity_id(id).0.to_string())
        });

        let mut entry = LogbookEntry::new(when);
        entry.name = data.get(ATTR_NAME).and_then(value_string);
        entry.message = data.get(ATTR_MESSAGE).and_then(value_string);
        entry.domain = domain;
        entry.entity_id = entity_id.clone();

        self.augmenter().augment(&mut entry, entity_id.as_deref(), row)?;
        Ok(entry)
    }
}

fn lifecycle(when: When, message: &str) -> LogbookEntry {
    let mut entry = LogbookEntry::new(when);
    entry.name = Some(HA_NAME.to_string());
    entry.message = Some(message.to_string());
    entry.domain = Some(HA_DOMAIN.to_string());
    entry
}

impl Iterator for Humanizer<'_> {
    type Item = Result<LogbookEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let row = match self.rows.next() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                Some(Ok(row)) => row,
            };

            let seq = self.pulled;
            self.pulled += 1;

            self.lookup.observe(seq, &row);
            if !self.selected(&row) {
                trace!(event_id = row.event_id, event_type = %row.event_type, "row not humanized");
                continue;
            }

            match self.humanize(seq, &row) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
