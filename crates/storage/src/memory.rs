//! In-memory row store
//!
//! Rows are kept in one vector ordered by `time_fired`; rows with equal fire
//! times keep their insertion order. Reads take a snapshot of the selected
//! rows under a read lock, so a humanization pass never holds the lock while
//! it runs.
//!
//! Recorded payloads go into the `shared_*` columns, de-duplicated by their
//! serialized text the way the recorder shares identical event data and
//! attribute blobs between rows. The store only remembers a hash per
//! distinct payload.
//!
//! Ids are allocated above the largest stored id. `u64::MAX` is never
//! allocated; once the id space is used up, recording fails.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use logbook_core::event_type::EVENT_STATE_CHANGED;
use logbook_core::{Error, EventData, EventQuery, Result, Row, RowSource, Rows};
use parking_lot::RwLock;
use rustc_hash::{FxHashSet, FxHasher};
use tracing::debug;

use crate::select::select;

/// Context ids attached to a recorded event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordContext {
    /// Context id
    pub id: Option<String>,
    /// User that created the context
    pub user_id: Option<String>,
    /// Parent context id
    pub parent_id: Option<String>,
}

impl RecordContext {
    /// Context with only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// Time-ordered in-memory rows.
///
/// # Thread Safety
///
/// All operations take `&self`. Writers serialize on an internal RwLock;
/// readers copy out the rows they select and release it immediately.
#[derive(Debug)]
pub struct MemoryStore {
    rows: RwLock<Vec<Row>>,
    /// Hashes of the distinct serialized payloads
    shared: RwLock<FxHashSet<u64>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            shared: RwLock::new(FxHashSet::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a store holding `rows`, sorted by fire time.
    ///
    /// Row ids are kept as given; recorded rows get ids above the largest.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        let mut rows: Vec<Row> = rows.into_iter().collect();
        rows.sort_by(|a, b| a.time_fired.cmp(&b.time_fired));
        let next_id = rows
            .iter()
            .map(|r| r.event_id)
            .max()
            .map_or(1, |id| id.saturating_add(1));
        Self {
            rows: RwLock::new(rows),
            shared: RwLock::new(FxHashSet::default()),
            next_id: AtomicU64::new(next_id),
        }
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Number of distinct shared payloads recorded so far
    pub fn shared_payload_count(&self) -> usize {
        self.shared.read().len()
    }

    /// Copy of every stored row in fire-time order.
    pub fn snapshot(&self) -> Vec<Row> {
        self.rows.read().clone()
    }

    /// Insert a row, keeping fire-time order.
    pub fn insert(&self, row: Row) {
        self.next_id
            .fetch_max(row.event_id.saturating_add(1), Ordering::AcqRel);
        let mut rows = self.rows.write();
        let at = rows.partition_point(|r| r.time_fired <= row.time_fired);
        rows.insert(at, row);
    }

    fn allocate_id(&self) -> Result<u64> {
        self.next_id
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |id| id.checked_add(1))
            .map_err(|_| Error::row_source("event ids exhausted"))
    }

    fn share(&self, data: &EventData) -> Result<Option<String>> {
        if data.is_empty() {
            return Ok(None);
        }
        let raw = serde_json::to_string(data)?;
        let mut hasher = FxHasher::default();
        raw.hash(&mut hasher);
        self.shared.write().insert(hasher.finish());
        Ok(Some(raw))
    }

    /// Record an event and return the stored row.
    pub fn record_event(
        &self,
        event_type: &str,
        time_fired: DateTime<Utc>,
        data: &EventData,
        context: &RecordContext,
    ) -> Result<Row> {
        let mut row = Row::new(self.allocate_id()?, event_type, time_fired);
        row.shared_data = self.share(data)?;
        apply_context(&mut row, context);
        debug!(event_id = row.event_id, event_type, "recorded event");
        self.insert(row.clone());
        Ok(row)
    }

    /// Record a state change and return the stored row.
    pub fn record_state(
        &self,
        entity_id: &str,
        state: &str,
        attributes: &EventData,
        time_fired: DateTime<Utc>,
        context: &RecordContext,
    ) -> Result<Row> {
        let mut row = Row::new(self.allocate_id()?, EVENT_STATE_CHANGED, time_fired)
            .with_state(entity_id, state);
        row.shared_attrs = self.share(attributes)?;
        apply_context(&mut row, context);
        debug!(event_id = row.event_id, entity_id, "recorded state");
        self.insert(row.clone());
        Ok(row)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_context(row: &mut Row, context: &RecordContext) {
    row.context_id = context.id.clone();
    row.context_user_id = context.user_id.clone();
    row.context_parent_id = context.parent_id.clone();
}

impl RowSource for MemoryStore {
    fn rows<'a>(&'a self, query: &EventQuery) -> Result<Rows<'a>> {
        let selected = select(&self.rows.read(), query);
        debug!(
            selected = selected.len(),
            start = %query.start,
            end = %query.end,
            "selected rows for logbook query"
        );
        Ok(Box::new(selected.into_iter().map(Ok)))
    }
}
