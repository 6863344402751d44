//! Bounded append log
//!
//! ## Design
//!
//! 1. **Append-first**: a record is inserted before the cap is checked.
//!    Losing the newest write is worse than transient over-capacity, so an
//!    eviction failure after a successful insert never rolls the insert
//!    back; the stream is parked for a best-effort retry instead.
//!
//! 2. **Idempotent eviction**: enforcement only ever deletes records older
//!    than the `count - capacity` boundary, so it is safe to run
//!    redundantly and concurrently from multiple callers. Ids that another
//!    evictor already removed are skipped by the batch delete.
//!
//! 3. **No cross-request locking**: concurrent appends may both observe a
//!    full stream before either evicts, overshooting the cap by at most
//!    (concurrent writers - 1). The next append re-evaluates the live
//!    count, so the overshoot self-heals.
//!
//! ## Ordering
//!
//! Eviction and listing order on `(created_at, id)`. Wall clock alone is
//! not monotonic under concurrent writers; the storage-assigned id breaks
//! ties.

use crate::registry::{Retention, StreamRegistry};
use parking_lot::Mutex;
use serleo_core::{DocumentStore, Error, ListOrder, Record, RecordId, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Capacity-bounded append log over a document store
///
/// # Example
///
/// ```
/// use serleo_log::{BoundedLog, StreamRegistry};
/// use serleo_store::MemoryStore;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let registry = StreamRegistry::builder()
///     .capped("forum_messages", 200)
///     .build()
///     .unwrap();
/// let log = BoundedLog::new(Arc::new(MemoryStore::new()), registry);
///
/// let record = log.append("forum_messages", json!({"content": "hi"})).unwrap();
/// let latest = log.recent("forum_messages", 10).unwrap();
/// assert_eq!(latest[0].id, record.id);
/// ```
pub struct BoundedLog {
    store: Arc<dyn DocumentStore>,
    registry: StreamRegistry,
    /// Streams whose post-insert eviction failed and awaits a retry
    pending_evictions: Mutex<BTreeSet<String>>,
}

impl BoundedLog {
    /// Create a log over the given store and stream table
    pub fn new(store: Arc<dyn DocumentStore>, registry: StreamRegistry) -> Self {
        BoundedLog {
            store,
            registry,
            pending_evictions: Mutex::new(BTreeSet::new()),
        }
    }

    /// The underlying store; the uncapped CRUD surfaces ride the same one
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// The stream table this log was configured with
    pub fn registry(&self) -> &StreamRegistry {
        &self.registry
    }

    /// Append a payload to a stream
    ///
    /// Inserts the record, then enforces the stream's cap by deleting the
    /// oldest overage. The eviction step failing does NOT undo the insert:
    /// the failure is logged, the stream is parked in the pending set, and
    /// enforcement runs again on the next append to the stream.
    ///
    /// A caller that times out must not assume the record was not created;
    /// the insert may have succeeded even if enforcement did not. Retrying
    /// the whole call creates a duplicate record (there is no idempotency
    /// key).
    ///
    /// # Errors
    ///
    /// `Error::Configuration` for an unknown stream;
    /// `Error::StorageUnavailable` if the insert itself fails.
    pub fn append(&self, stream: &str, payload: Value) -> Result<Record> {
        let config = self.registry.config(stream)?;
        let record = self.store.insert(config.name(), payload)?;
        debug!(stream, id = %record.id, "appended record");

        if let Retention::Capped(capacity) = config.retention() {
            match self.evict_overage(stream, capacity) {
                Ok(evicted) => {
                    self.pending_evictions.lock().remove(stream);
                    if evicted > 0 {
                        debug!(stream, evicted, "cap enforced");
                    }
                }
                Err(err) => {
                    warn!(stream, error = %err, "eviction failed after append; stream retained over capacity");
                    self.pending_evictions.lock().insert(stream.to_string());
                }
            }
        }

        Ok(record)
    }

    /// List up to `limit` records, newest first
    pub fn recent(&self, stream: &str, limit: usize) -> Result<Vec<Record>> {
        self.recent_with(stream, ListOrder::NewestFirst, limit, 0)
    }

    /// List records with explicit order, limit, and offset
    ///
    /// Read-only; the result is an independent full snapshot. Polling
    /// consumers replace their view wholesale rather than merging.
    pub fn recent_with(
        &self,
        stream: &str,
        order: ListOrder,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Record>> {
        let config = self.registry.config(stream)?;
        self.store.find(config.name(), order, limit, offset)
    }

    /// Number of records currently in a stream
    pub fn len(&self, stream: &str) -> Result<usize> {
        let config = self.registry.config(stream)?;
        self.store.count(config.name())
    }

    /// Whether a stream holds no records
    pub fn is_empty(&self, stream: &str) -> Result<bool> {
        Ok(self.len(stream)? == 0)
    }

    /// Delete one record by id (administrative surfaces only)
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if the id is not present in the stream. This is
    /// the visible-error path; cap eviction uses the batch delete, where
    /// already-gone ids are a no-op.
    pub fn delete_by_id(&self, stream: &str, id: RecordId) -> Result<()> {
        let config = self.registry.config(stream)?;
        let removed = self.store.delete_many(config.name(), &[id])?;
        if removed == 0 {
            return Err(Error::not_found(config.name(), id));
        }
        debug!(stream, %id, "deleted record");
        Ok(())
    }

    /// Run cap enforcement for one stream, returning how many were evicted
    ///
    /// Idempotent: enforcing an already-within-cap stream deletes nothing,
    /// and enforcing the same over-capacity state twice converges on the
    /// same surviving set. Unbounded streams are a no-op.
    pub fn enforce_cap(&self, stream: &str) -> Result<usize> {
        let config = self.registry.config(stream)?;
        match config.retention() {
            Retention::Capped(capacity) => {
                let evicted = self.evict_overage(stream, capacity)?;
                self.pending_evictions.lock().remove(stream);
                Ok(evicted)
            }
            Retention::Unbounded => Ok(0),
        }
    }

    /// Streams whose last post-insert eviction failed
    pub fn pending_evictions(&self) -> Vec<String> {
        self.pending_evictions.lock().iter().cloned().collect()
    }

    /// Retry eviction for every parked stream, returning total evicted
    ///
    /// Best-effort: streams that fail again stay parked.
    pub fn retry_pending_evictions(&self) -> usize {
        let parked: Vec<String> = self.pending_evictions();
        let mut total = 0;
        for stream in parked {
            match self.enforce_cap(&stream) {
                Ok(evicted) => total += evicted,
                Err(err) => warn!(stream = %stream, error = %err, "eviction retry failed"),
            }
        }
        total
    }

    /// Delete the oldest `count - capacity` records by `(created_at, id)`
    fn evict_overage(&self, collection: &str, capacity: usize) -> Result<usize> {
        let count = self.store.count(collection)?;
        if count <= capacity {
            return Ok(0);
        }
        let excess = count - capacity;
        let oldest = self
            .store
            .find(collection, ListOrder::OldestFirst, excess, 0)?;
        let ids: Vec<RecordId> = oldest.iter().map(|r| r.id).collect();
        self.store.delete_many(collection, &ids)
    }
}
