//! In-memory document store
//!
//! `MemoryStore` backs the whole system in tests and single-process
//! deployments. Collections live in a `DashMap` keyed by collection name;
//! each collection carries its own monotonic id counter.
//!
//! ## Concurrency
//!
//! Each trait method locks exactly one collection shard for its own
//! duration and nothing longer. There is deliberately no coordination
//! across calls: a caller sequencing insert → count → delete_many races
//! other writers, which is exactly the tolerance the bounded-log layer is
//! designed around (bounded transient overshoot, idempotent eviction).

use dashmap::DashMap;
use serleo_core::{DocumentStore, Error, ListOrder, Record, RecordId, Result, Timestamp};
use serde_json::Value;
use tracing::debug;

/// Per-collection state: id counter plus records in insertion order
#[derive(Debug, Default)]
struct Collection {
    next_id: u64,
    records: Vec<Record>,
}

impl Collection {
    fn allocate_id(&mut self) -> RecordId {
        let id = RecordId::from_u64(self.next_id);
        self.next_id += 1;
        id
    }
}

/// In-memory `DocumentStore` implementation
///
/// # Example
///
/// ```
/// use serleo_store::MemoryStore;
/// use serleo_core::{DocumentStore, ListOrder};
/// use serde_json::json;
///
/// let store = MemoryStore::new();
/// let rec = store.insert("notes", json!({"text": "hello"})).unwrap();
/// let listed = store.find("notes", ListOrder::NewestFirst, 10, 0).unwrap();
/// assert_eq!(listed[0].id, rec.id);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Collection>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            collections: DashMap::new(),
        }
    }

    /// Names of collections that have received at least one insert
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&self, collection: &str, payload: Value) -> Result<Record> {
        let mut entry = self.collections.entry(collection.to_string()).or_default();
        let id = entry.allocate_id();
        let record = Record::new(id, Timestamp::now(), payload);
        entry.records.push(record.clone());
        debug!(collection, %id, "inserted record");
        Ok(record)
    }

    fn count(&self, collection: &str) -> Result<usize> {
        Ok(self
            .collections
            .get(collection)
            .map_or(0, |c| c.records.len()))
    }

    fn find(
        &self,
        collection: &str,
        order: ListOrder,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Record>> {
        let Some(entry) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };
        let mut records = entry.records.clone();
        drop(entry);

        // Insertion order already matches (created_at, id) when the clock is
        // well behaved; sort anyway so the contract holds under clock skew.
        records.sort_by_key(|r| r.sort_key());
        if order == ListOrder::NewestFirst {
            records.reverse();
        }
        Ok(records.into_iter().skip(offset).take(limit).collect())
    }

    fn delete_many(&self, collection: &str, ids: &[RecordId]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let Some(mut entry) = self.collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = entry.records.len();
        entry.records.retain(|r| !ids.contains(&r.id));
        let removed = before - entry.records.len();
        debug!(collection, requested = ids.len(), removed, "batch delete");
        Ok(removed)
    }

    fn get(&self, collection: &str, id: RecordId) -> Result<Option<Record>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|c| c.records.iter().find(|r| r.id == id).cloned()))
    }

    fn update(&self, collection: &str, id: RecordId, payload: Value) -> Result<bool> {
        let Some(mut entry) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        match entry.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.payload = payload;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// A store wrapper that fails every call, for exercising error paths
///
/// Upper layers test their partial-failure policies (e.g. "eviction failure
/// must not roll back the insert") against this.
#[derive(Debug, Default)]
pub struct UnavailableStore;

impl DocumentStore for UnavailableStore {
    fn insert(&self, _: &str, _: Value) -> Result<Record> {
        Err(Error::storage_unavailable("store offline"))
    }
    fn count(&self, _: &str) -> Result<usize> {
        Err(Error::storage_unavailable("store offline"))
    }
    fn find(&self, _: &str, _: ListOrder, _: usize, _: usize) -> Result<Vec<Record>> {
        Err(Error::storage_unavailable("store offline"))
    }
    fn delete_many(&self, _: &str, _: &[RecordId]) -> Result<usize> {
        Err(Error::storage_unavailable("store offline"))
    }
    fn get(&self, _: &str, _: RecordId) -> Result<Option<Record>> {
        Err(Error::storage_unavailable("store offline"))
    }
    fn update(&self, _: &str, _: RecordId, _: Value) -> Result<bool> {
        Err(Error::storage_unavailable("store offline"))
    }
}
