//! Storage abstraction for the document store
//!
//! This module defines the `DocumentStore` trait that the bounded-log and
//! CRUD layers are built on. The trait enables swapping the in-memory
//! implementation for a hosted document store without breaking upper layers.

use crate::error::Result;
use crate::record::Record;
use crate::types::{ListOrder, RecordId};
use serde_json::Value;

/// Document-store abstraction
///
/// The bounded-log layer is built strictly on the first four operations
/// (insert, count, find, delete_many). `get` and `update` exist for the
/// uncapped CRUD surfaces (posts, testimonials, users, site images) and
/// are never called during cap enforcement.
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). No atomicity is promised
/// across calls; callers that sequence insert → count → delete_many must
/// tolerate interleaving with other writers.
pub trait DocumentStore: Send + Sync {
    /// Insert a payload into a collection
    ///
    /// The store assigns the record id (monotonic per collection) and the
    /// creation timestamp. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the store cannot be reached.
    fn insert(&self, collection: &str, payload: Value) -> Result<Record>;

    /// Count all records in a collection
    ///
    /// An unknown collection counts as empty, not as an error: collections
    /// come into existence on first insert.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the store cannot be reached.
    fn count(&self, collection: &str) -> Result<usize>;

    /// List up to `limit` records in `(created_at, id)` order
    ///
    /// `offset` skips that many records from the start of the ordered
    /// sequence. Read-only; results are a point-in-time snapshot, not a
    /// cursor.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the store cannot be reached.
    fn find(
        &self,
        collection: &str,
        order: ListOrder,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Record>>;

    /// Delete the given ids in one batch, returning how many existed
    ///
    /// Ids that are already gone are skipped, not errors: concurrent
    /// evictors may race to delete the same boundary records.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the store cannot be reached.
    fn delete_many(&self, collection: &str, ids: &[RecordId]) -> Result<usize>;

    /// Fetch a single record by id
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the store cannot be reached.
    fn get(&self, collection: &str, id: RecordId) -> Result<Option<Record>>;

    /// Replace the payload of an existing record, keeping id and timestamp
    ///
    /// Returns false if the id does not exist. Used only by the CRUD
    /// surfaces (e.g. role updates, cached site images); stream records are
    /// immutable and never updated.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the store cannot be reached.
    fn update(&self, collection: &str, id: RecordId, payload: Value) -> Result<bool>;
}
