//! Record: the immutable, timestamped unit of stream data
//!
//! A record is created only by `DocumentStore::insert`, never mutated, and
//! destroyed only by cap eviction or an explicit administrative delete.
//! The payload is stream-specific structured data and is opaque to the
//! bounded-log layer; validation happens at the caller's boundary.

use crate::timestamp::Timestamp;
use crate::types::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An immutable, append-only unit of data within a stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Storage-assigned, collection-scoped identifier
    pub id: RecordId,
    /// Timestamp assigned at append time
    pub created_at: Timestamp,
    /// Stream-specific payload, opaque to the log layer
    pub payload: Value,
}

impl Record {
    /// Create a record from its parts
    ///
    /// Intended for storage implementations; everyone else receives records
    /// from `insert` or `find`.
    pub fn new(id: RecordId, created_at: Timestamp, payload: Value) -> Self {
        Record {
            id,
            created_at,
            payload,
        }
    }

    /// The total-order sort key: `(created_at, id)`
    ///
    /// Timestamps from concurrent writers can collide at microsecond
    /// granularity; the storage-assigned id breaks the tie.
    pub fn sort_key(&self) -> (Timestamp, RecordId) {
        (self.created_at, self.id)
    }
}
