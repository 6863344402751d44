//! Foundational identifier and ordering types
//!
//! - RecordId: storage-assigned, collection-scoped record identifier
//! - ListOrder: direction for listing records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier for a record
///
/// Ids are opaque to callers and scoped to a single collection. The storage
/// layer assigns them from a monotonically increasing per-collection
/// sequence, which makes the id a stable secondary sort key: wall-clock
/// timestamps alone do not totally order concurrent inserts, so eviction
/// and listing order on `(created_at, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(u64);

impl RecordId {
    /// Construct a RecordId from its raw sequence number
    ///
    /// Intended for storage implementations; callers should treat ids as
    /// opaque values handed back by `insert`.
    pub fn from_u64(raw: u64) -> Self {
        RecordId(raw)
    }

    /// Get the raw sequence number
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction for listing records
///
/// `NewestFirst` is the default everywhere; the forum surface requests
/// `OldestFirst` presentation by re-reversing a descending fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListOrder {
    /// Reverse chronological: non-increasing `(created_at, id)`
    #[default]
    NewestFirst,
    /// Chronological: non-decreasing `(created_at, id)`
    OldestFirst,
}

impl ListOrder {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            ListOrder::NewestFirst => ListOrder::OldestFirst,
            ListOrder::OldestFirst => ListOrder::NewestFirst,
        }
    }
}
