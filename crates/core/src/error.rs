//! Error types for the Serleo backend core
//!
//! This module defines the error taxonomy shared by every layer.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Three failure classes exist:
//! - `Configuration`: unknown stream name or invalid capacity. Fatal,
//!   surfaced to the operator, never retried.
//! - `StorageUnavailable`: transient document-store failure. Safe to retry
//!   the whole call; a retried append may create a duplicate record.
//! - `NotFound`: explicit delete/get target missing. Only the admin-facing
//!   surfaces treat this as visible; cap eviction treats missing ids as a
//!   no-op and never produces it.

use crate::types::RecordId;
use thiserror::Error;

/// Result type alias for Serleo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the document-store and stream layers
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Unknown stream name or invalid stream capacity
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transient failure reaching the underlying document store
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Record not found in the named collection
    #[error("record {id} not found in collection '{collection}'")]
    NotFound {
        /// Collection that was searched
        collection: String,
        /// The missing record id
        id: RecordId,
    },
}

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a storage-unavailable error
    pub fn storage_unavailable(msg: impl Into<String>) -> Self {
        Error::StorageUnavailable(msg.into())
    }

    /// Create a not-found error for a collection/id pair
    pub fn not_found(collection: impl Into<String>, id: RecordId) -> Self {
        Error::NotFound {
            collection: collection.into(),
            id,
        }
    }

    /// Whether the caller may retry the failed call as a whole
    ///
    /// Only `StorageUnavailable` is retryable. Note that a retried append
    /// creates a duplicate record; there is no idempotency key.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::StorageUnavailable(_))
    }

    /// Whether this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}
