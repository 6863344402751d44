//! Core types and traits for the Serleo backend
//!
//! This crate defines the foundational pieces used throughout the system:
//! - Record: immutable, timestamped unit of stream data
//! - RecordId: storage-assigned, collection-scoped identifier
//! - Timestamp: microsecond-precision creation time
//! - ListOrder: listing direction (newest-first / oldest-first)
//! - Error: shared error taxonomy
//! - DocumentStore: the storage trait upper layers are built on

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod timestamp;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use record::Record;
pub use timestamp::Timestamp;
pub use traits::DocumentStore;
pub use types::{ListOrder, RecordId};
