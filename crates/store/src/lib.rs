//! In-memory document store for the Serleo backend
//!
//! Provides `MemoryStore`, the reference `DocumentStore` implementation,
//! and `UnavailableStore`, a failing store used to exercise error paths.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::{MemoryStore, UnavailableStore};
