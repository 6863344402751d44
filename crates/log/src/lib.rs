//! Bounded append log for the Serleo backend
//!
//! The one invariant-bearing component of the system: a named stream of
//! immutable records over a document store, holding at most a configured
//! number of records by always evicting the oldest first.
//!
//! - `StreamRegistry` / `Retention`: the static stream → capacity table
//! - `BoundedLog`: append / recent / delete_by_id / cap enforcement

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bounded;
pub mod registry;

pub use bounded::BoundedLog;
pub use registry::{Retention, StreamConfig, StreamRegistry, StreamRegistryBuilder};
