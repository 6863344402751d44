//! Stream configuration registry
//!
//! A stream is a named collection with a retention rule. The registry is
//! the static table mapping stream name → retention; it is built once at
//! startup and never changes at runtime.
//!
//! Invalid configurations (capacity zero, duplicate names) are rejected at
//! build time so that a misconfigured stream can never reach the append
//! path.

use serleo_core::{Error, Result};
use std::collections::HashMap;

/// Retention rule for a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Keep at most this many records, evicting the oldest first
    ///
    /// The capacity is always at least 1; the builder rejects zero.
    Capped(usize),
    /// Keep every record; deletion only happens through explicit
    /// administrative delete-by-id
    Unbounded,
}

impl Retention {
    /// The capacity, if this stream is capped
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Retention::Capped(n) => Some(*n),
            Retention::Unbounded => None,
        }
    }
}

/// A named stream and its retention rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    name: String,
    retention: Retention,
}

impl StreamConfig {
    /// The stream name; also the underlying collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The retention rule
    pub fn retention(&self) -> Retention {
        self.retention
    }
}

/// Static table of configured streams
///
/// # Example
///
/// ```
/// use serleo_log::{StreamRegistry, Retention};
///
/// let registry = StreamRegistry::builder()
///     .capped("partnership_inquiries", 100)
///     .capped("forum_messages", 200)
///     .unbounded("posts")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     registry.config("forum_messages").unwrap().retention(),
///     Retention::Capped(200),
/// );
/// assert!(registry.config("nope").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StreamRegistry {
    streams: HashMap<String, StreamConfig>,
}

impl StreamRegistry {
    /// Start building a registry
    pub fn builder() -> StreamRegistryBuilder {
        StreamRegistryBuilder {
            streams: HashMap::new(),
            error: None,
        }
    }

    /// Look up a stream's configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` for a stream name that was never
    /// registered. Unknown streams are an operator mistake, not a caller
    /// condition.
    pub fn config(&self, stream: &str) -> Result<&StreamConfig> {
        self.streams
            .get(stream)
            .ok_or_else(|| Error::configuration(format!("unknown stream '{stream}'")))
    }

    /// All registered stream names, sorted
    pub fn stream_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.streams.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered streams
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Whether no streams are registered
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

/// Builder for `StreamRegistry`
///
/// The first invalid entry poisons the builder; `build` reports it.
#[derive(Debug)]
pub struct StreamRegistryBuilder {
    streams: HashMap<String, StreamConfig>,
    error: Option<Error>,
}

impl StreamRegistryBuilder {
    /// Register a capped stream
    ///
    /// A capacity of zero is rejected at `build` time.
    pub fn capped(self, name: &str, capacity: usize) -> Self {
        if capacity == 0 {
            return self.poison(format!("stream '{name}' has capacity 0"));
        }
        self.add(name, Retention::Capped(capacity))
    }

    /// Register an unbounded stream
    pub fn unbounded(self, name: &str) -> Self {
        self.add(name, Retention::Unbounded)
    }

    /// Finish building
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if any entry had capacity zero, an
    /// empty name, or duplicated an earlier name.
    pub fn build(self) -> Result<StreamRegistry> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(StreamRegistry {
                streams: self.streams,
            }),
        }
    }

    fn add(mut self, name: &str, retention: Retention) -> Self {
        if self.error.is_some() {
            return self;
        }
        if name.is_empty() {
            return self.poison("stream name cannot be empty".to_string());
        }
        if self.streams.contains_key(name) {
            return self.poison(format!("stream '{name}' registered twice"));
        }
        self.streams.insert(
            name.to_string(),
            StreamConfig {
                name: name.to_string(),
                retention,
            },
        );
        self
    }

    fn poison(mut self, msg: String) -> Self {
        if self.error.is_none() {
            self.error = Some(Error::configuration(msg));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_lookup() {
        let registry = StreamRegistry::builder()
            .capped("forum_messages", 200)
            .unbounded("posts")
            .build()
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.config("forum_messages").unwrap().retention(),
            Retention::Capped(200)
        );
        assert_eq!(
            registry.config("posts").unwrap().retention(),
            Retention::Unbounded
        );
    }

    #[test]
    fn test_unknown_stream_is_configuration_error() {
        let registry = StreamRegistry::builder().build().unwrap();
        let err = registry.config("ghost").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_zero_capacity_rejected_at_build() {
        let err = StreamRegistry::builder()
            .capped("broken", 0)
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("capacity 0"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = StreamRegistry::builder()
            .capped("dup", 5)
            .unbounded("dup")
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = StreamRegistry::builder().unbounded("").build().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_first_error_wins() {
        // Later valid entries do not mask the poison.
        let err = StreamRegistry::builder()
            .capped("broken", 0)
            .capped("fine", 10)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_stream_names_sorted() {
        let registry = StreamRegistry::builder()
            .unbounded("zeta")
            .unbounded("alpha")
            .build()
            .unwrap();
        assert_eq!(registry.stream_names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_retention_capacity_accessor() {
        assert_eq!(Retention::Capped(7).capacity(), Some(7));
        assert_eq!(Retention::Unbounded.capacity(), None);
    }
}
