//! Generated site imagery with a persistent cache
//!
//! Each page slot is identified by a stable key. The first request for
//! a key generates an image and stores its URL in the `site_images`
//! collection; later requests serve the cached URL without touching the
//! backend. A failed generation yields the deterministic placeholder
//! for the prompt, and the placeholder is NOT cached, so the next
//! request tries the backend again.

use crate::client::GenerativeClient;
use crate::fallback::default_placeholder;
use serde::{Deserialize, Serialize};
use serleo_core::{DocumentStore, ListOrder, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Collection holding cached site-image URLs
pub const COLLECTION_SITE_IMAGES: &str = "site_images";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SiteImageDoc {
    key: String,
    prompt: String,
    url: String,
}

/// Cache of generated imagery keyed by page slot
pub struct SiteImages {
    store: Arc<dyn DocumentStore>,
    client: Arc<dyn GenerativeClient>,
}

impl SiteImages {
    /// Create a cache over the given store and backend
    pub fn new(store: Arc<dyn DocumentStore>, client: Arc<dyn GenerativeClient>) -> Self {
        SiteImages { store, client }
    }

    /// URL for a page slot, generating and caching it on first use
    ///
    /// # Errors
    ///
    /// Only storage failures surface; generation failures degrade to
    /// the placeholder URL.
    pub fn get_or_generate(&self, key: &str, prompt: &str) -> Result<String> {
        if let Some((_, doc)) = self.cached(key)? {
            return Ok(doc.url);
        }

        match self.client.generate_image(prompt) {
            Ok(url) => {
                self.persist(key, prompt, &url)?;
                info!(key, "site image generated and cached");
                Ok(url)
            }
            Err(error) => {
                warn!(key, %error, "image generation failed, serving placeholder");
                Ok(default_placeholder(prompt))
            }
        }
    }

    /// Regenerate a slot's image, replacing any cached URL
    ///
    /// Same degradation rules as `get_or_generate`; on fallback the old
    /// cached URL (if any) is left in place.
    pub fn regenerate(&self, key: &str, prompt: &str) -> Result<String> {
        match self.client.generate_image(prompt) {
            Ok(url) => {
                self.persist(key, prompt, &url)?;
                info!(key, "site image regenerated");
                Ok(url)
            }
            Err(error) => {
                warn!(key, %error, "image regeneration failed, serving placeholder");
                Ok(default_placeholder(prompt))
            }
        }
    }

    /// Cached URL for a slot, if one exists
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cached(key)?.map(|(_, doc)| doc.url))
    }

    fn cached(&self, key: &str) -> Result<Option<(serleo_core::RecordId, SiteImageDoc)>> {
        let records = self
            .store
            .find(COLLECTION_SITE_IMAGES, ListOrder::OldestFirst, usize::MAX, 0)?;
        for record in records {
            if let Ok(doc) = serde_json::from_value::<SiteImageDoc>(record.payload.clone()) {
                if doc.key == key {
                    return Ok(Some((record.id, doc)));
                }
            }
        }
        Ok(None)
    }

    fn persist(&self, key: &str, prompt: &str, url: &str) -> Result<()> {
        let doc = SiteImageDoc {
            key: key.to_string(),
            prompt: prompt.to_string(),
            url: url.to_string(),
        };
        let payload = serde_json::json!(doc);
        match self.cached(key)? {
            Some((record_id, _)) => {
                self.store.update(COLLECTION_SITE_IMAGES, record_id, payload)?;
            }
            None => {
                self.store.insert(COLLECTION_SITE_IMAGES, payload)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AssistError, AssistResult, ChatTurn};
    use parking_lot::Mutex;
    use serleo_store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that fails until `fail_first` calls have happened
    struct FlakyImageClient {
        fail_first: usize,
        calls: AtomicUsize,
        urls: Mutex<Vec<String>>,
    }

    impl FlakyImageClient {
        fn new(fail_first: usize, urls: Vec<&str>) -> Self {
            FlakyImageClient {
                fail_first,
                calls: AtomicUsize::new(0),
                urls: Mutex::new(urls.into_iter().rev().map(String::from).collect()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl GenerativeClient for FlakyImageClient {
        fn complete(&self, _p: &str, _h: &[ChatTurn]) -> AssistResult<String> {
            Err(AssistError::Unavailable("text not scripted".into()))
        }

        fn generate_image(&self, _prompt: &str) -> AssistResult<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                return Err(AssistError::Unavailable("backend down".into()));
            }
            self.urls
                .lock()
                .pop()
                .ok_or_else(|| AssistError::Unavailable("script exhausted".into()))
        }
    }

    fn images(client: FlakyImageClient) -> (SiteImages, Arc<FlakyImageClient>) {
        let client = Arc::new(client);
        let images = SiteImages::new(
            Arc::new(MemoryStore::new()),
            Arc::clone(&client) as Arc<dyn GenerativeClient>,
        );
        (images, client)
    }

    #[test]
    fn test_first_request_generates_and_caches() {
        let (images, client) = images(FlakyImageClient::new(0, vec!["https://cdn.example/a.png"]));

        let first = images.get_or_generate("hero", "farm landscape").unwrap();
        assert_eq!(first, "https://cdn.example/a.png");

        // Second request is served from the cache.
        let second = images.get_or_generate("hero", "farm landscape").unwrap();
        assert_eq!(second, first);
        assert_eq!(client.call_count(), 1);
    }

    #[test]
    fn test_failure_serves_placeholder_without_caching() {
        let (images, client) =
            images(FlakyImageClient::new(1, vec!["https://cdn.example/b.png"]));

        let degraded = images.get_or_generate("hero", "farm landscape").unwrap();
        assert!(degraded.starts_with("https://picsum.photos/seed/"));
        assert_eq!(images.get("hero").unwrap(), None);

        // Backend recovered: next request generates the real image.
        let recovered = images.get_or_generate("hero", "farm landscape").unwrap();
        assert_eq!(recovered, "https://cdn.example/b.png");
        assert_eq!(client.call_count(), 2);
    }

    #[test]
    fn test_placeholder_is_stable_across_failures() {
        let (images, _client) = images(FlakyImageClient::new(2, vec![]));
        let a = images.get_or_generate("hero", "farm landscape").unwrap();
        let b = images.get_or_generate("hero", "farm landscape").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_regenerate_replaces_cached_url() {
        let (images, _client) = images(FlakyImageClient::new(
            0,
            vec!["https://cdn.example/v1.png", "https://cdn.example/v2.png"],
        ));

        images.get_or_generate("hero", "farm landscape").unwrap();
        let replaced = images.regenerate("hero", "farm landscape at dusk").unwrap();
        assert_eq!(replaced, "https://cdn.example/v2.png");
        assert_eq!(
            images.get("hero").unwrap(),
            Some("https://cdn.example/v2.png".to_string())
        );
    }

    #[test]
    fn test_regenerate_failure_keeps_old_cache_entry() {
        let (images, _client) =
            images(FlakyImageClient::new(0, vec!["https://cdn.example/v1.png"]));

        images.get_or_generate("hero", "farm landscape").unwrap();
        // Script exhausted, so the next generation fails.
        let degraded = images.regenerate("hero", "farm landscape").unwrap();
        assert!(degraded.starts_with("https://picsum.photos/seed/"));
        assert_eq!(
            images.get("hero").unwrap(),
            Some("https://cdn.example/v1.png".to_string())
        );
    }

    #[test]
    fn test_keys_are_independent() {
        let (images, _client) = images(FlakyImageClient::new(
            0,
            vec!["https://cdn.example/a.png", "https://cdn.example/b.png"],
        ));

        let hero = images.get_or_generate("hero", "farm landscape").unwrap();
        let about = images.get_or_generate("about", "team portrait").unwrap();
        assert_ne!(hero, about);
        assert_eq!(images.get("hero").unwrap(), Some(hero));
        assert_eq!(images.get("about").unwrap(), Some(about));
    }
}
