//! Wiring for a complete backend instance
//!
//! `Site` assembles the document store, the bounded log with the content
//! stream table, and every service on top of them. Services share one
//! store, so dashboard counts, the user directory, and the streams all
//! observe the same data.

use serleo_assist::{Assistant, GenerativeClient, SiteImages};
use serleo_auth::UserDirectory;
use serleo_content::{
    content_registry, DashboardStats, ForumService, InquiryService, PostService,
    TestimonialService,
};
use serleo_core::{DocumentStore, Result};
use serleo_log::BoundedLog;
use serleo_store::MemoryStore;
use std::sync::Arc;

/// Counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteStats {
    /// Retained partnership inquiries
    pub collaborations: usize,
    /// Total posts
    pub posts: usize,
    /// Total testimonials
    pub testimonials: usize,
    /// Accounts with the plain `user` role
    pub members: usize,
}

/// A fully wired backend instance
pub struct Site {
    log: Arc<BoundedLog>,
    /// Partnership inquiry intake
    pub inquiries: InquiryService,
    /// Community forum
    pub forum: ForumService,
    /// Admin-managed posts
    pub posts: PostService,
    /// Admin-managed testimonials
    pub testimonials: TestimonialService,
    /// Accounts and roles
    pub users: UserDirectory,
    /// Visitor assistant
    pub assistant: Assistant,
    /// Generated site imagery
    pub images: SiteImages,
}

impl Site {
    /// Assemble a site over the given store and generative backend
    ///
    /// # Errors
    ///
    /// Only if the stream table fails to build, which the fixed content
    /// streams never do.
    pub fn new(store: Arc<dyn DocumentStore>, client: Arc<dyn GenerativeClient>) -> Result<Self> {
        let log = Arc::new(BoundedLog::new(Arc::clone(&store), content_registry()?));
        Ok(Site {
            inquiries: InquiryService::new(Arc::clone(&log)),
            forum: ForumService::new(Arc::clone(&log)),
            posts: PostService::new(Arc::clone(&log)),
            testimonials: TestimonialService::new(Arc::clone(&log)),
            users: UserDirectory::new(Arc::clone(&store)),
            assistant: Assistant::new(Arc::clone(&client)),
            images: SiteImages::new(store, client),
            log,
        })
    }

    /// Assemble a site over a fresh in-memory store
    pub fn in_memory(client: Arc<dyn GenerativeClient>) -> Result<Self> {
        Site::new(Arc::new(MemoryStore::new()), client)
    }

    /// The shared bounded log
    pub fn log(&self) -> &Arc<BoundedLog> {
        &self.log
    }

    /// Dashboard counts across all surfaces
    pub fn stats(&self) -> Result<SiteStats> {
        let content = DashboardStats::gather(&self.log).map_err(content_store_error)?;
        let members = self.users.member_count().map_err(auth_store_error)?;
        Ok(SiteStats {
            collaborations: content.collaborations,
            posts: content.posts,
            testimonials: content.testimonials,
            members,
        })
    }

    /// Retry evictions parked after partial append failures
    ///
    /// Returns how many streams were brought back under their caps.
    pub fn run_maintenance(&self) -> usize {
        self.log.retry_pending_evictions()
    }
}

/// Stats only read counts, so any content error here is a store error
fn content_store_error(error: serleo_content::ContentError) -> serleo_core::Error {
    match error {
        serleo_content::ContentError::Store(e) => e,
        other => serleo_core::Error::storage_unavailable(other.to_string()),
    }
}

fn auth_store_error(error: serleo_auth::AuthError) -> serleo_core::Error {
    match error {
        serleo_auth::AuthError::Store(e) => e,
        other => serleo_core::Error::storage_unavailable(other.to_string()),
    }
}
