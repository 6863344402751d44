//! Serleo backend core
//!
//! An embedded community-and-content backend: capped append streams for
//! public intake (partnership inquiries, forum messages), unbounded
//! admin-managed collections (posts, testimonials), a user directory
//! with single-superadmin role semantics, and generative features that
//! degrade to deterministic substitutes when the backend is offline.
//!
//! The retention model is a bounded append log: every stream accepts
//! appends unconditionally, and capped streams evict their oldest
//! records immediately after each append to stay at their cap. Eviction
//! is best-effort per append and self-healing, so a stream can
//! transiently hold slightly more than its cap under concurrency or
//! after a failed eviction, and returns to the cap on the next
//! successful append.
//!
//! # Example
//!
//! ```
//! use serleo::{Site, PartnershipInquiry};
//! use serleo::assist::{AssistError, AssistResult, ChatTurn, GenerativeClient};
//! use std::sync::Arc;
//!
//! struct Offline;
//! impl GenerativeClient for Offline {
//!     fn complete(&self, _: &str, _: &[ChatTurn]) -> AssistResult<String> {
//!         Err(AssistError::Unavailable("offline".into()))
//!     }
//!     fn generate_image(&self, _: &str) -> AssistResult<String> {
//!         Err(AssistError::Unavailable("offline".into()))
//!     }
//! }
//!
//! let site = Site::in_memory(Arc::new(Offline)).unwrap();
//! site.inquiries
//!     .submit(&PartnershipInquiry {
//!         name: "Amina Keita".into(),
//!         email: "amina@example.org".into(),
//!         company: None,
//!         message: "We would like to discuss a partnership.".into(),
//!     })
//!     .unwrap();
//! assert_eq!(site.stats().unwrap().collaborations, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod site;

pub use site::{Site, SiteStats};

pub use serleo_core::{
    DocumentStore, Error, ListOrder, Record, RecordId, Result, Timestamp,
};
pub use serleo_log::{BoundedLog, Retention, StreamConfig, StreamRegistry};
pub use serleo_store::MemoryStore;

pub use serleo_content::{
    ContentError, DashboardStats, ForumMessage, PartnershipInquiry, Post, Stored, Testimonial,
    UserRole,
};

pub use serleo_auth::{AuthError, SignUpRequest, UserDirectory, UserId, UserProfile};

/// Generative features: client trait, assistant, placeholders, imagery
pub mod assist {
    pub use serleo_assist::*;
}

/// Content surfaces: payload types, stream table, services
pub mod content {
    pub use serleo_content::*;
}

/// Accounts, roles, and password handling
pub mod auth {
    pub use serleo_auth::*;
}
