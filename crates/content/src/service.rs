//! Content services
//!
//! Thin, validated wiring between the request boundary and the bounded
//! log. Each service owns one stream; all of them share the same log (and
//! therefore the same store).
//!
//! Listing is always newest-first except the forum, which presents the
//! newest window oldest-first: it fetches descending, then reverses.

use crate::dto::{ForumMessage, PartnershipInquiry, Post, Testimonial};
use crate::streams::{
    FORUM_CAPACITY, STREAM_FORUM_MESSAGES, STREAM_PARTNERSHIP_INQUIRIES, STREAM_POSTS,
    STREAM_TESTIMONIALS,
};
use crate::validate::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serleo_core::{Error, Record, RecordId, Timestamp};
use serleo_log::BoundedLog;
use std::sync::Arc;
use thiserror::Error as ThisError;
use tracing::debug;

/// How many inquiries the admin dashboard shows by default
pub const RECENT_INQUIRIES_DEFAULT: usize = 5;

/// Result alias for content operations
pub type ContentResult<T> = std::result::Result<T, ContentError>;

/// Errors from the content surfaces
#[derive(Debug, ThisError)]
pub enum ContentError {
    /// A payload failed boundary validation
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The log or store layer failed
    #[error(transparent)]
    Store(#[from] Error),

    /// A stored payload no longer matches its stream's shape
    #[error("stored payload could not be decoded: {0}")]
    Corrupt(String),
}

/// A decoded payload together with its storage identity
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<T> {
    /// Storage-assigned record id
    pub id: RecordId,
    /// Append time
    pub created_at: Timestamp,
    /// The decoded payload
    pub item: T,
}

fn encode<T: Serialize>(item: &T) -> ContentResult<serde_json::Value> {
    serde_json::to_value(item).map_err(|e| ContentError::Corrupt(e.to_string()))
}

fn decode<T: DeserializeOwned>(record: Record) -> ContentResult<Stored<T>> {
    let item =
        serde_json::from_value(record.payload).map_err(|e| ContentError::Corrupt(e.to_string()))?;
    Ok(Stored {
        id: record.id,
        created_at: record.created_at,
        item,
    })
}

fn decode_all<T: DeserializeOwned>(records: Vec<Record>) -> ContentResult<Vec<Stored<T>>> {
    records.into_iter().map(decode).collect()
}

/// Partnership/collaboration inquiries (capped stream)
#[derive(Clone)]
pub struct InquiryService {
    log: Arc<BoundedLog>,
}

impl InquiryService {
    /// Create a service over the shared log
    pub fn new(log: Arc<BoundedLog>) -> Self {
        InquiryService { log }
    }

    /// Validate and append an inquiry
    pub fn submit(&self, inquiry: &PartnershipInquiry) -> ContentResult<Stored<PartnershipInquiry>> {
        inquiry.validate()?;
        let record = self
            .log
            .append(STREAM_PARTNERSHIP_INQUIRIES, encode(inquiry)?)?;
        debug!(id = %record.id, "partnership inquiry submitted");
        decode(record)
    }

    /// Newest inquiries for the admin dashboard
    pub fn recent(&self, limit: usize) -> ContentResult<Vec<Stored<PartnershipInquiry>>> {
        decode_all(self.log.recent(STREAM_PARTNERSHIP_INQUIRIES, limit)?)
    }

    /// Total inquiries currently retained
    pub fn total(&self) -> ContentResult<usize> {
        Ok(self.log.len(STREAM_PARTNERSHIP_INQUIRIES)?)
    }
}

/// Community forum messages (capped stream, polled by clients)
#[derive(Clone)]
pub struct ForumService {
    log: Arc<BoundedLog>,
}

impl ForumService {
    /// Create a service over the shared log
    pub fn new(log: Arc<BoundedLog>) -> Self {
        ForumService { log }
    }

    /// Validate and append a message
    pub fn post(&self, message: &ForumMessage) -> ContentResult<Stored<ForumMessage>> {
        message.validate()?;
        let record = self.log.append(STREAM_FORUM_MESSAGES, encode(message)?)?;
        debug!(id = %record.id, author = %message.user_name, "forum message posted");
        decode(record)
    }

    /// The retained message window, oldest first
    ///
    /// Fetches the newest `FORUM_CAPACITY` messages descending and
    /// reverses them for presentation. Polling clients replace their whole
    /// view with each result; there is no incremental diff contract.
    pub fn latest(&self) -> ContentResult<Vec<Stored<ForumMessage>>> {
        let mut records = self.log.recent(STREAM_FORUM_MESSAGES, FORUM_CAPACITY)?;
        records.reverse();
        decode_all(records)
    }

    /// Total messages currently retained
    pub fn total(&self) -> ContentResult<usize> {
        Ok(self.log.len(STREAM_FORUM_MESSAGES)?)
    }
}

/// Project/blog posts (unbounded, admin-managed)
#[derive(Clone)]
pub struct PostService {
    log: Arc<BoundedLog>,
}

impl PostService {
    /// Create a service over the shared log
    pub fn new(log: Arc<BoundedLog>) -> Self {
        PostService { log }
    }

    /// Validate and store a post
    pub fn create(&self, post: &Post) -> ContentResult<Stored<Post>> {
        post.validate()?;
        let record = self.log.append(STREAM_POSTS, encode(post)?)?;
        debug!(id = %record.id, title = %post.title, "post created");
        decode(record)
    }

    /// All posts newest-first, optionally filtered by kind
    ///
    /// `None` means every kind (the UI sends "All" for that case and maps
    /// it to `None` before calling).
    pub fn list(&self, kind: Option<&str>) -> ContentResult<Vec<Stored<Post>>> {
        let all: Vec<Stored<Post>> =
            decode_all(self.log.recent(STREAM_POSTS, usize::MAX)?)?;
        Ok(match kind {
            Some(k) => all.into_iter().filter(|p| p.item.kind == k).collect(),
            None => all,
        })
    }

    /// Fetch one post by id
    ///
    /// # Errors
    ///
    /// `ContentError::Store(Error::NotFound)` for an unknown id.
    pub fn get(&self, id: RecordId) -> ContentResult<Stored<Post>> {
        match self.log.store().get(STREAM_POSTS, id)? {
            Some(record) => decode(record),
            None => Err(Error::not_found(STREAM_POSTS, id).into()),
        }
    }

    /// Delete one post by id (visible `NotFound` if missing)
    pub fn delete(&self, id: RecordId) -> ContentResult<()> {
        Ok(self.log.delete_by_id(STREAM_POSTS, id)?)
    }

    /// Total posts
    pub fn total(&self) -> ContentResult<usize> {
        Ok(self.log.len(STREAM_POSTS)?)
    }
}

/// Landing-page testimonials (unbounded, admin-managed)
#[derive(Clone)]
pub struct TestimonialService {
    log: Arc<BoundedLog>,
}

impl TestimonialService {
    /// Create a service over the shared log
    pub fn new(log: Arc<BoundedLog>) -> Self {
        TestimonialService { log }
    }

    /// Validate and store a testimonial
    pub fn create(&self, testimonial: &Testimonial) -> ContentResult<Stored<Testimonial>> {
        testimonial.validate()?;
        let record = self.log.append(STREAM_TESTIMONIALS, encode(testimonial)?)?;
        decode(record)
    }

    /// All testimonials newest-first
    pub fn list(&self) -> ContentResult<Vec<Stored<Testimonial>>> {
        decode_all(self.log.recent(STREAM_TESTIMONIALS, usize::MAX)?)
    }

    /// Delete one testimonial by id (visible `NotFound` if missing)
    pub fn delete(&self, id: RecordId) -> ContentResult<()> {
        Ok(self.log.delete_by_id(STREAM_TESTIMONIALS, id)?)
    }

    /// Total testimonials
    pub fn total(&self) -> ContentResult<usize> {
        Ok(self.log.len(STREAM_TESTIMONIALS)?)
    }
}

/// Aggregate counts for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    /// Retained partnership inquiries
    pub collaborations: usize,
    /// Total posts
    pub posts: usize,
    /// Total testimonials
    pub testimonials: usize,
}

impl DashboardStats {
    /// Gather counts from the shared log
    pub fn gather(log: &BoundedLog) -> ContentResult<Self> {
        Ok(DashboardStats {
            collaborations: log.len(STREAM_PARTNERSHIP_INQUIRIES)?,
            posts: log.len(STREAM_POSTS)?,
            testimonials: log.len(STREAM_TESTIMONIALS)?,
        })
    }
}
