//! Content surfaces for the Serleo backend
//!
//! Validated payload types and the services that wire them to the bounded
//! log: partnership inquiries and forum messages ride capped streams;
//! posts and testimonials are unbounded, admin-managed collections.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dto;
pub mod service;
pub mod streams;
pub mod validate;

pub use dto::{ForumMessage, PartnershipInquiry, Post, Testimonial, UserRole, MAX_MESSAGE_LENGTH};
pub use service::{
    ContentError, ContentResult, DashboardStats, ForumService, InquiryService, PostService,
    Stored, TestimonialService, RECENT_INQUIRIES_DEFAULT,
};
pub use streams::{
    content_registry, FORUM_CAPACITY, INQUIRY_CAPACITY, STREAM_FORUM_MESSAGES,
    STREAM_PARTNERSHIP_INQUIRIES, STREAM_POSTS, STREAM_TESTIMONIALS,
};
pub use validate::ValidationError;
