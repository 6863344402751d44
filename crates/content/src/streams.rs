//! Stream table for the content surfaces
//!
//! Capacities are fixed at compile time; they are not user-configurable
//! at runtime. Inquiries and forum messages are capped; the admin-managed
//! collections are unbounded and only shrink through explicit deletes.

use serleo_core::Result;
use serleo_log::StreamRegistry;

/// Stream holding partnership/collaboration inquiries
pub const STREAM_PARTNERSHIP_INQUIRIES: &str = "partnership_inquiries";

/// Stream holding forum messages
pub const STREAM_FORUM_MESSAGES: &str = "forum_messages";

/// Stream holding project/blog posts
pub const STREAM_POSTS: &str = "posts";

/// Stream holding landing-page testimonials
pub const STREAM_TESTIMONIALS: &str = "testimonials";

/// Retention cap for partnership inquiries
pub const INQUIRY_CAPACITY: usize = 100;

/// Retention cap for forum messages
pub const FORUM_CAPACITY: usize = 200;

/// Build the stream registry for every content surface
///
/// # Errors
///
/// Never fails with the constants above; the `Result` exists because the
/// registry builder validates capacities.
pub fn content_registry() -> Result<StreamRegistry> {
    StreamRegistry::builder()
        .capped(STREAM_PARTNERSHIP_INQUIRIES, INQUIRY_CAPACITY)
        .capped(STREAM_FORUM_MESSAGES, FORUM_CAPACITY)
        .unbounded(STREAM_POSTS)
        .unbounded(STREAM_TESTIMONIALS)
        .build()
}
