//! Generative features for the Serleo backend
//!
//! A backend-agnostic client trait, a visitor assistant that degrades
//! to a canned reply, deterministic placeholder imagery, and a cache of
//! generated site images. Generation failures never become user-facing
//! errors where a substitute exists.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assistant;
pub mod client;
pub mod fallback;
pub mod site_images;

pub use assistant::{Assistant, FALLBACK_REPLY, MIN_SUMMARY_INPUT};
pub use client::{AssistError, AssistResult, ChatRole, ChatTurn, GenerativeClient};
pub use fallback::{
    default_placeholder, placeholder_image_url, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH,
};
pub use site_images::{SiteImages, COLLECTION_SITE_IMAGES};
