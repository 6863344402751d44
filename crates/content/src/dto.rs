//! Stream payload types
//!
//! One struct per content surface, mirroring the submitted form fields.
//! `validate` runs the boundary rules; services refuse to append anything
//! that fails. The structs are plain serde types so they round-trip
//! through the opaque record payload unchanged.

use crate::validate::{
    require_email, require_http_url, require_max_chars, require_min_chars, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a forum message body
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// A partnership/collaboration inquiry submitted through the public form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipInquiry {
    /// Submitter's name (at least 2 characters)
    pub name: String,
    /// Contact email address
    pub email: String,
    /// Optional company or organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// The inquiry itself (at least 10 characters)
    pub message: String,
}

impl PartnershipInquiry {
    /// Check all boundary rules, reporting the first violation
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("name", &self.name, 2)?;
        require_email("email", &self.email)?;
        require_min_chars("message", &self.message, 10)?;
        Ok(())
    }
}

/// Role attached to a forum message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular community member
    User,
    /// Site administrator
    Admin,
    /// The first-created administrator
    Superadmin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Superadmin => write!(f, "superadmin"),
        }
    }
}

/// A message posted to the community forum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumMessage {
    /// Message body, 1 to `MAX_MESSAGE_LENGTH` characters
    pub content: String,
    /// Public id of the author
    pub user_id: String,
    /// Display name of the author
    pub user_name: String,
    /// Author's role at posting time
    pub user_role: UserRole,
}

impl ForumMessage {
    /// Check all boundary rules, reporting the first violation
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("content", &self.content, 1)?;
        require_max_chars("content", &self.content, MAX_MESSAGE_LENGTH)?;
        Ok(())
    }
}

/// A project/blog post managed from the admin area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title (at least 5 characters)
    pub title: String,
    /// Post category, e.g. "Project" or "Insight" (at least 3 characters)
    pub kind: String,
    /// Body text (at least 10 characters)
    pub description: String,
    /// Cover image URL
    pub image_url: String,
    /// Short hint used when regenerating the cover image
    pub ai_hint: String,
}

impl Post {
    /// Check all boundary rules, reporting the first violation
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("title", &self.title, 5)?;
        require_min_chars("kind", &self.kind, 3)?;
        require_min_chars("description", &self.description, 10)?;
        require_http_url("image_url", &self.image_url)?;
        require_min_chars("ai_hint", &self.ai_hint, 3)?;
        Ok(())
    }
}

/// A testimonial shown on the landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Author name (at least 2 characters)
    pub name: String,
    /// Author title or affiliation (at least 3 characters)
    pub title: String,
    /// The quote itself (at least 10 characters)
    pub quote: String,
    /// Avatar image URL
    pub avatar: String,
}

impl Testimonial {
    /// Check all boundary rules, reporting the first violation
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("name", &self.name, 2)?;
        require_min_chars("title", &self.title, 3)?;
        require_min_chars("quote", &self.quote, 10)?;
        require_http_url("avatar", &self.avatar)?;
        Ok(())
    }
}
