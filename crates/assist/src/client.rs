//! Seam for generative backends
//!
//! The rest of the crate only ever talks to `GenerativeClient`; which
//! model sits behind it is a deployment concern. The trait is object
//! safe so services hold `Arc<dyn GenerativeClient>`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure from a generative backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssistError {
    /// Backend unreachable or over quota
    #[error("generative backend unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the prompt
    #[error("prompt was refused: {0}")]
    Blocked(String),

    /// Input below the minimum useful length
    #[error("input must be at least {min} characters")]
    InputTooShort {
        /// Minimum character count
        min: usize,
    },
}

/// Assist result alias
pub type AssistResult<T> = Result<T, AssistError>;

/// Speaker of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The visitor
    User,
    /// The assistant
    Model,
}

/// One prior exchange in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who spoke
    pub role: ChatRole,
    /// What was said
    pub text: String,
}

impl ChatTurn {
    /// A visitor turn
    pub fn user(text: impl Into<String>) -> Self {
        ChatTurn {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    /// An assistant turn
    pub fn model(text: impl Into<String>) -> Self {
        ChatTurn {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// A text-and-image generative backend
pub trait GenerativeClient: Send + Sync {
    /// Answer a prompt given prior conversation turns
    fn complete(&self, prompt: &str, history: &[ChatTurn]) -> AssistResult<String>;

    /// Produce an image for a prompt, returning its URL or data URI
    fn generate_image(&self, prompt: &str) -> AssistResult<String>;
}
