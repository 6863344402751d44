//! Visitor-facing assistant
//!
//! `ask` is resilient: a backend failure becomes a polite canned reply,
//! never an error page. `summarize` is an admin tool and surfaces
//! failures instead, so the operator sees what went wrong.

use crate::client::{AssistError, AssistResult, ChatTurn, GenerativeClient};
use std::sync::Arc;
use tracing::warn;

/// Minimum input length `summarize` accepts
pub const MIN_SUMMARY_INPUT: usize = 50;

/// Reply used when the backend cannot answer
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

/// Conversational assistant over a generative backend
pub struct Assistant {
    client: Arc<dyn GenerativeClient>,
}

impl Assistant {
    /// Create an assistant over the given backend
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Assistant { client }
    }

    /// Answer a visitor question, falling back to a canned reply
    pub fn ask(&self, question: &str, history: &[ChatTurn]) -> String {
        match self.client.complete(question, history) {
            Ok(answer) => answer,
            Err(error) => {
                warn!(%error, "assistant backend failed, using canned reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Summarize a block of text
    ///
    /// # Errors
    ///
    /// `InputTooShort` below `MIN_SUMMARY_INPUT` characters; backend
    /// failures pass through unchanged.
    pub fn summarize(&self, text: &str) -> AssistResult<String> {
        if text.chars().count() < MIN_SUMMARY_INPUT {
            return Err(AssistError::InputTooShort {
                min: MIN_SUMMARY_INPUT,
            });
        }
        let prompt = format!("Summarize the following text in a short paragraph:\n\n{text}");
        self.client.complete(&prompt, &[])
    }
}
