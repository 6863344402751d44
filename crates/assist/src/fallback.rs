//! Deterministic stand-ins for failed generation
//!
//! When image generation fails, pages still need something to render.
//! The placeholder service derives a stable seed from the prompt, so
//! the same prompt always yields the same picture and retries do not
//! flicker between placeholders.

use xxhash_rust::xxh3::xxh3_64;

/// Default placeholder width in pixels
pub const PLACEHOLDER_WIDTH: u32 = 600;

/// Default placeholder height in pixels
pub const PLACEHOLDER_HEIGHT: u32 = 400;

/// Seeded-placeholder URL for a prompt
///
/// Equal prompts map to equal URLs.
pub fn placeholder_image_url(prompt: &str, width: u32, height: u32) -> String {
    let seed = xxh3_64(prompt.as_bytes());
    format!("https://picsum.photos/seed/{seed:x}/{width}/{height}")
}

/// Placeholder URL at the default dimensions
pub fn default_placeholder(prompt: &str) -> String {
    placeholder_image_url(prompt, PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT)
}
