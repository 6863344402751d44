//! Credential hashing and verification
//!
//! Passwords are stored as `salt$digest`, both base64-encoded, where the
//! digest is SHA-256 over salt ‖ password. A fresh random salt is drawn
//! per hash, so equal passwords produce different stored strings.
//!
//! `verify_password` never panics: malformed stored strings simply fail
//! to match.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salt length in bytes
const SALT_LEN: usize = 16;

/// Hash a plaintext password with a fresh random salt
pub fn hash_password(plain: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = digest_with_salt(&salt, plain);
    format!("{}${}", STANDARD.encode(salt), STANDARD.encode(digest))
}

/// Check a plaintext password against a stored `salt$digest` string
///
/// Returns false for malformed stored strings; the comparison over the
/// digest does not short-circuit.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_b64)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = STANDARD.decode(salt_b64) else {
        return false;
    };
    let Ok(expected) = STANDARD.decode(digest_b64) else {
        return false;
    };

    let actual = digest_with_salt(&salt, plain);
    if expected.len() != actual.len() {
        return false;
    }
    expected
        .iter()
        .zip(actual.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

fn digest_with_salt(salt: &[u8], plain: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(plain.as_bytes());
    hasher.finalize().into()
}
