//! Account management for the Serleo backend
//!
//! Salted password hashing plus a user directory over the document
//! store. Role semantics follow the single-superadmin rule: the
//! earliest-created admin account is the superadmin and cannot be
//! demoted.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directory;
pub mod password;

pub use directory::{
    AuthError, AuthResult, SignUpRequest, UserDirectory, UserId, UserProfile, COLLECTION_USERS,
    MIN_PASSWORD_LENGTH,
};
pub use password::{hash_password, verify_password};
