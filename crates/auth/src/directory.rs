//! User accounts and roles
//!
//! Users live in the `users` collection as plain documents; there is no
//! retention cap on accounts. Two roles are ever stored, `user` and
//! `admin`. The superadmin is not stored at all: the earliest-created
//! admin account is presented as superadmin wherever profiles surface,
//! which keeps exactly one superadmin without any writable flag.

use crate::password::{hash_password, verify_password};
use serde::{Deserialize, Serialize};
use serleo_content::validate::{require_email, require_min_chars};
use serleo_content::{UserRole, ValidationError};
use serleo_core::{DocumentStore, ListOrder, Record, RecordId, Timestamp};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Collection holding user accounts
pub const COLLECTION_USERS: &str = "users";

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Public identifier of a user account
///
/// Distinct from the store-assigned record id so the wire-visible id
/// carries no write-order information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    fn generate() -> Self {
        UserId(Uuid::new_v4())
    }

    /// Parse a user id from its string form
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(UserId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authentication and account-management failures
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    /// A sign-up field failed boundary validation
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Password and confirmation differ
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password is shorter than the minimum
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Another account already uses this email
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Admin sign-up attempted after an admin account exists
    #[error("an admin account has already been created")]
    AdminExists,

    /// Email/password pair did not match any account
    ///
    /// Deliberately uniform: unknown email and wrong password produce
    /// the same error.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// No account with the given id
    #[error("no user with id {0}")]
    UnknownUser(UserId),

    /// Role change refused for the superadmin account
    #[error("the superadmin role cannot be changed")]
    SuperadminImmutable,

    /// Roles other than `user` and `admin` cannot be assigned directly
    #[error("only the user and admin roles can be assigned")]
    InvalidRoleAssignment,

    /// Storage failure
    #[error(transparent)]
    Store(#[from] serleo_core::Error),

    /// A stored user document could not be decoded
    #[error("corrupt user record: {0}")]
    Corrupt(String),
}

/// Auth result alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Sign-up form fields
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    /// Display name (at least 2 characters)
    pub name: String,
    /// Login email, unique across accounts
    pub email: String,
    /// Plaintext password (at least `MIN_PASSWORD_LENGTH` characters)
    pub password: String,
    /// Must match `password`
    pub confirm_password: String,
}

impl SignUpRequest {
    fn validate(&self) -> AuthResult<()> {
        require_min_chars("name", &self.name, 2)?;
        require_email("email", &self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

/// A user profile as surfaced to callers
///
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// Public account id
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Effective role, with the earliest admin shown as superadmin
    pub role: UserRole,
    /// Account creation time
    pub created_at: Timestamp,
}

/// On-disk shape of a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDoc {
    user_id: UserId,
    name: String,
    email: String,
    password_hash: String,
    role: UserRole,
}

/// Account registry over the document store
pub struct UserDirectory {
    store: Arc<dyn DocumentStore>,
}

impl UserDirectory {
    /// Create a directory over the given store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        UserDirectory { store }
    }

    /// Register a regular account
    pub fn sign_up(&self, request: &SignUpRequest) -> AuthResult<UserProfile> {
        self.register(request, UserRole::User)
    }

    /// Register the admin account
    ///
    /// Refused once any admin exists; only the very first admin sign-up
    /// succeeds.
    pub fn admin_sign_up(&self, request: &SignUpRequest) -> AuthResult<UserProfile> {
        if self.has_admin()? {
            warn!(email = %request.email, "admin sign-up refused, admin already exists");
            return Err(AuthError::AdminExists);
        }
        self.register(request, UserRole::Admin)
    }

    /// Whether any admin account exists
    pub fn has_admin(&self) -> AuthResult<bool> {
        Ok(self
            .all()?
            .iter()
            .any(|(_, doc)| doc.role == UserRole::Admin))
    }

    /// Authenticate with email and password
    ///
    /// Failures are uniform; callers cannot distinguish an unknown email
    /// from a wrong password.
    pub fn login(&self, email: &str, password: &str) -> AuthResult<UserProfile> {
        let users = self.all()?;
        let superadmin = superadmin_record_id(&users);
        let found = users
            .iter()
            .find(|(_, doc)| doc.email.eq_ignore_ascii_case(email));
        match found {
            Some((record, doc)) if verify_password(password, &doc.password_hash) => {
                info!(user_id = %doc.user_id, "login succeeded");
                Ok(profile_of(record, doc, superadmin))
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// All profiles, newest account first
    pub fn list(&self) -> AuthResult<Vec<UserProfile>> {
        let users = self.all()?;
        let superadmin = superadmin_record_id(&users);
        let mut profiles: Vec<UserProfile> = users
            .iter()
            .map(|(record, doc)| profile_of(record, doc, superadmin))
            .collect();
        profiles.reverse();
        Ok(profiles)
    }

    /// Look up a single profile by public id
    pub fn get(&self, user_id: UserId) -> AuthResult<UserProfile> {
        let users = self.all()?;
        let superadmin = superadmin_record_id(&users);
        users
            .iter()
            .find(|(_, doc)| doc.user_id == user_id)
            .map(|(record, doc)| profile_of(record, doc, superadmin))
            .ok_or(AuthError::UnknownUser(user_id))
    }

    /// Change an account's stored role to `user` or `admin`
    ///
    /// The superadmin (earliest-created admin) is refused: demoting it
    /// would silently promote the next-oldest admin in its place.
    pub fn update_role(&self, user_id: UserId, role: UserRole) -> AuthResult<()> {
        if role == UserRole::Superadmin {
            return Err(AuthError::InvalidRoleAssignment);
        }
        let users = self.all()?;
        let superadmin = superadmin_record_id(&users);
        let (record, doc) = users
            .iter()
            .find(|(_, doc)| doc.user_id == user_id)
            .ok_or(AuthError::UnknownUser(user_id))?;
        if Some(record.id) == superadmin {
            return Err(AuthError::SuperadminImmutable);
        }
        if doc.role == role {
            return Ok(());
        }

        let mut updated = doc.clone();
        updated.role = role;
        let payload =
            serde_json::to_value(&updated).map_err(|e| AuthError::Corrupt(e.to_string()))?;
        if !self.store.update(COLLECTION_USERS, record.id, payload)? {
            return Err(AuthError::UnknownUser(user_id));
        }
        info!(user_id = %user_id, role = %role, "role updated");
        Ok(())
    }

    /// Number of accounts with the plain `user` role
    pub fn member_count(&self) -> AuthResult<usize> {
        Ok(self
            .all()?
            .iter()
            .filter(|(_, doc)| doc.role == UserRole::User)
            .count())
    }

    fn register(&self, request: &SignUpRequest, role: UserRole) -> AuthResult<UserProfile> {
        request.validate()?;
        let users = self.all()?;
        if users
            .iter()
            .any(|(_, doc)| doc.email.eq_ignore_ascii_case(&request.email))
        {
            return Err(AuthError::EmailTaken);
        }

        let doc = UserDoc {
            user_id: UserId::generate(),
            name: request.name.clone(),
            email: request.email.clone(),
            password_hash: hash_password(&request.password),
            role,
        };
        let payload = serde_json::to_value(&doc).map_err(|e| AuthError::Corrupt(e.to_string()))?;
        let record = self.store.insert(COLLECTION_USERS, payload)?;
        info!(user_id = %doc.user_id, role = %role, "account created");

        // A first admin is its own superadmin.
        let superadmin = if role == UserRole::Admin && !users_have_admin(&users) {
            Some(record.id)
        } else {
            superadmin_record_id(&users)
        };
        Ok(profile_of(&record, &doc, superadmin))
    }

    /// All accounts in creation order, with their records
    fn all(&self) -> AuthResult<Vec<(Record, UserDoc)>> {
        let records =
            self.store
                .find(COLLECTION_USERS, ListOrder::OldestFirst, usize::MAX, 0)?;
        records
            .into_iter()
            .map(|record| {
                let doc: UserDoc = serde_json::from_value(record.payload.clone())
                    .map_err(|e| AuthError::Corrupt(e.to_string()))?;
                Ok((record, doc))
            })
            .collect()
    }
}

fn users_have_admin(users: &[(Record, UserDoc)]) -> bool {
    users.iter().any(|(_, doc)| doc.role == UserRole::Admin)
}

/// Record id of the earliest-created admin, if any
fn superadmin_record_id(users: &[(Record, UserDoc)]) -> Option<RecordId> {
    users
        .iter()
        .filter(|(_, doc)| doc.role == UserRole::Admin)
        .min_by_key(|(record, _)| record.sort_key())
        .map(|(record, _)| record.id)
}

fn profile_of(record: &Record, doc: &UserDoc, superadmin: Option<RecordId>) -> UserProfile {
    let role = if Some(record.id) == superadmin {
        UserRole::Superadmin
    } else {
        doc.role
    };
    UserProfile {
        user_id: doc.user_id,
        name: doc.name.clone(),
        email: doc.email.clone(),
        role,
        created_at: record.created_at,
    }
}
