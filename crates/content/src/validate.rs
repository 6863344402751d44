//! Boundary validation for request payloads
//!
//! Every payload is validated here before it reaches the log layer; the
//! log itself treats payloads as opaque. Rules are explicit checks, one
//! error per first offending field.

use thiserror::Error;

/// Validation failure for a single field
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is shorter than its minimum
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Offending field name
        field: &'static str,
        /// Minimum character count
        min: usize,
    },

    /// Field is longer than its maximum
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Offending field name
        field: &'static str,
        /// Maximum character count
        max: usize,
    },

    /// Field must be a well-formed email address
    #[error("{field} must be a valid email address")]
    InvalidEmail {
        /// Offending field name
        field: &'static str,
    },

    /// Field must be an http(s) URL
    #[error("{field} must be a valid http(s) URL")]
    InvalidUrl {
        /// Offending field name
        field: &'static str,
    },
}

/// Require at least `min` characters (counting chars, not bytes)
pub fn require_min_chars(
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

/// Require at most `max` characters
pub fn require_max_chars(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Require a plausibly well-formed email address
///
/// Intentionally shallow: one `@` with a dotted domain after it. Real
/// deliverability is the mail system's problem, not the form's.
pub fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ValidationError::InvalidEmail { field });
    };
    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
        && value.matches('@').count() == 1;
    if !well_formed {
        return Err(ValidationError::InvalidEmail { field });
    }
    Ok(())
}

/// Require an http or https URL
pub fn require_http_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidUrl { field }),
    }
}
