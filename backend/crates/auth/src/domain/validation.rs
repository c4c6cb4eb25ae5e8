//! Sign-Up Input Validation
//!
//! Pure checks on untrusted input. No I/O, no shared state.
//!
//! ## Rules
//! - email: at most 254 bytes, a single bare `local@domain` address
//! - password: 8..=72 bytes (bcrypt reads at most 72 bytes)
//! - username: 3..=30 characters from `[A-Za-z0-9_.]`, checked after trimming

use thiserror::Error;

use crate::domain::account::SignUpOptions;

/// Maximum email length (per RFC 5321)
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local-part length (per RFC 5321)
const EMAIL_LOCAL_MAX_LENGTH: usize = 64;

/// Maximum DNS label length
const DOMAIN_LABEL_MAX_LENGTH: usize = 63;

pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const PASSWORD_MAX_LENGTH: usize = platform::password::BCRYPT_MAX_INPUT_BYTES;

pub const USERNAME_MIN_LENGTH: usize = 3;

pub const USERNAME_MAX_LENGTH: usize = 30;

/// Printable characters allowed unquoted in a local part besides alphanumerics
const LOCAL_PART_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

/// Single-field validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidFormat(&'static str),

    #[error("password too short (min {min} characters)")]
    TooShort { min: usize, actual: usize },

    #[error("password too long (max {max} characters)")]
    TooLong { max: usize, actual: usize },
}

/// Validation failure tagged with the offending field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} validation failed: {error}")]
pub struct InvalidField {
    pub field: &'static str,
    #[source]
    pub error: ValidationError,
}

impl InvalidField {
    fn new(field: &'static str, error: ValidationError) -> Self {
        Self { field, error }
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() > EMAIL_MAX_LENGTH {
        return Err(ValidationError::InvalidFormat("email too long"));
    }

    if !is_valid_address(email) {
        return Err(ValidationError::InvalidFormat("invalid email format"));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let actual = password.len();

    if actual < PASSWORD_MIN_LENGTH {
        return Err(ValidationError::TooShort {
            min: PASSWORD_MIN_LENGTH,
            actual,
        });
    }

    if actual > PASSWORD_MAX_LENGTH {
        return Err(ValidationError::TooLong {
            max: PASSWORD_MAX_LENGTH,
            actual,
        });
    }

    Ok(())
}

/// Expects an already-trimmed username
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let length_ok = (USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&username.len());
    let charset_ok = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');

    if !length_ok || !charset_ok {
        return Err(ValidationError::InvalidFormat("invalid username format"));
    }

    Ok(())
}

/// Normalize and validate raw input into [`SignUpOptions`]
///
/// Email is trimmed and lowercased before validation, so the stored value
/// (and the uniqueness check on it) is case-insensitive. Username is trimmed.
/// Password is passed through byte-for-byte.
pub fn sign_up_options(
    username: &str,
    email: &str,
    password: &str,
) -> Result<SignUpOptions, InvalidField> {
    let email = email.trim().to_lowercase();
    validate_email(&email).map_err(|e| InvalidField::new("email", e))?;

    validate_password(password).map_err(|e| InvalidField::new("password", e))?;

    let username = username.trim();
    validate_username(username).map_err(|e| InvalidField::new("username", e))?;

    Ok(SignUpOptions::new(
        username.to_string(),
        email,
        password.to_string(),
    ))
}

/// Bare addr-spec check: `local@domain`, no display name, no quoting
fn is_valid_address(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > EMAIL_LOCAL_MAX_LENGTH {
        return false;
    }

    // dot-atom: no leading, trailing, or doubled dots
    local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SPECIALS.contains(c))
    })
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= DOMAIN_LABEL_MAX_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
