//! Account Types
//!
//! The validated sign-up input and the identity the store hands back.

use std::fmt;

/// Store-assigned account identifier
pub type AccountId = i64;

/// Validated, normalized sign-up input
///
/// Only [`crate::domain::validation::sign_up_options`] builds one, so holding
/// a value means the username is trimmed and well-formed, the email is
/// lowercased and syntactically valid, and the password is within bounds.
///
/// `password` starts as plaintext. The sign-up use case swaps it for the
/// hashed form before the value goes anywhere near storage.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpOptions {
    username: String,
    email: String,
    password: String,
}

impl SignUpOptions {
    pub(crate) fn new(username: String, email: String, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plaintext before hashing, hash afterwards
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Replace the password, consuming the plaintext-bearing value
    pub(crate) fn with_password(self, password: String) -> Self {
        Self { password, ..self }
    }

    /// Split into `(username, email, password)`
    pub fn into_parts(self) -> (String, String, String) {
        (self.username, self.email, self.password)
    }
}

impl fmt::Debug for SignUpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpOptions")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Account as persisted
///
/// Created once by the store's insert and passed up unchanged through every
/// layer to the HTTP handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    pub user_id: AccountId,
    pub email: String,
    pub username: String,
    /// Assigned by the store; may be empty
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let options = SignUpOptions::new(
            "alice_01".to_string(),
            "alice@example.com".to_string(),
            "correcthorsebattery".to_string(),
        );

        let debug = format!("{:?}", options);
        assert!(debug.contains("alice_01"));
        assert!(!debug.contains("correcthorsebattery"));
    }

    #[test]
    fn test_with_password_keeps_identity_fields() {
        let options = SignUpOptions::new(
            "alice_01".to_string(),
            "alice@example.com".to_string(),
            "correcthorsebattery".to_string(),
        )
        .with_password("$2b$04$hash".to_string());

        assert_eq!(options.username(), "alice_01");
        assert_eq!(options.email(), "alice@example.com");
        assert_eq!(options.password(), "$2b$04$hash");
    }
}
