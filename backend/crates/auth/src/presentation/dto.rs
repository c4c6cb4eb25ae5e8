//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::account::AccountId;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Clone, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Sign up response; the refresh token travels in a cookie instead
#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub access_token: String,
}

// ============================================================================
// Current Account (for authenticated callers)
// ============================================================================

/// Identity carried by the presented access token
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user_id: AccountId,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role: String,
}
