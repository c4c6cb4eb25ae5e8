//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

pub use platform::cookie::SameSite;
use platform::cookie::CookieConfig;

use crate::application::tokens::{ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL, TokenIssuer};

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret shared by access and refresh tokens
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime (24 hours)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime, also the cookie Max-Age (30 days)
    pub refresh_token_ttl: Duration,
    /// Refresh cookie name
    pub refresh_cookie_name: String,
    /// Whether to mark the refresh cookie Secure
    pub cookie_secure: bool,
    /// SameSite policy; attribute omitted when `None`
    pub cookie_same_site: Option<SameSite>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .finish()
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_ttl: ACCESS_TOKEN_TTL,
            refresh_token_ttl: REFRESH_TOKEN_TTL,
            refresh_cookie_name: "refresh_token".to_string(),
            cookie_secure: true,
            cookie_same_site: None,
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            cookie_secure: false,
            ..Self::new(jwt_secret)
        }
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(
            self.jwt_secret.clone(),
            self.access_token_ttl,
            self.refresh_token_ttl,
        )
    }

    /// Attributes of the refresh token cookie
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            path: "/".to_string(),
            http_only: true,
            secure: self.cookie_secure,
            max_age_secs: Some(self.refresh_token_ttl.as_secs()),
            same_site: self.cookie_same_site,
        }
    }
}
