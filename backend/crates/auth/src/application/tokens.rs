//! Token Issuer
//!
//! Signs the access/refresh token pair handed out after sign-up. Both tokens
//! are HS256 JWTs signed with the same process-wide secret; neither has any
//! server-side state. A `typ` claim tells the two apart, so one can never be
//! presented in place of the other.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::account::{AccountId, AccountIdentity};

/// Access token lifetime (24 hours)
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Refresh token lifetime (720 hours = 30 days)
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(720 * 3600);

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed; a configuration problem, never retried
    #[error("failed to sign jwt: {0}")]
    SigningFailed(String),

    /// Signature, expiry or shape check failed while decoding
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// Well-formed token of the other kind
    #[error("expected {expected} token, got {actual}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },
}

/// Token type carried in the `typ` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims that declare which kind of token they belong to
trait TypedClaims {
    fn kind(&self) -> TokenKind;
}

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: AccountId,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
    pub typ: TokenKind,
}

impl TypedClaims for AccessClaims {
    fn kind(&self) -> TokenKind {
        self.typ
    }
}

/// Refresh token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub user_id: AccountId,
    pub email: String,
    pub exp: i64,
    pub typ: TokenKind,
}

impl TypedClaims for RefreshClaims {
    fn kind(&self) -> TokenKind {
        self.typ
    }
}

/// Signed token pair
#[derive(Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair").finish_non_exhaustive()
    }
}

/// Signs and verifies tokens with one symmetric secret
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Vec<u8>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: impl Into<Vec<u8>>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn generate_tokens(&self, identity: &AccountIdentity) -> Result<TokenPair, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::SigningFailed("signing secret is empty".to_string()));
        }

        let now = Utc::now().timestamp();

        let access = AccessClaims {
            user_id: identity.user_id,
            email: identity.email.clone(),
            role: identity.role.clone(),
            exp: now + ttl_secs(self.access_ttl),
            typ: TokenKind::Access,
        };
        let refresh = RefreshClaims {
            user_id: identity.user_id,
            email: identity.email.clone(),
            exp: now + ttl_secs(self.refresh_ttl),
            typ: TokenKind::Refresh,
        };

        Ok(TokenPair {
            access_token: self.sign(&access)?,
            refresh_token: self.sign(&refresh)?,
        })
    }

    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.verify(token, TokenKind::Access)
    }

    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.verify(token, TokenKind::Refresh)
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(
            &Header::new(ALGORITHM),
            claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    fn verify<T>(&self, token: &str, expected: TokenKind) -> Result<T, TokenError>
    where
        T: TypedClaims + for<'de> Deserialize<'de>,
    {
        let claims = decode::<T>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Validation::new(ALGORITHM),
        )?
        .claims;

        match claims.kind() {
            actual if actual == expected => Ok(claims),
            actual => Err(TokenError::WrongKind { expected, actual }),
        }
    }
}

/// Sign a token pair with the default lifetimes
pub fn generate_tokens(identity: &AccountIdentity, secret: &[u8]) -> Result<TokenPair, TokenError> {
    TokenIssuer::new(secret, ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL).generate_tokens(identity)
}

fn ttl_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signing-secret";

    fn identity() -> AccountIdentity {
        AccountIdentity {
            user_id: 7,
            email: "alice@example.com".to_string(),
            username: "alice_01".to_string(),
            role: "user".to_string(),
        }
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL)
    }

    #[test]
    fn test_access_claims_round_trip() {
        let pair = generate_tokens(&identity(), SECRET).unwrap();
        let claims = issuer().decode_access_token(&pair.access_token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "user");

        let lifetime = claims.exp - Utc::now().timestamp();
        assert!((24 * 3600 - 60..=24 * 3600).contains(&lifetime), "lifetime {lifetime}");
    }

    #[test]
    fn test_refresh_claims_lifetime() {
        let pair = issuer().generate_tokens(&identity()).unwrap();
        let claims = issuer().decode_refresh_token(&pair.refresh_token).unwrap();

        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.user_id, 7);

        let lifetime = claims.exp - Utc::now().timestamp();
        assert!((720 * 3600 - 60..=720 * 3600).contains(&lifetime), "lifetime {lifetime}");
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let pair = issuer().generate_tokens(&identity()).unwrap();
        let other = TokenIssuer::new(b"another-secret".to_vec(), ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL);

        assert!(matches!(
            other.decode_access_token(&pair.access_token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_tokens_differ() {
        let pair = issuer().generate_tokens(&identity()).unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_empty_role_is_omitted() {
        let claims = AccessClaims {
            user_id: 1,
            email: "a@b.c".to_string(),
            role: String::new(),
            exp: 0,
            typ: TokenKind::Access,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("role").is_none());
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["typ"], "access");
    }

    #[test]
    fn test_empty_secret_is_signing_failure() {
        let result = generate_tokens(&identity(), b"");
        assert!(matches!(result, Err(TokenError::SigningFailed(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Default validation allows 60s of leeway
        let claims = AccessClaims {
            user_id: 7,
            email: "alice@example.com".to_string(),
            role: "user".to_string(),
            exp: Utc::now().timestamp() - 120,
            typ: TokenKind::Access,
        };
        let stale = issuer().sign(&claims).unwrap();

        assert!(matches!(
            issuer().decode_access_token(&stale),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let pair = issuer().generate_tokens(&identity()).unwrap();

        assert!(matches!(
            issuer().decode_access_token(&pair.refresh_token),
            Err(TokenError::WrongKind {
                expected: TokenKind::Access,
                actual: TokenKind::Refresh,
            })
        ));
        assert!(matches!(
            issuer().decode_refresh_token(&pair.access_token),
            Err(TokenError::WrongKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            })
        ));
    }

    #[test]
    fn test_untyped_claims_are_rejected() {
        #[derive(Serialize)]
        struct Untyped {
            user_id: AccountId,
            email: String,
            exp: i64,
        }

        let token = issuer()
            .sign(&Untyped {
                user_id: 7,
                email: "alice@example.com".to_string(),
                exp: Utc::now().timestamp() + 600,
            })
            .unwrap();

        assert!(matches!(
            issuer().decode_access_token(&token),
            Err(TokenError::Invalid(_))
        ));
    }
}
