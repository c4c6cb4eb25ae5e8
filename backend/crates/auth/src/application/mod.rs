//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod sign_up;
pub mod tokens;

// Re-exports
pub use config::AuthConfig;
pub use sign_up::{SignUpError, SignUpService, SignUpUseCase};
pub use tokens::{
    AccessClaims, RefreshClaims, TokenError, TokenIssuer, TokenKind, TokenPair, generate_tokens,
};
