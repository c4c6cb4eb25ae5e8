//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account types, input validation, store trait
//! - `application/` - Sign-up use case, token issuer, configuration
//! - `infra/` - Storage adapters and the store wrapper over them
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Account sign-up with username, email and password
//! - Access/refresh JWT pair issued on sign-up (refresh token in a cookie)
//! - Bearer access-token middleware for protected routes
//!
//! ## Security Model
//! - Passwords hashed with bcrypt (cost 12) off the async runtime
//! - Email uniqueness enforced by the storage engine, not by a pre-check
//! - Server-side failure details are logged, never returned to clients

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::sign_up::{SignUpError, SignUpService, SignUpUseCase};
pub use application::tokens::{AccessClaims, TokenIssuer, generate_tokens};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAccountStorage, PgAccountStorage, StorageAccountStore};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};
