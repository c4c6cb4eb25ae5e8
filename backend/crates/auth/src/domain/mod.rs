//! Domain Layer
//!
//! Account types, input validation, and repository traits.

pub mod account;
pub mod repository;
pub mod validation;

// Re-exports
pub use account::{AccountId, AccountIdentity, SignUpOptions};
pub use repository::{AccountStore, AccountStoreError};
