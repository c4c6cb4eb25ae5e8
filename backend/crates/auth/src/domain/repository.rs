//! Repository Traits
//!
//! Business-facing persistence interface. The storage adapter in `infra/`
//! speaks its own vocabulary; a wrapper there translates it into this one so
//! use cases never see storage-engine errors.

use thiserror::Error;

use crate::domain::account::{AccountIdentity, SignUpOptions};
use crate::error::BoxError;

/// Account store failures, in business terms
#[derive(Debug, Error)]
pub enum AccountStoreError {
    /// An account with this email already exists
    #[error("account already exists")]
    AlreadyExists,

    /// Anything else; the cause is opaque to callers
    #[error("create account: {0}")]
    Failure(#[source] BoxError),
}

/// Account store trait
#[trait_variant::make(AccountStore: Send)]
pub trait LocalAccountStore {
    /// Persist a new account
    ///
    /// `options.password()` must already hold the hashed credential.
    async fn post_sign_up(&self, options: SignUpOptions)
    -> Result<AccountIdentity, AccountStoreError>;
}
