//! Storage Adapter Contract
//!
//! The account store as the storage engine sees it: one insert, one
//! uniqueness constraint on email, and engine-level errors.

use thiserror::Error;

use crate::domain::account::AccountIdentity;
use crate::error::BoxError;

/// Insert input for a new account row
#[derive(Clone, PartialEq, Eq)]
pub struct CreateAccountFilter {
    pub username: String,
    pub email: String,
    /// Never the plaintext
    pub hashed_password: String,
}

impl std::fmt::Debug for CreateAccountFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAccountFilter")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("hashed_password", &"[REDACTED]")
            .finish()
    }
}

/// Storage-layer failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// Uniqueness constraint on email rejected the insert
    #[error("email already exists")]
    AlreadyExists,

    /// Connectivity, schema or row-mapping failure
    #[error("failed to insert new account: {0}")]
    Failure(#[source] BoxError),
}

/// Storage adapter trait
#[trait_variant::make(AccountStorage: Send)]
pub trait LocalAccountStorage {
    /// Insert one account row and return it with its store-assigned id and role
    ///
    /// Atomic: on any error no row has been written.
    async fn create_account(
        &self,
        filter: CreateAccountFilter,
    ) -> Result<AccountIdentity, StorageError>;
}
