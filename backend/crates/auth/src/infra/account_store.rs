//! Storage Wrapper
//!
//! Implements the business-facing [`AccountStore`] on top of any
//! [`AccountStorage`] adapter, re-expressing storage errors in the domain's
//! vocabulary. This layer never hashes; it expects the use case to have done
//! so already.

use std::sync::Arc;

use crate::domain::account::{AccountIdentity, SignUpOptions};
use crate::domain::repository::{AccountStore, AccountStoreError};
use crate::infra::storage::{AccountStorage, CreateAccountFilter, StorageError};

/// [`AccountStore`] backed by a storage adapter
pub struct StorageAccountStore<S> {
    storage: Arc<S>,
}

impl<S> StorageAccountStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

impl From<SignUpOptions> for CreateAccountFilter {
    fn from(options: SignUpOptions) -> Self {
        let (username, email, hashed_password) = options.into_parts();
        Self {
            username,
            email,
            hashed_password,
        }
    }
}

impl From<StorageError> for AccountStoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AlreadyExists => AccountStoreError::AlreadyExists,
            other => AccountStoreError::Failure(other.into()),
        }
    }
}

impl<S> AccountStore for StorageAccountStore<S>
where
    S: AccountStorage + Send + Sync,
{
    async fn post_sign_up(
        &self,
        options: SignUpOptions,
    ) -> Result<AccountIdentity, AccountStoreError> {
        let identity = self.storage.create_account(options.into()).await?;
        Ok(identity)
    }
}
