//! Sign Up Use Case
//!
//! Hashes the password of validated input and persists the account.

use std::sync::Arc;

use platform::password::CredentialHasher;
use thiserror::Error;

use crate::domain::account::{AccountIdentity, SignUpOptions};
use crate::domain::repository::{AccountStore, AccountStoreError};
use crate::error::BoxError;

/// Sign-up failures
#[derive(Debug, Error)]
pub enum SignUpError {
    /// Email already registered
    #[error("account already exists")]
    AlreadyExists,

    #[error("hash password: {0}")]
    HashingFailed(#[source] BoxError),

    #[error("post sign up: {0}")]
    Internal(#[source] BoxError),
}

impl From<AccountStoreError> for SignUpError {
    fn from(err: AccountStoreError) -> Self {
        match err {
            AccountStoreError::AlreadyExists => SignUpError::AlreadyExists,
            other => SignUpError::Internal(other.into()),
        }
    }
}

/// Sign-up service consumed by the HTTP layer
#[trait_variant::make(SignUpService: Send)]
pub trait LocalSignUpService {
    /// `options` carries the plaintext password; it is never stored as-is
    async fn post_sign_up(&self, options: SignUpOptions) -> Result<AccountIdentity, SignUpError>;
}

/// Sign up use case
pub struct SignUpUseCase<S, H> {
    store: Arc<S>,
    hasher: Arc<H>,
}

impl<S, H> SignUpUseCase<S, H> {
    pub fn new(store: Arc<S>, hasher: Arc<H>) -> Self {
        Self { store, hasher }
    }
}

impl<S, H> SignUpService for SignUpUseCase<S, H>
where
    S: AccountStore + Send + Sync,
    H: CredentialHasher + 'static,
{
    async fn post_sign_up(&self, options: SignUpOptions) -> Result<AccountIdentity, SignUpError> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = options.password().to_string();

        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| SignUpError::HashingFailed(e.into()))?
            .map_err(|e| SignUpError::HashingFailed(e.into()))?;

        let identity = self
            .store
            .post_sign_up(options.with_password(hashed))
            .await?;

        tracing::info!(
            user_id = identity.user_id,
            username = %identity.username,
            algorithm = self.hasher.algorithm(),
            "User signed up"
        );

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use platform::password::{BcryptHasher, PasswordHashError};

    use super::{
        AccountIdentity, AccountStore, AccountStoreError, Arc, CredentialHasher, SignUpError,
        SignUpOptions, SignUpService, SignUpUseCase,
    };
    use crate::domain::validation::sign_up_options;

    /// Store that records what it was handed
    #[derive(Default)]
    struct RecordingStore {
        received: Mutex<Vec<SignUpOptions>>,
        duplicate: bool,
    }

    impl AccountStore for RecordingStore {
        async fn post_sign_up(
            &self,
            options: SignUpOptions,
        ) -> Result<AccountIdentity, AccountStoreError> {
            if self.duplicate {
                return Err(AccountStoreError::AlreadyExists);
            }
            let identity = AccountIdentity {
                user_id: 1,
                email: options.email().to_string(),
                username: options.username().to_string(),
                role: "user".to_string(),
            };
            self.received.lock().unwrap().push(options);
            Ok(identity)
        }
    }

    struct FailingHasher;

    impl CredentialHasher for FailingHasher {
        fn hash(&self, _plaintext: &str) -> Result<String, PasswordHashError> {
            Err(PasswordHashError::HashingFailed("boom".to_string()))
        }

        fn verify(&self, _plaintext: &str, _hash: &str) -> Result<bool, PasswordHashError> {
            Ok(false)
        }

        fn algorithm(&self) -> &'static str {
            "failing"
        }
    }

    fn options() -> SignUpOptions {
        sign_up_options("alice_01", "alice@example.com", "correcthorsebattery").unwrap()
    }

    fn fast_hasher() -> Arc<BcryptHasher> {
        Arc::new(BcryptHasher::with_cost(4).unwrap())
    }

    #[tokio::test]
    async fn test_store_receives_hash_not_plaintext() {
        let store = Arc::new(RecordingStore::default());
        let hasher = fast_hasher();
        let usecase = SignUpUseCase::new(Arc::clone(&store), Arc::clone(&hasher));

        let identity = usecase.post_sign_up(options()).await.unwrap();
        assert_eq!(identity.email, "alice@example.com");

        let received = store.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let stored = received[0].password();
        assert_ne!(stored, "correcthorsebattery");
        assert!(hasher.verify("correcthorsebattery", stored).unwrap());
    }

    #[tokio::test]
    async fn test_hashing_failure_skips_store() {
        let store = Arc::new(RecordingStore::default());
        let usecase = SignUpUseCase::new(Arc::clone(&store), Arc::new(FailingHasher));

        let result = usecase.post_sign_up(options()).await;
        assert!(matches!(result, Err(SignUpError::HashingFailed(_))));
        assert!(store.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_maps_to_already_exists() {
        let store = Arc::new(RecordingStore {
            duplicate: true,
            ..Default::default()
        });
        let usecase = SignUpUseCase::new(store, fast_hasher());

        let result = usecase.post_sign_up(options()).await;
        assert!(matches!(result, Err(SignUpError::AlreadyExists)));
    }

    #[test]
    fn test_store_failure_is_internal() {
        let err = SignUpError::from(AccountStoreError::Failure("disk full".into()));
        assert!(matches!(err, SignUpError::Internal(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
