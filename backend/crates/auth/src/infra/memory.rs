//! In-Memory Storage Adapter
//!
//! Same contract as the PostgreSQL adapter, with the email uniqueness
//! constraint enforced under a mutex. Used for local runs and tests.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use crate::domain::account::{AccountId, AccountIdentity};
use crate::infra::storage::{AccountStorage, CreateAccountFilter, StorageError};

/// Role assigned to new rows, mirroring the column default
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug)]
struct AccountRow {
    identity: AccountIdentity,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Table {
    last_id: AccountId,
    by_email: HashMap<String, AccountRow>,
}

/// Mutex-guarded account table
#[derive(Debug)]
pub struct InMemoryAccountStorage {
    default_role: String,
    table: Mutex<Table>,
}

impl InMemoryAccountStorage {
    pub fn new() -> Self {
        Self::with_default_role(DEFAULT_ROLE)
    }

    pub fn with_default_role(role: impl Into<String>) -> Self {
        Self {
            default_role: role.into(),
            table: Mutex::new(Table::default()),
        }
    }

    /// Stored credential for an email, if the account exists
    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        self.lock()
            .ok()?
            .by_email
            .get(email)
            .map(|row| row.password_hash.clone())
    }

    pub fn find_by_email(&self, email: &str) -> Option<AccountIdentity> {
        self.lock()
            .ok()?
            .by_email
            .get(email)
            .map(|row| row.identity.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|table| table.by_email.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, StorageError> {
        self.table
            .lock()
            .map_err(|_| StorageError::Failure("account table lock poisoned".into()))
    }
}

impl Default for InMemoryAccountStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStorage for InMemoryAccountStorage {
    async fn create_account(
        &self,
        filter: CreateAccountFilter,
    ) -> Result<AccountIdentity, StorageError> {
        let mut guard = self.lock()?;
        let table = &mut *guard;

        match table.by_email.entry(filter.email) {
            Entry::Occupied(_) => Err(StorageError::AlreadyExists),
            Entry::Vacant(slot) => {
                table.last_id += 1;

                let identity = AccountIdentity {
                    user_id: table.last_id,
                    email: slot.key().clone(),
                    username: filter.username,
                    role: self.default_role.clone(),
                };
                slot.insert(AccountRow {
                    identity: identity.clone(),
                    password_hash: filter.hashed_password,
                });

                Ok(identity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(email: &str) -> CreateAccountFilter {
        CreateAccountFilter {
            username: "tester".to_string(),
            email: email.to_string(),
            hashed_password: "hashed".to_string(),
        }
    }

    #[tokio::test]
    async fn test_assigns_increasing_ids_and_default_role() {
        let storage = InMemoryAccountStorage::new();

        let first = storage.create_account(filter("a@example.com")).await.unwrap();
        let second = storage.create_account(filter("b@example.com")).await.unwrap();

        assert_eq!(first.user_id, 1);
        assert_eq!(second.user_id, 2);
        assert_eq!(first.role, "user");
        assert_eq!(storage.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_writes_nothing() {
        let storage = InMemoryAccountStorage::new();
        storage.create_account(filter("a@example.com")).await.unwrap();

        let mut other = filter("a@example.com");
        other.username = "someone_else".to_string();
        other.hashed_password = "other-hash".to_string();

        assert!(matches!(
            storage.create_account(other).await,
            Err(StorageError::AlreadyExists)
        ));
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.password_hash_of("a@example.com").as_deref(), Some("hashed"));
        assert_eq!(
            storage.find_by_email("a@example.com").map(|a| a.username),
            Some("tester".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_role_is_allowed() {
        let storage = InMemoryAccountStorage::with_default_role("");
        let created = storage.create_account(filter("a@example.com")).await.unwrap();
        assert_eq!(created.role, "");
    }
}
