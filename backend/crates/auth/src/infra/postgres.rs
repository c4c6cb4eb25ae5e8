//! PostgreSQL Storage Adapter

use kernel::error::conversions::is_unique_violation;
use sqlx::PgPool;

use crate::domain::account::AccountIdentity;
use crate::infra::storage::{AccountStorage, CreateAccountFilter, StorageError};

/// PostgreSQL-backed account storage
#[derive(Clone)]
pub struct PgAccountStorage {
    pool: PgPool,
}

impl PgAccountStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountStorage for PgAccountStorage {
    async fn create_account(
        &self,
        filter: CreateAccountFilter,
    ) -> Result<AccountIdentity, StorageError> {
        let (user_id, role) = sqlx::query_as::<_, (i64, String)>(
            r#"
            INSERT INTO accounts (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, role
            "#,
        )
        .bind(filter.username.as_str())
        .bind(filter.email.as_str())
        .bind(filter.hashed_password.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::AlreadyExists
            } else {
                StorageError::Failure(e.into())
            }
        })?;

        Ok(AccountIdentity {
            user_id,
            email: filter.email,
            username: filter.username,
            role,
        })
    }
}
