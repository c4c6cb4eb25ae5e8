//! Infrastructure Layer
//!
//! Storage adapters and the wrapper that exposes them to the domain.

pub mod account_store;
pub mod memory;
pub mod postgres;
pub mod storage;

pub use account_store::StorageAccountStore;
pub use memory::InMemoryAccountStorage;
pub use postgres::PgAccountStorage;
pub use storage::{AccountStorage, CreateAccountFilter, StorageError};
