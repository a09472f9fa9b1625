//! Storage module
//!
//! The persistence port used by the API layer, with a PostgreSQL adapter
//! and an in-memory adapter that honour the same contract.

mod error;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Account, NewAccount, Transfer};

pub use error::StorageError;
pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;

/// Storage handle shared by all request handlers.
pub type SharedStorage = Arc<dyn Storage>;

/// Account persistence contract.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch one account. `StorageError::NotFound` when no row matches.
    async fn get_account_by_id(&self, id: i64) -> Result<Account, StorageError>;

    /// All accounts in whatever order the store yields them.
    async fn get_accounts(&self) -> Result<Vec<Account>, StorageError>;

    /// Persist a new account with a random number and zero balance,
    /// returning the row as stored.
    async fn create_account(&self, account: &NewAccount) -> Result<Account, StorageError>;

    /// Remove an account. Deleting an id that does not exist succeeds.
    async fn delete_account(&self, id: i64) -> Result<(), StorageError>;

    /// Move `amount` from one account to another as a single unit.
    ///
    /// Nothing changes unless both accounts exist and the source balance
    /// covers the amount.
    async fn transfer(&self, transfer: &Transfer) -> Result<(), StorageError>;
}
