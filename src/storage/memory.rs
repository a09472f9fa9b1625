//! In-memory Storage
//!
//! `Storage` implementation that keeps accounts in a map behind an async
//! lock. Used by the test-suite and for running the service without a
//! database.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{random_account_number, Account, NewAccount, Transfer};

use super::{Storage, StorageError};

#[derive(Debug)]
struct State {
    next_id: i64,
    accounts: BTreeMap<i64, Account>,
}

/// Account store held in process memory
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    state: Arc<RwLock<State>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                next_id: 1,
                accounts: BTreeMap::new(),
            })),
        }
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Overwrite an account balance. There is no deposit operation, so this
    /// is how funded accounts are set up.
    pub async fn set_balance(&self, id: i64, balance: i64) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or(StorageError::NotFound(id))?;
        account.balance = balance;
        account.updated_at = Utc::now();
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_account_by_id(&self, id: i64) -> Result<Account, StorageError> {
        self.state
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, StorageError> {
        Ok(self.state.read().await.accounts.values().cloned().collect())
    }

    async fn create_account(&self, account: &NewAccount) -> Result<Account, StorageError> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        let now = Utc::now();
        let created = Account {
            id,
            first_name: account.first_name.as_str().to_owned(),
            last_name: account.last_name.as_str().to_owned(),
            number: random_account_number(),
            balance: 0,
            created_at: now,
            updated_at: now,
        };
        state.accounts.insert(id, created.clone());

        Ok(created)
    }

    async fn delete_account(&self, id: i64) -> Result<(), StorageError> {
        if self.state.write().await.accounts.remove(&id).is_none() {
            tracing::debug!(account_id = id, "delete matched no rows");
        }
        Ok(())
    }

    async fn transfer(&self, transfer: &Transfer) -> Result<(), StorageError> {
        let mut state = self.state.write().await;

        let from_balance = state
            .accounts
            .get(&transfer.from_id())
            .map(|a| a.balance)
            .ok_or(StorageError::NotFound(transfer.from_id()))?;
        let to_balance = state
            .accounts
            .get(&transfer.to_id())
            .map(|a| a.balance)
            .ok_or(StorageError::NotFound(transfer.to_id()))?;

        if from_balance < transfer.amount() {
            return Err(StorageError::InsufficientBalance {
                id: transfer.from_id(),
                available: from_balance,
                requested: transfer.amount(),
            });
        }
        let new_to_balance = to_balance
            .checked_add(transfer.amount())
            .ok_or(StorageError::BalanceOverflow(transfer.to_id()))?;

        // All checks passed; both updates happen under the same write guard
        let now = Utc::now();
        if let Some(from) = state.accounts.get_mut(&transfer.from_id()) {
            from.balance = from_balance - transfer.amount();
            from.updated_at = now;
        }
        if let Some(to) = state.accounts.get_mut(&transfer.to_id()) {
            to.balance = new_to_balance;
            to.updated_at = now;
        }

        Ok(())
    }
}
