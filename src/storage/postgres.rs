//! PostgreSQL Storage
//!
//! `Storage` implementation over a `sqlx` connection pool. The pool handles
//! connection sharing between concurrent requests.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{random_account_number, Account, NewAccount, Transfer};

use super::{Storage, StorageError};

const CREATE_ACCOUNTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id BIGSERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        number BIGINT NOT NULL,
        balance BIGINT NOT NULL DEFAULT 0 CHECK (balance >= 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Account store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `accounts` table if it does not exist yet.
    pub async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_ACCOUNTS_TABLE)
            .execute(&self.pool)
            .await?;

        tracing::info!("accounts table ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    async fn get_account_by_id(&self, id: i64) -> Result<Account, StorageError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, first_name, last_name, number, balance, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(id))
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, StorageError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, first_name, last_name, number, balance, created_at, updated_at FROM accounts",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn create_account(&self, account: &NewAccount) -> Result<Account, StorageError> {
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (first_name, last_name, number, balance)
            VALUES ($1, $2, $3, 0)
            RETURNING id, first_name, last_name, number, balance, created_at, updated_at
            "#,
        )
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(random_account_number())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_account(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(account_id = id, "delete matched no rows");
        }

        Ok(())
    }

    async fn transfer(&self, transfer: &Transfer) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;

        // Lock both rows in id order so opposing transfers cannot deadlock
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT id, balance
            FROM accounts
            WHERE id = ANY($1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(transfer.ordered_ids().to_vec())
        .fetch_all(&mut *tx)
        .await?;

        let balance_of = |id: i64| {
            rows.iter()
                .find(|(row_id, _)| *row_id == id)
                .map(|(_, balance)| *balance)
                .ok_or(StorageError::NotFound(id))
        };

        let from_balance = balance_of(transfer.from_id())?;
        let to_balance = balance_of(transfer.to_id())?;

        let new_from_balance = from_balance - transfer.amount();
        if new_from_balance < 0 {
            return Err(StorageError::InsufficientBalance {
                id: transfer.from_id(),
                available: from_balance,
                requested: transfer.amount(),
            });
        }
        let new_to_balance = to_balance
            .checked_add(transfer.amount())
            .ok_or(StorageError::BalanceOverflow(transfer.to_id()))?;

        for (id, balance) in [
            (transfer.from_id(), new_from_balance),
            (transfer.to_id(), new_to_balance),
        ] {
            sqlx::query("UPDATE accounts SET balance = $1, updated_at = NOW() WHERE id = $2")
                .bind(balance)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            from_id = transfer.from_id(),
            to_id = transfer.to_id(),
            amount = transfer.amount(),
            "transfer committed"
        );
        Ok(())
    }
}
