//! Storage Errors
//!
//! Error types for storage operations.

/// Errors that can occur in a storage adapter
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No account with this id
    #[error("Account not found: {0}")]
    NotFound(i64),

    /// Source account cannot cover a transfer
    #[error("Insufficient balance in account {id}: available {available}, requested {requested}")]
    InsufficientBalance {
        id: i64,
        available: i64,
        requested: i64,
    },

    /// Crediting would overflow the destination balance
    #[error("Balance overflow on account {0}")]
    BalanceOverflow(i64),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Check if this error was caused by the request rather than the store
    pub fn is_client_error(&self) -> bool {
        !matches!(self, StorageError::Database(_))
    }
}
