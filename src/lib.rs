//! account_api Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod storage;

pub use config::{Config, ConfigError, StorageBackend};
pub use domain::{Account, NewAccount, PersonName, Transfer, ValidationError};
pub use error::{AppError, AppResult};
pub use storage::{MemoryStorage, PostgresStorage, SharedStorage, Storage, StorageError};
