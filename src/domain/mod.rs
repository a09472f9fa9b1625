//! Domain module
//!
//! Account entity and validated input types.

pub mod account;
pub mod error;
pub mod name;
pub mod transfer;

pub use account::{random_account_number, Account, NewAccount, ACCOUNT_NUMBER_RANGE};
pub use error::ValidationError;
pub use name::{PersonName, MAX_NAME_LEN, MIN_NAME_LEN};
pub use transfer::Transfer;
