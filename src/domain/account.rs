//! Account entity
//!
//! The persisted account record and the validated input used to create one.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::PersonName;

/// Account numbers are drawn uniformly from this range at creation.
pub const ACCOUNT_NUMBER_RANGE: Range<i64> = 0..1_000_000;

/// A persisted account.
///
/// Decoded from the `accounts` table by column name, so the struct field
/// order is independent of the table's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for account creation.
///
/// Holds only what the caller controls. The store assigns id, number,
/// balance and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: PersonName,
    pub last_name: PersonName,
}

impl NewAccount {
    pub fn new(first_name: PersonName, last_name: PersonName) -> Self {
        Self {
            first_name,
            last_name,
        }
    }
}

/// Draw a fresh account number. Collisions are possible and not checked.
pub fn random_account_number() -> i64 {
    rand::thread_rng().gen_range(ACCOUNT_NUMBER_RANGE)
}
