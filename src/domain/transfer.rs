//! Transfer type
//!
//! A validated movement of funds between two accounts.

use super::ValidationError;

/// A transfer that has passed input validation.
///
/// # Invariants
/// - `amount` is strictly positive
/// - `from_id` and `to_id` differ
///
/// Whether both accounts exist and the source can cover the amount is
/// checked by the store inside its transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    from_id: i64,
    to_id: i64,
    amount: i64,
}

impl Transfer {
    pub fn new(from_id: i64, to_id: i64, amount: i64) -> Result<Self, ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount(amount));
        }
        if from_id == to_id {
            return Err(ValidationError::SameAccount(from_id));
        }

        Ok(Self {
            from_id,
            to_id,
            amount,
        })
    }

    pub fn from_id(&self) -> i64 {
        self.from_id
    }

    pub fn to_id(&self) -> i64 {
        self.to_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Both account ids in ascending order, the order rows are locked in.
    pub fn ordered_ids(&self) -> [i64; 2] {
        if self.from_id < self.to_id {
            [self.from_id, self.to_id]
        } else {
            [self.to_id, self.from_id]
        }
    }
}
