//! Validation Error Types
//!
//! Input validation failures. Independent of HTTP and storage.

use thiserror::Error;

/// Reasons a request is rejected before it reaches the store.
///
/// Every variant maps to 400 Bad Request at the API layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at least {min} characters (got {actual})")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("amount must be positive (got {0})")]
    NonPositiveAmount(i64),

    #[error("cannot transfer from account {0} to itself")]
    SameAccount(i64),
}
