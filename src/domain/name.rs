//! Person name type
//!
//! Domain primitive for the first and last name of an account holder.
//! Names are validated at construction, so a `PersonName` is always
//! between 2 and 40 characters long.

use serde::Serialize;
use std::fmt;

use super::ValidationError;

/// Minimum name length in characters
pub const MIN_NAME_LEN: usize = 2;

/// Maximum name length in characters
pub const MAX_NAME_LEN: usize = 40;

/// A validated first or last name.
///
/// Length is counted in Unicode scalar values. Surrounding whitespace is
/// kept as given.
///
/// # Example
/// ```
/// use account_api::domain::PersonName;
///
/// let name = PersonName::parse("firstName", "Ann").unwrap();
/// assert_eq!(name.as_str(), "Ann");
/// assert!(PersonName::parse("firstName", "A").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Validate `value` as the name stored under `field`.
    ///
    /// `field` only appears in the error message.
    pub fn parse(field: &'static str, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let len = value.chars().count();

        if len == 0 {
            return Err(ValidationError::Required(field));
        }
        if len < MIN_NAME_LEN {
            return Err(ValidationError::TooShort {
                field,
                min: MIN_NAME_LEN,
                actual: len,
            });
        }
        if len > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_NAME_LEN,
                actual: len,
            });
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
