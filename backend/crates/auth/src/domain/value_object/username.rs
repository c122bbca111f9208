//! Username Value Object
//!
//! The public handle (`/users/public/username/{username}`).
//!
//! ## Invariants
//! - 3 to 30 characters after NFKC normalization and trimming
//! - only `a-z`, `0-9`, `_` and `.`; uppercase input is lowercased
//! - does not start or end with `.` and has no `..`
//! - at least one letter or digit

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username must be between {min} and {max} characters")]
    Length { min: usize, max: usize },

    #[error("Username may only contain a-z, 0-9, '_' and '.'")]
    InvalidCharacter,

    #[error("Username cannot start or end with '.' or contain '..'")]
    MisplacedDot,

    #[error("Username must contain at least one letter or digit")]
    NoAlphanumeric,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UsernameError> {
        let canonical = input
            .as_ref()
            .nfkc()
            .collect::<String>()
            .trim()
            .to_lowercase();

        let length = canonical.chars().count();
        if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
            return Err(UsernameError::Length {
                min: USERNAME_MIN_LENGTH,
                max: USERNAME_MAX_LENGTH,
            });
        }
        if !canonical
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.')
        {
            return Err(UsernameError::InvalidCharacter);
        }
        if canonical.starts_with('.') || canonical.ends_with('.') || canonical.contains("..") {
            return Err(UsernameError::MisplacedDot);
        }
        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(UsernameError::NoAlphanumeric);
        }

        Ok(Self(canonical))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UsernameError> for kernel::error::app_error::AppError {
    fn from(err: UsernameError) -> Self {
        Self::bad_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_is_lowercased() {
        assert_eq!(Username::new("  Nam.Nguyen_92 ").unwrap().as_str(), "nam.nguyen_92");
    }

    #[test]
    fn test_username_length_bounds() {
        assert!(Username::new("abc").is_ok());
        assert!(Username::new("a".repeat(30)).is_ok());
        assert!(matches!(Username::new("ab"), Err(UsernameError::Length { .. })));
        assert!(matches!(
            Username::new("a".repeat(31)),
            Err(UsernameError::Length { .. })
        ));
    }

    #[test]
    fn test_username_rejects_bad_shapes() {
        assert_eq!(Username::new("nam-nguyen"), Err(UsernameError::InvalidCharacter));
        assert_eq!(Username::new("nam nguyen"), Err(UsernameError::InvalidCharacter));
        assert_eq!(Username::new("nguyễn"), Err(UsernameError::InvalidCharacter));
        assert_eq!(Username::new(".nam"), Err(UsernameError::MisplacedDot));
        assert_eq!(Username::new("na..m"), Err(UsernameError::MisplacedDot));
        assert_eq!(Username::new("___"), Err(UsernameError::NoAlphanumeric));
    }

    #[test]
    fn test_fullwidth_input_is_normalized() {
        // NFKC folds fullwidth forms to ASCII
        assert_eq!(Username::new("ｎａｍ").unwrap().as_str(), "nam");
    }
}
