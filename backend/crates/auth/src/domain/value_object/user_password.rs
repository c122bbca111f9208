//! User Password Value Object
//!
//! Domain wrappers over `platform::password`.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("Tr0ng-lua!".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&RawPassword::for_verification("Tr0ng-lua!".to_string()), None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

/// Password as typed by the user; zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// New password (register, reset, change): the composition policy applies
    pub fn new(raw: String) -> AppResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| AppError::bad_request(e.to_string()))
    }

    /// Password typed at login or as the "old password": no policy check
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Argon2id PHC string as stored in `users.password_hash`
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_applies_to_new_passwords_only() {
        assert!(RawPassword::new("nouppercase1!".to_string()).is_err());
        // Login input is never policy-checked
        let _ = RawPassword::for_verification("x".to_string());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Gao-Nep-2024".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        let typed = RawPassword::for_verification("Gao-Nep-2024".to_string());
        assert!(hashed.verify(&typed, Some(b"pepper")));
        assert!(!hashed.verify(&typed, None));

        let wrong = RawPassword::for_verification("Gao-Nep-2025".to_string());
        assert!(!hashed.verify(&wrong, Some(b"pepper")));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("Secret-Pass1".to_string()).unwrap();
        assert!(!format!("{raw:?}").contains("Secret"));
    }
}
