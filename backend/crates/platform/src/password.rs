//! Password Hashing and Verification
//!
//! - Composition policy for new passwords (length plus character classes)
//! - Argon2id hashing with optional application-wide pepper
//! - Zeroization of clear text on drop
//!
//! Login attempts go through [`ClearTextPassword::for_verification`], which
//! skips the policy so that error messages never reveal which rule a stored
//! password satisfies.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 50;

/// ASCII punctuation accepted as the "special character" class
const SPECIAL_CHARACTERS: &str = " `!@#$%^&*()_+-=[]{};':\"\\|,.<>/?~";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password must contain at least one special character")]
    MissingSpecial,

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Hashing / verification failure
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, zeroized on drop, never `Clone`, redacted in `Debug`
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// assert!(ClearTextPassword::new("Str0ng!pass".to_string()).is_ok());
/// assert!(ClearTextPassword::new("weakpass".to_string()).is_err());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate a new password against the composition policy
    ///
    /// Input is NFKC-normalized first; length is counted in code points.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let candidate = Self::for_verification(raw);
        candidate.check_policy()?;
        Ok(candidate)
    }

    /// Wrap a login attempt without applying the policy
    pub fn for_verification(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let pw = self.0.as_str();
        let char_count = pw.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if pw.chars().any(|c| c.is_control()) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }
        if !pw.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            return Err(PasswordPolicyError::MissingSpecial);
        }
        if !pw.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !pw.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !pw.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        Ok(())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id (default OWASP parameters) and a fresh random salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a PHC string loaded from the database
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Constant-time verification; the pepper must match the one used to hash
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(s: &str) -> Result<ClearTextPassword, PasswordPolicyError> {
        ClearTextPassword::new(s.to_string())
    }

    #[test]
    fn test_policy_accepts_compliant_password() {
        assert!(pw("Abcdef1!").is_ok());
        assert!(pw("Correct Horse 9 Battery").is_ok()); // space counts as special
    }

    #[test]
    fn test_policy_length_bounds() {
        assert_eq!(
            pw("Ab1!").unwrap_err(),
            PasswordPolicyError::TooShort { min: 8, actual: 4 }
        );
        let long = format!("Aa1!{}", "x".repeat(47));
        assert_eq!(
            pw(&long).unwrap_err(),
            PasswordPolicyError::TooLong { max: 50, actual: 51 }
        );
    }

    #[test]
    fn test_policy_character_classes() {
        assert_eq!(pw("Abcdefg1").unwrap_err(), PasswordPolicyError::MissingSpecial);
        assert_eq!(pw("abcdef1!").unwrap_err(), PasswordPolicyError::MissingUppercase);
        assert_eq!(pw("ABCDEF1!").unwrap_err(), PasswordPolicyError::MissingLowercase);
        assert_eq!(pw("Abcdefg!").unwrap_err(), PasswordPolicyError::MissingDigit);
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(pw("Abcdef1!\u{0007}").unwrap_err(), PasswordPolicyError::InvalidCharacter);
    }

    #[test]
    fn test_hash_and_verify() {
        let password = pw("Str0ng!pass").unwrap();
        let hashed = password.hash(None).unwrap();
        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify(&password, None));

        let wrong = ClearTextPassword::for_verification("Str0ng!pasS".to_string());
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_pepper_must_match() {
        let password = pw("Str0ng!pass").unwrap();
        let hashed = password.hash(Some(b"pepper")).unwrap();
        assert!(hashed.verify(&password, Some(b"pepper")));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"other")));
    }

    #[test]
    fn test_salt_is_random() {
        let password = pw("Str0ng!pass").unwrap();
        let a = password.hash(None).unwrap();
        let b = password.hash(None).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_from_phc_string() {
        let hashed = pw("Str0ng!pass").unwrap().hash(None).unwrap();
        let loaded = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert_eq!(loaded.as_phc_string(), hashed.as_phc_string());
        assert!(HashedPassword::from_phc_string("plaintext").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = pw("Str0ng!pass").unwrap();
        assert!(!format!("{:?}", password).contains("Str0ng"));
    }
}
