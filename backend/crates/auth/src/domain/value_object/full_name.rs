//! Display name ("Nguyễn Văn An")
//!
//! Letters from the Latin-1 and Vietnamese ranges plus spaces, 2 to 100
//! characters. Stored with each word capitalized.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

const FULL_NAME_MIN_LENGTH: usize = 2;
const FULL_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        // NFC so that decomposed Vietnamese input counts as one char per letter
        let name: String = input.as_ref().nfc().collect();
        let length = name.chars().count();

        if !(FULL_NAME_MIN_LENGTH..=FULL_NAME_MAX_LENGTH).contains(&length)
            || !name.chars().all(Self::is_allowed)
            || name.trim().is_empty()
        {
            return Err(AppError::bad_request("Invalid name"));
        }

        Ok(Self(Self::capitalize(&name)))
    }

    /// `A-Z`, `a-z`, space, and the `À`..`ỹ` block used by Vietnamese
    fn is_allowed(c: char) -> bool {
        c.is_ascii_alphabetic() || c == ' ' || ('\u{00C0}'..='\u{1EF9}').contains(&c)
    }

    fn capitalize(name: &str) -> String {
        name.split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FullName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalizes_each_word() {
        assert_eq!(
            FullName::new("nguyễn  VĂN an").unwrap().as_str(),
            "Nguyễn Văn An"
        );
    }

    #[test]
    fn test_rejects_digits_and_symbols() {
        assert!(FullName::new("An2").is_err());
        assert!(FullName::new("An_Nguyen").is_err());
        assert!(FullName::new("A").is_err());
        assert!(FullName::new("  ").is_err());
        assert!(FullName::new("a".repeat(101)).is_err());
    }

    #[test]
    fn test_decomposed_input_is_accepted() {
        // "ễ" as e + circumflex + tilde
        let decomposed = "Nguye\u{0302}\u{0303}n";
        assert_eq!(FullName::new(decomposed).unwrap().as_str(), "Nguyễn");
    }
}
