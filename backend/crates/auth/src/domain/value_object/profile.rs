//! Profile fields editable by the account owner

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[display("male")]
    Male,
    #[display("female")]
    Female,
    #[default]
    #[display("other")]
    Other,
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(AppError::bad_request("Gender must be male, female or other")),
        }
    }
}

/// Preset personas offered by the profile form
pub const BIO_PERSONAS: [&str; 5] = [
    "Nông dân",
    "Quản trị viên",
    "Chủ trang trại",
    "Nhà nghiên cứu",
    "Ẩn danh",
];

pub const DEFAULT_BIO: &str = "Ẩn danh";

const BIO_MAX_LENGTH: usize = 160;

/// Short self-description: a persona or free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bio(String);

impl Bio {
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        let bio = input.as_ref().trim();
        if bio.chars().count() > BIO_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Bio must be at most {BIO_MAX_LENGTH} characters"
            )));
        }
        if bio.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self(bio.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn is_persona(&self) -> bool {
        BIO_PERSONAS.contains(&self.0.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Bio {
    fn default() -> Self {
        Self(DEFAULT_BIO.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parsing() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("unknown".parse::<Gender>().is_err());
        assert_eq!(Gender::default().to_string(), "other");
    }

    #[test]
    fn test_bio_rules() {
        assert!(Bio::new("Nhà nghiên cứu").unwrap().is_persona());
        assert!(!Bio::new("Trồng lúa ở Cần Thơ").unwrap().is_persona());
        assert_eq!(Bio::new("   ").unwrap().as_str(), DEFAULT_BIO);
        assert!(Bio::new("x".repeat(161)).is_err());
    }
}
