use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a post; only `Published` posts are publicly listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    /// Set by moderators; owners cannot choose or leave it
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid post status: {0}")]
pub struct UnknownPostStatus(pub String);

impl PostStatus {
    pub const ALL: [PostStatus; 3] = [PostStatus::Draft, PostStatus::Published, PostStatus::Blocked];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Blocked => "blocked",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Result<Self, UnknownPostStatus> {
        match code.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "blocked" => Ok(PostStatus::Blocked),
            other => Err(UnknownPostStatus(other.to_string())),
        }
    }

    #[inline]
    pub const fn is_published(&self) -> bool {
        matches!(self, PostStatus::Published)
    }
}

impl FromStr for PostStatus {
    type Err = UnknownPostStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for status in PostStatus::ALL {
            assert_eq!(PostStatus::from_code(status.code()), Ok(status));
        }
        assert_eq!(" Published ".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert!("archived".parse::<PostStatus>().is_err());
    }
}
