use serde::{Deserialize, Serialize};
use std::fmt;

/// Which comment table a report or a `?type=` parameter points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentType {
    Base,
    Sub,
}

impl CommentType {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            CommentType::Base => "base",
            CommentType::Sub => "sub",
        }
    }

    /// `None` for anything but `base` or `sub`
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "base" => Some(CommentType::Base),
            "sub" => Some(CommentType::Sub),
            _ => None,
        }
    }
}

impl fmt::Display for CommentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(CommentType::from_code("base"), Some(CommentType::Base));
        assert_eq!(CommentType::from_code("SUB"), Some(CommentType::Sub));
        assert_eq!(CommentType::from_code("reply"), None);
    }
}
