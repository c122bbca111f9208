//! Category

use chrono::{DateTime, Utc};
use kernel::id::CategoryId;

use crate::error::{ContentError, ContentResult};

pub const CATEGORY_NAME_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    /// Unique; see `CategoryUseCase` for collision handling
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, description: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name,
            description,
            slug,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: String, description: Option<String>, slug: String) {
        self.name = name;
        if let Some(description) = description {
            self.description = description;
        }
        self.slug = slug;
        self.updated_at = Utc::now();
    }
}

/// Trimmed name of 1 to 100 characters
pub fn category_name(raw: &str) -> ContentResult<String> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > CATEGORY_NAME_MAX {
        return Err(ContentError::Validation(format!(
            "Category name must be 1 to {CATEGORY_NAME_MAX} characters"
        )));
    }
    Ok(name.to_string())
}

/// Listing row; which posts are counted depends on the query
#[derive(Debug, Clone)]
pub struct CategoryWithCount {
    pub category: Category,
    pub post_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_name_bounds() {
        assert_eq!(category_name("  Tin tức ").unwrap(), "Tin tức");
        assert!(category_name("   ").is_err());
        assert!(category_name(&"a".repeat(CATEGORY_NAME_MAX)).is_ok());
        assert!(category_name(&"a".repeat(CATEGORY_NAME_MAX + 1)).is_err());
    }
}
