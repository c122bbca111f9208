//! Tags

use kernel::id::TagId;
use platform::slug::tag_slug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub slug: String,
}

/// A tag named by a post author, resolved get-or-create by slug on save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub slug: String,
}

impl NewTag {
    /// Split a comma-separated list, dropping blanks and slug duplicates
    pub fn parse_list(raw: &str) -> Vec<NewTag> {
        let mut tags: Vec<NewTag> = Vec::new();
        for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let slug = tag_slug(name);
            if slug.is_empty() || tags.iter().any(|t| t.slug == slug) {
                continue;
            }
            tags.push(NewTag {
                name: name.to_string(),
                slug,
            });
        }
        tags
    }
}

/// Tag with the number of published posts carrying it
#[derive(Debug, Clone)]
pub struct TagUsage {
    pub tag: Tag,
    pub post_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_dedupes() {
        let tags = NewTag::parse_list(" Lúa gạo, ,lua-gao,Rust ,, ");
        let slugs: Vec<_> = tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, ["luagao", "rust"]);
        assert_eq!(tags[0].name, "Lúa gạo");
    }

    #[test]
    fn test_parse_list_of_blanks_is_empty() {
        assert!(NewTag::parse_list(" , ,").is_empty());
        assert!(NewTag::parse_list("").is_empty());
    }
}
