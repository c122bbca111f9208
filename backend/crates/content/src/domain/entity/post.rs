//! Post

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, PostId, UserId};
use platform::slug::post_slug;

use crate::domain::entity::tag::NewTag;
use crate::domain::value_object::post_status::PostStatus;
use crate::error::{ContentError, ContentResult};

pub const TITLE_MAX: usize = 255;
pub const PUBLISHED_TITLE_MIN: usize = 2;
pub const PUBLISHED_CONTENT_MIN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    /// Required once published
    pub category_id: Option<CategoryId>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: PostStatus,
    /// Empty when the post has no thumbnail
    pub thumbnail_url: String,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author: UserId, draft: &PostDraft, thumbnail_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            user_id: author,
            category_id: draft.category_id,
            title: draft.title.clone(),
            slug: post_slug(&draft.title),
            content: draft.content.clone(),
            status: draft.status,
            thumbnail_url,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields; the slug follows the title
    pub fn apply(&mut self, draft: &PostDraft) {
        if self.title != draft.title {
            self.slug = post_slug(&draft.title);
        }
        self.category_id = draft.category_id;
        self.title = draft.title.clone();
        self.content = draft.content.clone();
        self.status = draft.status;
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Author-supplied fields of a post
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub category_id: Option<CategoryId>,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub tags: Vec<NewTag>,
}

impl PostDraft {
    pub fn new(
        category_id: Option<CategoryId>,
        title: &str,
        content: String,
        status: PostStatus,
        tags: &str,
    ) -> Self {
        Self {
            category_id,
            title: title.trim().to_string(),
            content,
            status,
            tags: NewTag::parse_list(tags),
        }
    }

    /// Checks that need no store lookup; publishing is stricter than drafting
    pub fn validate(&self) -> ContentResult<()> {
        let title_len = self.title.chars().count();
        if title_len > TITLE_MAX {
            return Err(ContentError::Validation(format!(
                "Title must be at most {TITLE_MAX} characters"
            )));
        }
        if !self.status.is_published() {
            return Ok(());
        }

        if self.category_id.is_none() {
            return Err(ContentError::CategoryMissing);
        }
        if title_len < PUBLISHED_TITLE_MIN {
            return Err(ContentError::Validation(format!(
                "Title must be {PUBLISHED_TITLE_MIN} to {TITLE_MAX} characters"
            )));
        }
        if self.content.trim().chars().count() < PUBLISHED_CONTENT_MIN {
            return Err(ContentError::Validation(format!(
                "Content must be at least {PUBLISHED_CONTENT_MIN} characters"
            )));
        }
        if self.tags.is_empty() {
            return Err(ContentError::Validation(
                "At least one tag is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// What a post deletion removed
#[derive(Debug, Clone, Default)]
pub struct DeletedPosts {
    pub post_ids: Vec<PostId>,
    pub comments: i64,
    pub sub_comments: i64,
    /// Non-empty thumbnail URLs of the deleted posts
    pub thumbnails: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn published(title: &str, content: &str, tags: &str) -> PostDraft {
        PostDraft::new(
            Some(CategoryId::new()),
            title,
            content.to_string(),
            PostStatus::Published,
            tags,
        )
    }

    #[test]
    fn test_published_rules() {
        assert!(published("Mùa lúa", "Nội dung đủ dài.", "lua").validate().is_ok());
        assert!(published("M", "Nội dung đủ dài.", "lua").validate().is_err());
        assert!(published("Mùa lúa", "ngắn", "lua").validate().is_err());
        assert!(published("Mùa lúa", "Nội dung đủ dài.", " , ").validate().is_err());

        let mut no_category = published("Mùa lúa", "Nội dung đủ dài.", "lua");
        no_category.category_id = None;
        assert!(matches!(
            no_category.validate(),
            Err(ContentError::CategoryMissing)
        ));
    }

    #[test]
    fn test_drafts_are_lenient() {
        let draft = PostDraft::new(None, "", String::new(), PostStatus::Draft, "");
        assert!(draft.validate().is_ok());

        let long = PostDraft::new(None, &"x".repeat(TITLE_MAX + 1), String::new(), PostStatus::Draft, "");
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_slug_follows_title() {
        let draft = published("Mùa lúa", "Nội dung đủ dài.", "lua");
        let mut post = Post::new(UserId::new(), &draft, String::new());
        assert!(post.slug.starts_with("mua-lua-"));

        let unchanged = post.slug.clone();
        post.apply(&draft);
        assert_eq!(post.slug, unchanged);

        post.apply(&published("Gặt hái", "Nội dung đủ dài.", "lua"));
        assert!(post.slug.starts_with("gat-hai-"));
    }
}
