//! Two-level comment tree: base comments on a post, sub-comments on a base

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, SubCommentId, UserId};

use crate::domain::entity::view::AuthorCard;
use crate::error::{ContentError, ContentResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostComment {
    pub id: CommentId,
    pub user_id: UserId,
    pub post_id: PostId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostComment {
    pub fn new(user_id: UserId, post_id: PostId, comment: String) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            user_id,
            post_id,
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubComment {
    pub id: SubCommentId,
    pub user_id: UserId,
    pub post_comment_id: CommentId,
    /// Post of the parent; not stored on the row
    pub post_id: PostId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubComment {
    pub fn new(user_id: UserId, parent: &PostComment, comment: String) -> Self {
        let now = Utc::now();
        Self {
            id: SubCommentId::new(),
            user_id,
            post_comment_id: parent.id,
            post_id: parent.post_id,
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Either kind of comment, addressed by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTarget {
    Base(CommentId),
    Sub(SubCommentId),
}

/// Trimmed, non-blank comment text
pub fn comment_text(raw: &str) -> ContentResult<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ContentError::Validation("Comment is required".to_string()));
    }
    Ok(text.to_string())
}

/// Ids removed by a comment deletion or a report resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovedComments {
    pub comments: Vec<CommentId>,
    pub sub_comments: Vec<SubCommentId>,
}

impl RemovedComments {
    pub fn total(&self) -> usize {
        self.comments.len() + self.sub_comments.len()
    }

    pub fn extend(&mut self, other: RemovedComments) {
        self.comments.extend(other.comments);
        self.sub_comments.extend(other.sub_comments);
    }
}

#[derive(Debug, Clone)]
pub struct ReplyView {
    pub reply: SubComment,
    pub author: AuthorCard,
}

/// A base comment with its replies, oldest reply first
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub comment: PostComment,
    pub author: AuthorCard,
    pub replies: Vec<ReplyView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_text() {
        assert_eq!(comment_text("  hay quá ").unwrap(), "hay quá");
        assert!(comment_text(" \n ").is_err());
    }

    #[test]
    fn test_sub_comment_inherits_post() {
        let base = PostComment::new(UserId::new(), PostId::new(), "gốc".into());
        let sub = SubComment::new(UserId::new(), &base, "trả lời".into());
        assert_eq!(sub.post_id, base.post_id);
        assert_eq!(sub.post_comment_id, base.id);
    }
}
