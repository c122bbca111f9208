//! Comment Use Case

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entity::comment::{
    CommentTarget, CommentThread, PostComment, RemovedComments, SubComment, comment_text,
};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{ContentError, ContentResult};

/// A base comment or a reply, as stored
#[derive(Debug, Clone)]
pub enum CommentRecord {
    Base(PostComment),
    Sub(SubComment),
}

pub struct CommentUseCase<P, K>
where
    P: PostRepository,
    K: CommentRepository,
{
    posts: Arc<P>,
    comments: Arc<K>,
}

impl<P, K> CommentUseCase<P, K>
where
    P: PostRepository,
    K: CommentRepository,
{
    pub fn new(posts: Arc<P>, comments: Arc<K>) -> Self {
        Self { posts, comments }
    }

    /// With a parent the comment becomes a reply under it
    pub async fn create(
        &self,
        actor: AuthUser,
        post_id: PostId,
        text: &str,
        parent: Option<CommentId>,
    ) -> ContentResult<CommentRecord> {
        self.ensure_post(post_id).await?;
        let text = comment_text(text)?;

        let record = match parent {
            None => {
                let comment = PostComment::new(actor.user_id, post_id, text);
                self.comments.insert_comment(&comment).await?;
                CommentRecord::Base(comment)
            }
            Some(parent_id) => {
                let parent = self.load_comment(parent_id).await?;
                if parent.post_id != post_id {
                    return Err(ContentError::CommentPostMismatch);
                }
                let sub = SubComment::new(actor.user_id, &parent, text);
                self.comments.insert_sub_comment(&sub).await?;
                CommentRecord::Sub(sub)
            }
        };

        tracing::debug!(post_id = %post_id, user_id = %actor.user_id, "Comment created");
        Ok(record)
    }

    pub async fn update(
        &self,
        actor: AuthUser,
        target: CommentTarget,
        text: &str,
    ) -> ContentResult<CommentRecord> {
        let text = comment_text(text)?;

        match target {
            CommentTarget::Base(id) => {
                let mut comment = self.load_comment(id).await?;
                ensure_author_or_admin(actor, comment.user_id)?;
                comment.comment = text;
                comment.updated_at = chrono::Utc::now();
                self.comments.update_comment(&comment).await?;
                Ok(CommentRecord::Base(comment))
            }
            CommentTarget::Sub(id) => {
                let mut sub = self
                    .comments
                    .find_sub_comment(&id)
                    .await?
                    .ok_or(ContentError::CommentNotFound)?;
                ensure_author_or_admin(actor, sub.user_id)?;
                sub.comment = text;
                sub.updated_at = chrono::Utc::now();
                self.comments.update_sub_comment(&sub).await?;
                Ok(CommentRecord::Sub(sub))
            }
        }
    }

    /// A base comment takes its replies with it
    pub async fn delete(&self, actor: AuthUser, target: CommentTarget) -> ContentResult<RemovedComments> {
        let removed = match target {
            CommentTarget::Base(id) => {
                let comment = self.load_comment(id).await?;
                ensure_author_or_admin(actor, comment.user_id)?;
                self.comments.delete_comment(&id).await?
            }
            CommentTarget::Sub(id) => {
                let sub = self
                    .comments
                    .find_sub_comment(&id)
                    .await?
                    .ok_or(ContentError::CommentNotFound)?;
                ensure_author_or_admin(actor, sub.user_id)?;
                self.comments.delete_sub_comment(&id).await?
            }
        };

        if removed.total() == 0 {
            return Err(ContentError::CommentNotFound);
        }
        tracing::debug!(user_id = %actor.user_id, removed = removed.total(), "Comment deleted");
        Ok(removed)
    }

    pub async fn list(&self, post_id: PostId) -> ContentResult<Vec<CommentThread>> {
        self.ensure_post(post_id).await?;
        self.comments.list_threads(&post_id).await
    }

    async fn ensure_post(&self, id: PostId) -> ContentResult<()> {
        match self.posts.find_post(&id).await? {
            Some(_) => Ok(()),
            None => Err(ContentError::PostNotFound),
        }
    }

    async fn load_comment(&self, id: CommentId) -> ContentResult<PostComment> {
        self.comments
            .find_comment(&id)
            .await?
            .ok_or(ContentError::CommentNotFound)
    }
}

fn ensure_author_or_admin(actor: AuthUser, author: UserId) -> ContentResult<()> {
    if actor.is_admin() || actor.user_id == author {
        Ok(())
    } else {
        Err(ContentError::NotAllowed)
    }
}
