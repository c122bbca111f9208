//! Follow Use Case
//!
//! Directed follow edges between users and the feed they produce.

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::UserId;
use kernel::page::{Page, PageQuery};

use crate::domain::entity::{post_card::PostCard, user_card::UserCard};
use crate::domain::repository::FollowRepository;
use crate::error::{CommunityError, CommunityResult};

pub struct FollowUseCase<F>
where
    F: FollowRepository,
{
    follows: Arc<F>,
}

impl<F> FollowUseCase<F>
where
    F: FollowRepository,
{
    pub fn new(follows: Arc<F>) -> Self {
        Self { follows }
    }

    pub async fn follow(&self, actor: AuthUser, target: UserId) -> CommunityResult<()> {
        if actor.user_id == target {
            return Err(CommunityError::SelfFollow);
        }
        self.ensure_user(target).await?;

        if !self.follows.insert_follow(&actor.user_id, &target).await? {
            return Err(CommunityError::AlreadyFollowing);
        }

        tracing::info!(follower = %actor.user_id, following = %target, "User followed");
        Ok(())
    }

    pub async fn unfollow(&self, actor: AuthUser, target: UserId) -> CommunityResult<()> {
        if !self.follows.delete_follow(&actor.user_id, &target).await? {
            return Err(CommunityError::NotFollowing);
        }

        tracing::info!(follower = %actor.user_id, following = %target, "User unfollowed");
        Ok(())
    }

    pub async fn followers(&self, user: UserId) -> CommunityResult<Vec<UserCard>> {
        self.ensure_user(user).await?;
        self.follows.followers(&user).await
    }

    pub async fn following(&self, user: UserId) -> CommunityResult<Vec<UserCard>> {
        self.ensure_user(user).await?;
        self.follows.following(&user).await
    }

    pub async fn following_ids(&self, actor: AuthUser) -> CommunityResult<Vec<UserId>> {
        self.follows.following_ids(&actor.user_id).await
    }

    /// Published posts of everyone the actor follows
    pub async fn feed(&self, actor: AuthUser, page: PageQuery) -> CommunityResult<Page<PostCard>> {
        let total = self.follows.count_followed_posts(&actor.user_id).await?;
        let items = self
            .follows
            .followed_posts(&actor.user_id, i64::from(page.limit()), page.offset())
            .await?;
        Ok(Page::new(items, total, &page))
    }

    async fn ensure_user(&self, id: UserId) -> CommunityResult<()> {
        if !self.follows.user_exists(&id).await? {
            return Err(CommunityError::UserNotFound);
        }
        Ok(())
    }
}
