//! Favorite Use Case

use std::sync::Arc;

use auth::AuthUser;
use kernel::id::{PostId, UserId};

use crate::domain::entity::post_card::PostCard;
use crate::domain::repository::FavoriteRepository;
use crate::error::{CommunityError, CommunityResult};

pub struct FavoriteUseCase<V>
where
    V: FavoriteRepository,
{
    favorites: Arc<V>,
}

impl<V> FavoriteUseCase<V>
where
    V: FavoriteRepository,
{
    pub fn new(favorites: Arc<V>) -> Self {
        Self { favorites }
    }

    /// Only published posts can be saved
    pub async fn add(&self, actor: AuthUser, post: PostId) -> CommunityResult<()> {
        if !self.favorites.published_post_exists(&post).await? {
            return Err(CommunityError::PostNotFound);
        }
        if !self.favorites.insert_favorite(&actor.user_id, &post).await? {
            return Err(CommunityError::AlreadyFavorite);
        }

        tracing::debug!(user_id = %actor.user_id, post_id = %post, "Favorite added");
        Ok(())
    }

    pub async fn remove(&self, actor: AuthUser, post: PostId) -> CommunityResult<()> {
        if !self.favorites.delete_favorite(&actor.user_id, &post).await? {
            return Err(CommunityError::FavoriteNotFound);
        }

        tracing::debug!(user_id = %actor.user_id, post_id = %post, "Favorite removed");
        Ok(())
    }

    /// Self or admin
    pub async fn list(&self, actor: AuthUser, user: UserId) -> CommunityResult<Vec<PostCard>> {
        if actor.user_id != user && !actor.is_admin() {
            return Err(CommunityError::NotAllowed);
        }
        self.favorites.favorite_posts(&user).await
    }

    pub async fn ids(&self, actor: AuthUser) -> CommunityResult<Vec<PostId>> {
        self.favorites.favorite_post_ids(&actor.user_id).await
    }
}
