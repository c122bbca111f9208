//! Repository Traits

use chrono::{DateTime, Utc};
use kernel::id::{ContactId, PostId, UserId, VideoId};

use crate::domain::entity::{
    contact::Contact,
    dashboard::{DailyCount, DashboardTotals, LatestUser, PostStatusCounts, RoleCount, UserStatusCounts},
    post_card::PostCard,
    user_card::UserCard,
    video::Video,
};
use crate::error::CommunityResult;

#[trait_variant::make(FollowRepository: Send)]
pub trait LocalFollowRepository {
    async fn user_exists(&self, id: &UserId) -> CommunityResult<bool>;

    /// Returns false if the edge already existed
    async fn insert_follow(&self, follower: &UserId, following: &UserId) -> CommunityResult<bool>;

    /// Returns false if there was no edge
    async fn delete_follow(&self, follower: &UserId, following: &UserId) -> CommunityResult<bool>;

    /// Users following `id`, most recent first
    async fn followers(&self, id: &UserId) -> CommunityResult<Vec<UserCard>>;

    /// Users `id` follows, most recent first
    async fn following(&self, id: &UserId) -> CommunityResult<Vec<UserCard>>;

    async fn following_ids(&self, id: &UserId) -> CommunityResult<Vec<UserId>>;

    /// Published posts by the authors `follower` follows, newest first
    async fn followed_posts(
        &self,
        follower: &UserId,
        limit: i64,
        offset: i64,
    ) -> CommunityResult<Vec<PostCard>>;

    async fn count_followed_posts(&self, follower: &UserId) -> CommunityResult<i64>;
}

#[trait_variant::make(FavoriteRepository: Send)]
pub trait LocalFavoriteRepository {
    async fn published_post_exists(&self, id: &PostId) -> CommunityResult<bool>;

    /// Returns false if the post was already a favorite
    async fn insert_favorite(&self, user: &UserId, post: &PostId) -> CommunityResult<bool>;

    async fn delete_favorite(&self, user: &UserId, post: &PostId) -> CommunityResult<bool>;

    /// Published favorites, most recently added first
    async fn favorite_posts(&self, user: &UserId) -> CommunityResult<Vec<PostCard>>;

    async fn favorite_post_ids(&self, user: &UserId) -> CommunityResult<Vec<PostId>>;
}

#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    async fn insert_contact(&self, contact: &Contact) -> CommunityResult<()>;

    /// Newest first
    async fn list_contacts(&self) -> CommunityResult<Vec<Contact>>;

    /// Pending contacts among `ids` become resolved; returns how many changed
    async fn resolve_contacts(&self, ids: &[ContactId]) -> CommunityResult<u64>;

    async fn delete_contacts(&self, ids: &[ContactId]) -> CommunityResult<u64>;
}

#[trait_variant::make(VideoRepository: Send)]
pub trait LocalVideoRepository {
    async fn insert_video(&self, video: &Video) -> CommunityResult<()>;

    async fn update_video(&self, video: &Video) -> CommunityResult<()>;

    async fn find_video(&self, id: &VideoId) -> CommunityResult<Option<Video>>;

    /// Newest first; `keyword` matches titles case-insensitively
    async fn list_videos(
        &self,
        keyword: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> CommunityResult<Vec<Video>>;

    async fn count_videos(&self, keyword: Option<&str>) -> CommunityResult<i64>;

    async fn delete_videos(&self, ids: &[VideoId]) -> CommunityResult<u64>;
}

#[trait_variant::make(DashboardRepository: Send)]
pub trait LocalDashboardRepository {
    /// Posts created since `since`, grouped by UTC day; empty days are absent
    async fn posts_per_day(&self, since: DateTime<Utc>) -> CommunityResult<Vec<DailyCount>>;

    /// Users created since `since`, grouped by UTC day; empty days are absent
    async fn users_per_day(&self, since: DateTime<Utc>) -> CommunityResult<Vec<DailyCount>>;

    async fn totals(&self) -> CommunityResult<DashboardTotals>;

    async fn latest_users(&self, limit: i64) -> CommunityResult<Vec<LatestUser>>;

    async fn post_counts_by_status(&self) -> CommunityResult<PostStatusCounts>;

    /// One entry per registered role, zero included
    async fn user_counts_by_role(&self) -> CommunityResult<Vec<RoleCount>>;

    async fn user_counts_by_status(&self) -> CommunityResult<UserStatusCounts>;
}

/// Every community repository behind one handle
pub trait CommunityStore:
    FollowRepository
    + FavoriteRepository
    + ContactRepository
    + VideoRepository
    + DashboardRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> CommunityStore for T where
    T: FollowRepository
        + FavoriteRepository
        + ContactRepository
        + VideoRepository
        + DashboardRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
