//! Data Transfer Objects

use auth::UserRole;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CategoryId, ContactId, PostId, UserId, VideoId};
use kernel::page::{Page, PageQuery};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    contact::Contact,
    dashboard::{
        DailyCount, DashboardTotals, LatestUser, PostStatusCounts, RoleCount, UserStatusCounts,
    },
    post_card::PostCard,
    user_card::UserCard,
    video::Video,
};
use crate::domain::value_object::contact_status::ContactStatus;

// ============================================================================
// Queries and requests
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub post_id: PostId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    pub full_name: String,
    pub email: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactIdsRequest {
    pub ids: Vec<ContactId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoRequest {
    pub title: String,
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoIdsRequest {
    pub ids: Vec<VideoId>,
}

/// `GET /api/v1/video-youtube`
#[derive(Debug, Default, Deserialize)]
pub struct VideoListQuery {
    pub limit: Option<u32>,
    pub keyword: Option<String>,
}

/// `GET /api/v1/video-youtube/admin`
#[derive(Debug, Default, Deserialize)]
pub struct VideoPageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub keyword: Option<String>,
}

impl VideoPageQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

// ============================================================================
// Follows and favorites
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UserCardResponse {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
}

impl From<UserCard> for UserCardResponse {
    fn from(card: UserCard) -> Self {
        Self {
            id: card.id,
            username: card.username,
            name: card.name,
            avatar: card.avatar,
            bio: card.bio,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersPayload {
    pub users: Vec<UserCardResponse>,
}

impl UsersPayload {
    pub fn from_cards(cards: Vec<UserCard>) -> Self {
        Self {
            users: cards.into_iter().map(UserCardResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingIdsPayload {
    pub following_ids: Vec<UserId>,
}

#[derive(Debug, Serialize)]
pub struct CardAuthorResponse {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct CardCategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCardResponse {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub thumbnail_url: String,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub user: CardAuthorResponse,
    pub category: Option<CardCategoryResponse>,
}

impl From<PostCard> for PostCardResponse {
    fn from(card: PostCard) -> Self {
        Self {
            id: card.id,
            title: card.title,
            slug: card.slug,
            thumbnail_url: card.thumbnail_url,
            view_count: card.view_count,
            like_count: card.like_count,
            comment_count: card.comment_count,
            created_at: card.created_at,
            user: CardAuthorResponse {
                id: card.author.id,
                username: card.author.username,
                name: card.author.name,
                avatar: card.author.avatar,
            },
            category: card.category.map(|c| CardCategoryResponse {
                id: c.id,
                name: c.name,
                slug: c.slug,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostCardsPayload {
    pub posts: Vec<PostCardResponse>,
}

impl PostCardsPayload {
    pub fn from_cards(cards: Vec<PostCard>) -> Self {
        Self {
            posts: cards.into_iter().map(PostCardResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostCardPagePayload {
    pub posts: Page<PostCardResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteIdsPayload {
    pub post_ids: Vec<PostId>,
}

// ============================================================================
// Contacts
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: ContactId,
    pub full_name: String,
    pub email: String,
    pub content: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            full_name: contact.full_name,
            email: contact.email,
            content: contact.content,
            status: contact.status,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactPayload {
    pub contact: ContactResponse,
}

#[derive(Debug, Serialize)]
pub struct ContactsPayload {
    pub contacts: Vec<ContactResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedPayload {
    pub modified_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCountPayload {
    pub deleted_count: u64,
}

// ============================================================================
// Videos
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: VideoId,
    pub title: String,
    pub video_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            title: video.title,
            video_id: video.video_id.to_string(),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoPayload {
    pub video: VideoResponse,
}

#[derive(Debug, Serialize)]
pub struct VideosPayload {
    pub videos: Vec<VideoResponse>,
}

#[derive(Debug, Serialize)]
pub struct VideoPagePayload {
    pub videos: Page<VideoResponse>,
}

// ============================================================================
// Dashboard
// ============================================================================

/// Dashboard endpoints wrap their result in `data`
#[derive(Debug, Serialize)]
pub struct DataPayload<T: Serialize> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct DailyCountResponse {
    pub date: NaiveDate,
    pub count: i64,
}

impl From<DailyCount> for DailyCountResponse {
    fn from(day: DailyCount) -> Self {
        Self {
            date: day.date,
            count: day.count,
        }
    }
}

pub fn daily_series(days: Vec<DailyCount>) -> Vec<DailyCountResponse> {
    days.into_iter().map(DailyCountResponse::from).collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResponse {
    pub post_count: i64,
    pub category_post_count: i64,
    pub user_count: i64,
    pub comment_count: i64,
    pub sub_comment_count: i64,
}

impl From<DashboardTotals> for TotalsResponse {
    fn from(totals: DashboardTotals) -> Self {
        Self {
            post_count: totals.posts,
            category_post_count: totals.categories,
            user_count: totals.users,
            comment_count: totals.comments,
            sub_comment_count: totals.sub_comments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostStatusResponse {
    pub draft: i64,
    pub published: i64,
    pub blocked: i64,
}

impl From<PostStatusCounts> for PostStatusResponse {
    fn from(counts: PostStatusCounts) -> Self {
        Self {
            draft: counts.draft,
            published: counts.published,
            blocked: counts.blocked,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoleCountResponse {
    pub role: UserRole,
    pub count: i64,
}

impl From<RoleCount> for RoleCountResponse {
    fn from(count: RoleCount) -> Self {
        Self {
            role: count.role,
            count: count.count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserStatusResponse {
    pub verified: i64,
    pub unverified: i64,
    pub blocked: i64,
}

impl From<UserStatusCounts> for UserStatusResponse {
    fn from(counts: UserStatusCounts) -> Self {
        Self {
            verified: counts.verified,
            unverified: counts.unverified,
            blocked: counts.blocked,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestUserResponse {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<LatestUser> for LatestUserResponse {
    fn from(user: LatestUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            role: user.role,
            is_verified: user.is_verified,
            is_blocked: user.is_blocked,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_series_dates_render_as_plain_days() {
        let series = daily_series(vec![DailyCount {
            date: "2026-03-02".parse().unwrap(),
            count: 4,
        }]);
        let json = serde_json::to_value(DataPayload { data: series }).unwrap();
        assert_eq!(json["data"][0]["date"], "2026-03-02");
        assert_eq!(json["data"][0]["count"], 4);
    }

    #[test]
    fn test_totals_use_client_field_names() {
        let json = serde_json::to_value(TotalsResponse::from(DashboardTotals {
            posts: 1,
            categories: 2,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(json["postCount"], 1);
        assert_eq!(json["categoryPostCount"], 2);
        assert_eq!(json["subCommentCount"], 0);
    }
}
