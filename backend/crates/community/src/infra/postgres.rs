//! PostgreSQL Repository Implementations

use auth::UserRole;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CategoryId, ContactId, PostId, UserId, VideoId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    contact::Contact,
    dashboard::{
        DailyCount, DashboardTotals, LatestUser, PostStatusCounts, RoleCount, UserStatusCounts,
    },
    post_card::{CardAuthor, CardCategory, PostCard},
    user_card::UserCard,
    video::Video,
};
use crate::domain::repository::{
    ContactRepository, DashboardRepository, FavoriteRepository, FollowRepository,
    VideoRepository,
};
use crate::domain::value_object::{contact_status::ContactStatus, youtube_id::YoutubeId};
use crate::error::{CommunityError, CommunityResult};

/// PostgreSQL-backed community repository
#[derive(Clone)]
pub struct PgCommunityRepository {
    pool: PgPool,
}

impl PgCommunityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_POST_CARD: &str = r#"
    SELECT
        p.id,
        p.title,
        p.slug,
        p.thumbnail_url,
        p.view_count,
        p.like_count,
        p.comment_count,
        p.created_at,
        u.id AS author_id,
        u.username AS author_username,
        u.name AS author_name,
        u.avatar AS author_avatar,
        c.id AS category_id,
        c.name AS category_name,
        c.slug AS category_slug
    FROM posts p
    JOIN users u ON u.id = p.user_id
    LEFT JOIN categories c ON c.id = p.category_id
"#;

const SELECT_VIDEO: &str = r#"
    SELECT id, title, video_id, created_at, updated_at
    FROM video_youtubes
"#;

/// Escape LIKE wildcards in user search input
fn like_literal(search: &str) -> String {
    search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn uuids<T>(ids: &[kernel::id::Id<T>]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

// ============================================================================
// Follow Repository Implementation
// ============================================================================

impl FollowRepository for PgCommunityRepository {
    async fn user_exists(&self, id: &UserId) -> CommunityResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_follow(&self, follower: &UserId, following: &UserId) -> CommunityResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, following_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(follower.as_uuid())
        .bind(following.as_uuid())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_follow(&self, follower: &UserId, following: &UserId) -> CommunityResult<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
            .bind(follower.as_uuid())
            .bind(following.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn followers(&self, id: &UserId) -> CommunityResult<Vec<UserCard>> {
        let rows = sqlx::query_as::<_, UserCardRow>(
            r#"
            SELECT u.id, u.username, u.name, u.avatar, u.bio
            FROM follows f
            JOIN users u ON u.id = f.follower_id
            WHERE f.following_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(UserCardRow::into_card).collect())
    }

    async fn following(&self, id: &UserId) -> CommunityResult<Vec<UserCard>> {
        let rows = sqlx::query_as::<_, UserCardRow>(
            r#"
            SELECT u.id, u.username, u.name, u.avatar, u.bio
            FROM follows f
            JOIN users u ON u.id = f.following_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(UserCardRow::into_card).collect())
    }

    async fn following_ids(&self, id: &UserId) -> CommunityResult<Vec<UserId>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT following_id FROM follows WHERE follower_id = $1 ORDER BY created_at DESC",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().map(UserId::from_uuid).collect())
    }

    async fn followed_posts(
        &self,
        follower: &UserId,
        limit: i64,
        offset: i64,
    ) -> CommunityResult<Vec<PostCard>> {
        let sql = format!(
            r#"{SELECT_POST_CARD}
            JOIN follows f ON f.following_id = p.user_id
            WHERE f.follower_id = $1 AND p.status = 'published'
            ORDER BY p.created_at DESC
            LIMIT $2 OFFSET $3"#
        );
        let rows = sqlx::query_as::<_, PostCardRow>(&sql)
            .bind(follower.as_uuid())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(PostCardRow::into_card).collect())
    }

    async fn count_followed_posts(&self, follower: &UserId) -> CommunityResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts p
            JOIN follows f ON f.following_id = p.user_id
            WHERE f.follower_id = $1 AND p.status = 'published'
            "#,
        )
        .bind(follower.as_uuid())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

// ============================================================================
// Favorite Repository Implementation
// ============================================================================

impl FavoriteRepository for PgCommunityRepository {
    async fn published_post_exists(&self, id: &PostId) -> CommunityResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1 AND status = 'published')",
        )
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert_favorite(&self, user: &UserId, post: &PostId) -> CommunityResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorite_posts (user_id, post_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user.as_uuid())
        .bind(post.as_uuid())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_favorite(&self, user: &UserId, post: &PostId) -> CommunityResult<bool> {
        let result = sqlx::query("DELETE FROM favorite_posts WHERE user_id = $1 AND post_id = $2")
            .bind(user.as_uuid())
            .bind(post.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn favorite_posts(&self, user: &UserId) -> CommunityResult<Vec<PostCard>> {
        let sql = format!(
            r#"{SELECT_POST_CARD}
            JOIN favorite_posts fav ON fav.post_id = p.id
            WHERE fav.user_id = $1 AND p.status = 'published'
            ORDER BY fav.created_at DESC"#
        );
        let rows = sqlx::query_as::<_, PostCardRow>(&sql)
            .bind(user.as_uuid())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(PostCardRow::into_card).collect())
    }

    async fn favorite_post_ids(&self, user: &UserId) -> CommunityResult<Vec<PostId>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT post_id FROM favorite_posts WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().map(PostId::from_uuid).collect())
    }
}

// ============================================================================
// Contact Repository Implementation
// ============================================================================

impl ContactRepository for PgCommunityRepository {
    async fn insert_contact(&self, contact: &Contact) -> CommunityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contacts (id, full_name, email, content, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(contact.id.as_uuid())
        .bind(&contact.full_name)
        .bind(&contact.email)
        .bind(&contact.content)
        .bind(contact.status.code())
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_contacts(&self) -> CommunityResult<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, full_name, email, content, status, created_at, updated_at
            FROM contacts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ContactRow::into_contact).collect())
    }

    async fn resolve_contacts(&self, ids: &[ContactId]) -> CommunityResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET status = 'resolved', updated_at = now()
            WHERE id = ANY($1) AND status = 'pending'
            "#,
        )
        .bind(uuids(ids))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_contacts(&self, ids: &[ContactId]) -> CommunityResult<u64> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ANY($1)")
            .bind(uuids(ids))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// Video Repository Implementation
// ============================================================================

impl VideoRepository for PgCommunityRepository {
    async fn insert_video(&self, video: &Video) -> CommunityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO video_youtubes (id, title, video_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(video.id.as_uuid())
        .bind(&video.title)
        .bind(video.video_id.as_str())
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_video(&self, video: &Video) -> CommunityResult<()> {
        sqlx::query(
            r#"
            UPDATE video_youtubes
            SET title = $2, video_id = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(video.id.as_uuid())
        .bind(&video.title)
        .bind(video.video_id.as_str())
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_video(&self, id: &VideoId) -> CommunityResult<Option<Video>> {
        let row = sqlx::query_as::<_, VideoRow>(&format!("{SELECT_VIDEO} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(VideoRow::into_video))
    }

    async fn list_videos(
        &self,
        keyword: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> CommunityResult<Vec<Video>> {
        let sql = format!(
            r#"{SELECT_VIDEO}
            WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%')
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3"#
        );
        let rows = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(keyword.map(like_literal))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(VideoRow::into_video).collect())
    }

    async fn count_videos(&self, keyword: Option<&str>) -> CommunityResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM video_youtubes
            WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(keyword.map(like_literal))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn delete_videos(&self, ids: &[VideoId]) -> CommunityResult<u64> {
        let result = sqlx::query("DELETE FROM video_youtubes WHERE id = ANY($1)")
            .bind(uuids(ids))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// Dashboard Repository Implementation
// ============================================================================

impl PgCommunityRepository {
    async fn per_day(&self, table: &str, since: DateTime<Utc>) -> CommunityResult<Vec<DailyCount>> {
        let sql = format!(
            r#"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS count
            FROM {table}
            WHERE created_at >= $1
            GROUP BY day
            "#
        );
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(&sql)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect())
    }
}

impl DashboardRepository for PgCommunityRepository {
    async fn posts_per_day(&self, since: DateTime<Utc>) -> CommunityResult<Vec<DailyCount>> {
        self.per_day("posts", since).await
    }

    async fn users_per_day(&self, since: DateTime<Utc>) -> CommunityResult<Vec<DailyCount>> {
        self.per_day("users", since).await
    }

    async fn totals(&self) -> CommunityResult<DashboardTotals> {
        let row = sqlx::query_as::<_, TotalsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM posts) AS posts,
                (SELECT COUNT(*) FROM categories) AS categories,
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM post_comments) AS comments,
                (SELECT COUNT(*) FROM sub_post_comments) AS sub_comments
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardTotals {
            posts: row.posts,
            categories: row.categories,
            users: row.users,
            comments: row.comments,
            sub_comments: row.sub_comments,
        })
    }

    async fn latest_users(&self, limit: i64) -> CommunityResult<Vec<LatestUser>> {
        let rows = sqlx::query_as::<_, LatestUserRow>(
            r#"
            SELECT
                u.id,
                u.username,
                u.name,
                u.email,
                u.avatar,
                r.name AS role,
                u.is_verified,
                u.is_blocked,
                u.created_at
            FROM users u
            JOIN roles r ON r.id = u.role_id
            ORDER BY u.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(LatestUserRow::into_user).collect()
    }

    async fn post_counts_by_status(&self) -> CommunityResult<PostStatusCounts> {
        let (draft, published, blocked): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'draft'),
                COUNT(*) FILTER (WHERE status = 'published'),
                COUNT(*) FILTER (WHERE status = 'blocked')
            FROM posts
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PostStatusCounts {
            draft,
            published,
            blocked,
        })
    }

    async fn user_counts_by_role(&self) -> CommunityResult<Vec<RoleCount>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT r.name, COUNT(u.id)
            FROM roles r
            LEFT JOIN users u ON u.role_id = r.id
            GROUP BY r.name
            ORDER BY r.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(name, count)| Ok(RoleCount { role: role(&name)?, count }))
            .collect()
    }

    async fn user_counts_by_status(&self) -> CommunityResult<UserStatusCounts> {
        let (verified, unverified, blocked): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE is_verified AND NOT is_blocked),
                COUNT(*) FILTER (WHERE NOT is_verified AND NOT is_blocked),
                COUNT(*) FILTER (WHERE is_blocked)
            FROM users
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(UserStatusCounts {
            verified,
            unverified,
            blocked,
        })
    }
}

fn role(name: &str) -> CommunityResult<UserRole> {
    UserRole::from_code(name)
        .map_err(|e| CommunityError::Internal(format!("Invalid role in database: {e}")))
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserCardRow {
    id: Uuid,
    username: String,
    name: String,
    avatar: String,
    bio: String,
}

impl UserCardRow {
    fn into_card(self) -> UserCard {
        UserCard {
            id: UserId::from_uuid(self.id),
            username: self.username,
            name: self.name,
            avatar: self.avatar,
            bio: self.bio,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostCardRow {
    id: Uuid,
    title: String,
    slug: String,
    thumbnail_url: String,
    view_count: i64,
    like_count: i64,
    comment_count: i64,
    created_at: DateTime<Utc>,
    author_id: Uuid,
    author_username: String,
    author_name: String,
    author_avatar: String,
    category_id: Option<Uuid>,
    category_name: Option<String>,
    category_slug: Option<String>,
}

impl PostCardRow {
    fn into_card(self) -> PostCard {
        let category = match (self.category_id, self.category_name, self.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(CardCategory {
                id: CategoryId::from_uuid(id),
                name,
                slug,
            }),
            _ => None,
        };

        PostCard {
            id: PostId::from_uuid(self.id),
            title: self.title,
            slug: self.slug,
            thumbnail_url: self.thumbnail_url,
            view_count: self.view_count,
            like_count: self.like_count,
            comment_count: self.comment_count,
            created_at: self.created_at,
            author: CardAuthor {
                id: UserId::from_uuid(self.author_id),
                username: self.author_username,
                name: self.author_name,
                avatar: self.author_avatar,
            },
            category,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    full_name: String,
    email: String,
    content: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_contact(self) -> Contact {
        Contact {
            id: ContactId::from_uuid(self.id),
            full_name: self.full_name,
            email: self.email,
            content: self.content,
            status: ContactStatus::from_code(&self.status),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VideoRow {
    id: Uuid,
    title: String,
    video_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VideoRow {
    fn into_video(self) -> Video {
        Video {
            id: VideoId::from_uuid(self.id),
            title: self.title,
            video_id: YoutubeId::from_db(self.video_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    posts: i64,
    categories: i64,
    users: i64,
    comments: i64,
    sub_comments: i64,
}

#[derive(sqlx::FromRow)]
struct LatestUserRow {
    id: Uuid,
    username: String,
    name: String,
    email: String,
    avatar: String,
    role: String,
    is_verified: bool,
    is_blocked: bool,
    created_at: DateTime<Utc>,
}

impl LatestUserRow {
    fn into_user(self) -> CommunityResult<LatestUser> {
        Ok(LatestUser {
            id: UserId::from_uuid(self.id),
            role: role(&self.role)?,
            username: self.username,
            name: self.name,
            email: self.email,
            avatar: self.avatar,
            is_verified: self.is_verified,
            is_blocked: self.is_blocked,
            created_at: self.created_at,
        })
    }
}
