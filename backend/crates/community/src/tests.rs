//! Use-case and router tests over an in-memory store

use std::sync::{Arc, Mutex};

use auth::{AuthConfig, AuthUser, TokenIssuer, UserRole};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Duration, Utc};
use kernel::id::{ContactId, PostId, UserId, VideoId};
use kernel::page::PageQuery;
use tower::ServiceExt;

use crate::application::{
    CommunityConfig, ContactUseCase, DashboardUseCase, FavoriteUseCase, FollowUseCase,
    VideoUseCase,
};
use crate::domain::entity::{
    contact::Contact,
    dashboard::{
        DailyCount, DashboardTotals, LatestUser, PostStatusCounts, RoleCount, UserStatusCounts,
    },
    post_card::{CardAuthor, PostCard},
    user_card::UserCard,
    video::Video,
};
use crate::domain::repository::{
    ContactRepository, DashboardRepository, FavoriteRepository, FollowRepository,
    VideoRepository,
};
use crate::domain::value_object::contact_status::ContactStatus;
use crate::error::{CommunityError, CommunityResult};
use crate::presentation::handlers::CommunityAppState;
use crate::presentation::router::{community_routes, users_routes};

// ============================================================================
// In-memory store
// ============================================================================

struct StoredUser {
    card: UserCard,
    role: UserRole,
    verified: bool,
    blocked: bool,
    created_at: DateTime<Utc>,
}

struct StoredPost {
    card: PostCard,
    published: bool,
}

#[derive(Default)]
struct State {
    users: Vec<StoredUser>,
    posts: Vec<StoredPost>,
    /// (follower, following), insertion order
    follows: Vec<(UserId, UserId)>,
    favorites: Vec<(UserId, PostId)>,
    contacts: Vec<Contact>,
    videos: Vec<Video>,
}

impl State {
    fn card(&self, id: UserId) -> Option<UserCard> {
        self.users.iter().find(|u| u.card.id == id).map(|u| u.card.clone())
    }

    fn published(&self, id: PostId) -> Option<&PostCard> {
        self.posts
            .iter()
            .find(|p| p.card.id == id && p.published)
            .map(|p| &p.card)
    }

    fn followed_cards(&self, follower: UserId) -> Vec<PostCard> {
        let authors: Vec<UserId> = self
            .follows
            .iter()
            .filter(|(f, _)| *f == follower)
            .map(|(_, t)| *t)
            .collect();
        let mut cards: Vec<PostCard> = self
            .posts
            .iter()
            .filter(|p| p.published && authors.contains(&p.card.author.id))
            .map(|p| p.card.clone())
            .collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        cards
    }

    fn per_day(dates: impl Iterator<Item = DateTime<Utc>>, since: DateTime<Utc>) -> Vec<DailyCount> {
        let mut counts: Vec<DailyCount> = Vec::new();
        for at in dates.filter(|at| *at >= since) {
            let date = at.date_naive();
            match counts.iter_mut().find(|c| c.date == date) {
                Some(day) => day.count += 1,
                None => counts.push(DailyCount { date, count: 1 }),
            }
        }
        counts
    }
}

#[derive(Clone, Default)]
struct MemoryCommunity {
    state: Arc<Mutex<State>>,
}

impl MemoryCommunity {
    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }
}

impl FollowRepository for MemoryCommunity {
    async fn user_exists(&self, id: &UserId) -> CommunityResult<bool> {
        Ok(self.with(|s| s.card(*id).is_some()))
    }

    async fn insert_follow(&self, follower: &UserId, following: &UserId) -> CommunityResult<bool> {
        Ok(self.with(|s| {
            let edge = (*follower, *following);
            if s.follows.contains(&edge) {
                return false;
            }
            s.follows.push(edge);
            true
        }))
    }

    async fn delete_follow(&self, follower: &UserId, following: &UserId) -> CommunityResult<bool> {
        Ok(self.with(|s| {
            let before = s.follows.len();
            s.follows.retain(|edge| *edge != (*follower, *following));
            s.follows.len() < before
        }))
    }

    async fn followers(&self, id: &UserId) -> CommunityResult<Vec<UserCard>> {
        Ok(self.with(|s| {
            s.follows
                .iter()
                .rev()
                .filter(|(_, t)| t == id)
                .filter_map(|(f, _)| s.card(*f))
                .collect()
        }))
    }

    async fn following(&self, id: &UserId) -> CommunityResult<Vec<UserCard>> {
        Ok(self.with(|s| {
            s.follows
                .iter()
                .rev()
                .filter(|(f, _)| f == id)
                .filter_map(|(_, t)| s.card(*t))
                .collect()
        }))
    }

    async fn following_ids(&self, id: &UserId) -> CommunityResult<Vec<UserId>> {
        Ok(self.with(|s| {
            s.follows
                .iter()
                .rev()
                .filter(|(f, _)| f == id)
                .map(|(_, t)| *t)
                .collect()
        }))
    }

    async fn followed_posts(
        &self,
        follower: &UserId,
        limit: i64,
        offset: i64,
    ) -> CommunityResult<Vec<PostCard>> {
        Ok(self.with(|s| {
            s.followed_cards(*follower)
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect()
        }))
    }

    async fn count_followed_posts(&self, follower: &UserId) -> CommunityResult<i64> {
        Ok(self.with(|s| s.followed_cards(*follower).len() as i64))
    }
}

impl FavoriteRepository for MemoryCommunity {
    async fn published_post_exists(&self, id: &PostId) -> CommunityResult<bool> {
        Ok(self.with(|s| s.published(*id).is_some()))
    }

    async fn insert_favorite(&self, user: &UserId, post: &PostId) -> CommunityResult<bool> {
        Ok(self.with(|s| {
            let row = (*user, *post);
            if s.favorites.contains(&row) {
                return false;
            }
            s.favorites.push(row);
            true
        }))
    }

    async fn delete_favorite(&self, user: &UserId, post: &PostId) -> CommunityResult<bool> {
        Ok(self.with(|s| {
            let before = s.favorites.len();
            s.favorites.retain(|row| *row != (*user, *post));
            s.favorites.len() < before
        }))
    }

    async fn favorite_posts(&self, user: &UserId) -> CommunityResult<Vec<PostCard>> {
        Ok(self.with(|s| {
            s.favorites
                .iter()
                .rev()
                .filter(|(u, _)| u == user)
                .filter_map(|(_, p)| s.published(*p).cloned())
                .collect()
        }))
    }

    async fn favorite_post_ids(&self, user: &UserId) -> CommunityResult<Vec<PostId>> {
        Ok(self.with(|s| {
            s.favorites
                .iter()
                .rev()
                .filter(|(u, _)| u == user)
                .map(|(_, p)| *p)
                .collect()
        }))
    }
}

impl ContactRepository for MemoryCommunity {
    async fn insert_contact(&self, contact: &Contact) -> CommunityResult<()> {
        self.with(|s| s.contacts.push(contact.clone()));
        Ok(())
    }

    async fn list_contacts(&self) -> CommunityResult<Vec<Contact>> {
        Ok(self.with(|s| s.contacts.iter().rev().cloned().collect()))
    }

    async fn resolve_contacts(&self, ids: &[ContactId]) -> CommunityResult<u64> {
        Ok(self.with(|s| {
            let mut changed = 0;
            for contact in s.contacts.iter_mut() {
                if ids.contains(&contact.id) && contact.status == ContactStatus::Pending {
                    contact.status = ContactStatus::Resolved;
                    changed += 1;
                }
            }
            changed
        }))
    }

    async fn delete_contacts(&self, ids: &[ContactId]) -> CommunityResult<u64> {
        Ok(self.with(|s| {
            let before = s.contacts.len();
            s.contacts.retain(|c| !ids.contains(&c.id));
            (before - s.contacts.len()) as u64
        }))
    }
}

impl VideoRepository for MemoryCommunity {
    async fn insert_video(&self, video: &Video) -> CommunityResult<()> {
        self.with(|s| s.videos.push(video.clone()));
        Ok(())
    }

    async fn update_video(&self, video: &Video) -> CommunityResult<()> {
        self.with(|s| {
            if let Some(existing) = s.videos.iter_mut().find(|v| v.id == video.id) {
                *existing = video.clone();
            }
        });
        Ok(())
    }

    async fn find_video(&self, id: &VideoId) -> CommunityResult<Option<Video>> {
        Ok(self.with(|s| s.videos.iter().find(|v| v.id == *id).cloned()))
    }

    async fn list_videos(
        &self,
        keyword: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> CommunityResult<Vec<Video>> {
        Ok(self.with(|s| {
            s.videos
                .iter()
                .rev()
                .filter(|v| matches_keyword(v, keyword))
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect()
        }))
    }

    async fn count_videos(&self, keyword: Option<&str>) -> CommunityResult<i64> {
        Ok(self.with(|s| s.videos.iter().filter(|v| matches_keyword(v, keyword)).count() as i64))
    }

    async fn delete_videos(&self, ids: &[VideoId]) -> CommunityResult<u64> {
        Ok(self.with(|s| {
            let before = s.videos.len();
            s.videos.retain(|v| !ids.contains(&v.id));
            (before - s.videos.len()) as u64
        }))
    }
}

fn matches_keyword(video: &Video, keyword: Option<&str>) -> bool {
    keyword.is_none_or(|k| video.title.to_lowercase().contains(&k.to_lowercase()))
}

impl DashboardRepository for MemoryCommunity {
    async fn posts_per_day(&self, since: DateTime<Utc>) -> CommunityResult<Vec<DailyCount>> {
        Ok(self.with(|s| State::per_day(s.posts.iter().map(|p| p.card.created_at), since)))
    }

    async fn users_per_day(&self, since: DateTime<Utc>) -> CommunityResult<Vec<DailyCount>> {
        Ok(self.with(|s| State::per_day(s.users.iter().map(|u| u.created_at), since)))
    }

    async fn totals(&self) -> CommunityResult<DashboardTotals> {
        Ok(self.with(|s| DashboardTotals {
            posts: s.posts.len() as i64,
            users: s.users.len() as i64,
            ..Default::default()
        }))
    }

    async fn latest_users(&self, limit: i64) -> CommunityResult<Vec<LatestUser>> {
        Ok(self.with(|s| {
            let mut users: Vec<&StoredUser> = s.users.iter().collect();
            users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            users
                .into_iter()
                .take(limit as usize)
                .map(|u| LatestUser {
                    id: u.card.id,
                    username: u.card.username.clone(),
                    name: u.card.name.clone(),
                    email: format!("{}@example.com", u.card.username),
                    avatar: u.card.avatar.clone(),
                    role: u.role,
                    is_verified: u.verified,
                    is_blocked: u.blocked,
                    created_at: u.created_at,
                })
                .collect()
        }))
    }

    async fn post_counts_by_status(&self) -> CommunityResult<PostStatusCounts> {
        Ok(self.with(|s| {
            let published = s.posts.iter().filter(|p| p.published).count() as i64;
            PostStatusCounts {
                draft: s.posts.len() as i64 - published,
                published,
                blocked: 0,
            }
        }))
    }

    async fn user_counts_by_role(&self) -> CommunityResult<Vec<RoleCount>> {
        Ok(self.with(|s| {
            UserRole::ALL
                .iter()
                .map(|role| RoleCount {
                    role: *role,
                    count: s.users.iter().filter(|u| u.role == *role).count() as i64,
                })
                .collect()
        }))
    }

    async fn user_counts_by_status(&self) -> CommunityResult<UserStatusCounts> {
        Ok(self.with(|s| UserStatusCounts {
            verified: s.users.iter().filter(|u| u.verified && !u.blocked).count() as i64,
            unverified: s.users.iter().filter(|u| !u.verified && !u.blocked).count() as i64,
            blocked: s.users.iter().filter(|u| u.blocked).count() as i64,
        }))
    }
}

// ============================================================================
// Fixture
// ============================================================================

struct Fixture {
    store: Arc<MemoryCommunity>,
    config: Arc<CommunityConfig>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            store: Arc::new(MemoryCommunity::default()),
            config: Arc::new(CommunityConfig::default()),
        }
    }

    fn follows(&self) -> FollowUseCase<MemoryCommunity> {
        FollowUseCase::new(self.store.clone())
    }

    fn favorites(&self) -> FavoriteUseCase<MemoryCommunity> {
        FavoriteUseCase::new(self.store.clone())
    }

    fn contacts(&self) -> ContactUseCase<MemoryCommunity> {
        ContactUseCase::new(self.store.clone())
    }

    fn videos(&self) -> VideoUseCase<MemoryCommunity> {
        VideoUseCase::new(self.store.clone(), self.config.clone())
    }

    fn dashboard(&self) -> DashboardUseCase<MemoryCommunity> {
        DashboardUseCase::new(self.store.clone(), self.config.clone())
    }

    fn user_at(&self, username: &str, role: UserRole, created_at: DateTime<Utc>) -> AuthUser {
        let id = UserId::new();
        self.store.with(|s| {
            s.users.push(StoredUser {
                card: UserCard {
                    id,
                    username: username.to_string(),
                    name: username.to_uppercase(),
                    avatar: String::new(),
                    bio: "Ẩn danh".to_string(),
                },
                role,
                verified: true,
                blocked: false,
                created_at,
            })
        });
        AuthUser { user_id: id, role }
    }

    fn user(&self, username: &str, role: UserRole) -> AuthUser {
        self.user_at(username, role, Utc::now())
    }

    fn post(&self, author: AuthUser, title: &str, published: bool, created_at: DateTime<Utc>) -> PostId {
        let id = PostId::new();
        self.store.with(|s| {
            let card = s.card(author.user_id).unwrap();
            s.posts.push(StoredPost {
                card: PostCard {
                    id,
                    title: title.to_string(),
                    slug: title.to_lowercase().replace(' ', "-"),
                    thumbnail_url: String::new(),
                    view_count: 0,
                    like_count: 0,
                    comment_count: 0,
                    created_at,
                    author: CardAuthor {
                        id: card.id,
                        username: card.username,
                        name: card.name,
                        avatar: card.avatar,
                    },
                    category: None,
                },
                published,
            })
        });
        id
    }
}

// ============================================================================
// Follows
// ============================================================================

#[tokio::test]
async fn test_follow_rules() {
    let fx = Fixture::new();
    let anh = fx.user("anh", UserRole::User);
    let binh = fx.user("binh", UserRole::User);

    let own = fx.follows().follow(anh, anh.user_id).await;
    assert!(matches!(own, Err(CommunityError::SelfFollow)));

    let ghost = fx.follows().follow(anh, UserId::new()).await;
    assert!(matches!(ghost, Err(CommunityError::UserNotFound)));

    fx.follows().follow(anh, binh.user_id).await.unwrap();
    let twice = fx.follows().follow(anh, binh.user_id).await;
    assert!(matches!(twice, Err(CommunityError::AlreadyFollowing)));

    let followers = fx.follows().followers(binh.user_id).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].username, "anh");
    assert_eq!(
        fx.follows().following_ids(anh).await.unwrap(),
        vec![binh.user_id]
    );

    fx.follows().unfollow(anh, binh.user_id).await.unwrap();
    let again = fx.follows().unfollow(anh, binh.user_id).await;
    assert!(matches!(again, Err(CommunityError::NotFollowing)));
    assert!(fx.follows().following(anh.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_feed_shows_published_posts_of_followed_authors() {
    let fx = Fixture::new();
    let reader = fx.user("anh", UserRole::User);
    let followed = fx.user("binh", UserRole::User);
    let stranger = fx.user("chi", UserRole::User);
    let now = Utc::now();

    let older = fx.post(followed, "Bai cu", true, now - Duration::hours(2));
    let newer = fx.post(followed, "Bai moi", true, now);
    fx.post(followed, "Nhap", false, now);
    fx.post(stranger, "Khac", true, now);

    fx.follows().follow(reader, followed.user_id).await.unwrap();

    let page = fx
        .follows()
        .feed(reader, PageQuery::new(1, 10))
        .await
        .unwrap();
    let ids: Vec<PostId> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer, older]);
    assert_eq!(page.total, 2);

    let second = fx.follows().feed(reader, PageQuery::new(2, 1)).await.unwrap();
    assert_eq!(second.items[0].id, older);
    assert_eq!(second.total_pages, 2);
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn test_favorites() {
    let fx = Fixture::new();
    let author = fx.user("anh", UserRole::User);
    let reader = fx.user("binh", UserRole::User);
    let admin = fx.user("boss", UserRole::Admin);
    let post = fx.post(author, "Bai viet", true, Utc::now());
    let draft = fx.post(author, "Nhap", false, Utc::now());

    let missing = fx.favorites().add(reader, PostId::new()).await;
    assert!(matches!(missing, Err(CommunityError::PostNotFound)));
    let unpublished = fx.favorites().add(reader, draft).await;
    assert!(matches!(unpublished, Err(CommunityError::PostNotFound)));

    fx.favorites().add(reader, post).await.unwrap();
    let twice = fx.favorites().add(reader, post).await;
    assert!(matches!(twice, Err(CommunityError::AlreadyFavorite)));

    assert_eq!(fx.favorites().ids(reader).await.unwrap(), vec![post]);
    let listed = fx.favorites().list(admin, reader.user_id).await.unwrap();
    assert_eq!(listed[0].id, post);

    let snooping = fx.favorites().list(author, reader.user_id).await;
    assert!(matches!(snooping, Err(CommunityError::NotAllowed)));

    fx.favorites().remove(reader, post).await.unwrap();
    let gone = fx.favorites().remove(reader, post).await;
    assert!(matches!(gone, Err(CommunityError::FavoriteNotFound)));
}

// ============================================================================
// Contacts
// ============================================================================

#[tokio::test]
async fn test_contact_submission_and_moderation() {
    let fx = Fixture::new();

    let bad = fx.contacts().submit("An", "an@@example", "Xin chào").await;
    assert!(matches!(&bad, Err(CommunityError::Validation(m)) if m == "Invalid email"));

    let first = fx
        .contacts()
        .submit("An", "an@example.com", "Xin chào")
        .await
        .unwrap();
    assert_eq!(first.status, ContactStatus::Pending);
    let second = fx
        .contacts()
        .submit("Bình", "binh@example.com", "Góp ý")
        .await
        .unwrap();

    let listed = fx.contacts().list().await.unwrap();
    assert_eq!(listed[0].id, second.id);

    assert_eq!(fx.contacts().resolve(&[first.id]).await.unwrap(), 1);
    assert_eq!(fx.contacts().resolve(&[first.id, second.id]).await.unwrap(), 1);

    assert_eq!(
        fx.contacts()
            .delete(&[first.id, ContactId::new()])
            .await
            .unwrap(),
        1
    );
    assert_eq!(fx.contacts().list().await.unwrap().len(), 1);
}

// ============================================================================
// Videos
// ============================================================================

#[tokio::test]
async fn test_video_catalog() {
    let fx = Fixture::new();

    let blank = fx.videos().create("  ", "abc").await;
    assert!(matches!(blank, Err(CommunityError::Validation(_))));

    let rust = fx
        .videos()
        .create("Học Rust", "https://www.youtube.com/watch?v=rust123")
        .await
        .unwrap();
    assert_eq!(rust.video_id.as_str(), "rust123");
    let go = fx.videos().create("Học Go", "go456").await.unwrap();

    let latest = fx.videos().latest(None, Some(1)).await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].id, go.id);

    let found = fx.videos().latest(Some(" rust "), None).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, rust.id);

    let page = fx.videos().page(None, PageQuery::new(1, 10)).await.unwrap();
    assert_eq!(page.total, 2);

    let updated = fx
        .videos()
        .update(go.id, "Học Go cơ bản", "https://youtu.be/go789")
        .await
        .unwrap();
    assert_eq!(updated.video_id.as_str(), "go789");

    let missing = fx.videos().update(VideoId::new(), "x", "y").await;
    assert!(matches!(missing, Err(CommunityError::VideoNotFound)));

    let none = fx.videos().delete_many(&[VideoId::new()]).await;
    assert!(matches!(none, Err(CommunityError::VideoNotFound)));
    assert_eq!(fx.videos().delete_many(&[rust.id, go.id]).await.unwrap(), 2);
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_daily_series_covers_ten_days() {
    let fx = Fixture::new();
    let now = Utc::now();
    let author = fx.user_at("anh", UserRole::User, now - Duration::days(30));
    fx.post(author, "Hom nay", true, now);
    fx.post(author, "Hom nay 2", false, now);
    fx.post(author, "Thang truoc", true, now - Duration::days(30));

    let posts = fx.dashboard().posts_per_day().await.unwrap();
    assert_eq!(posts.len(), 10);
    assert_eq!(posts[0].date, now.date_naive());
    assert_eq!(posts[0].count, 2);
    assert_eq!(posts.iter().map(|d| d.count).sum::<i64>(), 2);

    let users = fx.dashboard().users_per_day().await.unwrap();
    assert!(users.iter().all(|d| d.count == 0));
}

#[tokio::test]
async fn test_dashboard_breakdowns() {
    let fx = Fixture::new();
    let now = Utc::now();
    fx.user_at("anh", UserRole::User, now - Duration::minutes(2));
    fx.user_at("boss", UserRole::Admin, now - Duration::minutes(1));
    let blocked = fx.user_at("chi", UserRole::User, now);
    fx.store.with(|s| {
        let user = s.users.iter_mut().find(|u| u.card.id == blocked.user_id).unwrap();
        user.blocked = true;
    });

    let latest = fx.dashboard().latest_users(Some(2)).await.unwrap();
    let names: Vec<&str> = latest.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["chi", "boss"]);

    let roles = fx.dashboard().role_counts().await.unwrap();
    let admins = roles.iter().find(|r| r.role == UserRole::Admin).unwrap();
    assert_eq!(admins.count, 1);

    let status = fx.dashboard().user_status_counts().await.unwrap();
    assert_eq!((status.verified, status.unverified, status.blocked), (2, 0, 1));

    assert_eq!(fx.dashboard().totals().await.unwrap().users, 3);
}

// ============================================================================
// Router
// ============================================================================

fn app(fx: &Fixture, tokens: Arc<TokenIssuer>) -> axum::Router {
    let state = CommunityAppState::new((*fx.store).clone(), tokens, fx.config.clone());
    community_routes(state.clone()).nest("/api/v1/users", users_routes(state))
}

fn request(method: &str, uri: &str, token: Option<&str>, json: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match json {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_contact_routes_mix_public_and_admin() {
    let fx = Fixture::new();
    let tokens = Arc::new(TokenIssuer::new(&AuthConfig::development()));
    let member = fx.user("anh", UserRole::User);
    let member_token = tokens
        .issue_access_token(member.user_id, member.role)
        .unwrap();

    let res = app(&fx, tokens.clone())
        .oneshot(request(
            "POST",
            "/api/v1/contact",
            None,
            Some(r#"{"fullName":"An","email":"bad","content":"Hi"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app(&fx, tokens.clone())
        .oneshot(request(
            "POST",
            "/api/v1/contact",
            None,
            Some(r#"{"fullName":"An","email":"an@example.com","content":"Hi"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app(&fx, tokens.clone())
        .oneshot(request("GET", "/api/v1/contact", Some(&member_token), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app(&fx, tokens)
        .oneshot(request("GET", "/api/v1/dashboard/count-dashboard", None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_follow_routes() {
    let fx = Fixture::new();
    let tokens = Arc::new(TokenIssuer::new(&AuthConfig::development()));
    let anh = fx.user("anh", UserRole::User);
    let binh = fx.user("binh", UserRole::User);
    let token = tokens.issue_access_token(anh.user_id, anh.role).unwrap();

    let uri = format!("/api/v1/users/follow/{}", binh.user_id);
    let res = app(&fx, tokens.clone())
        .oneshot(request("POST", &uri, None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app(&fx, tokens.clone())
        .oneshot(request("POST", &uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app(&fx, tokens.clone())
        .oneshot(request("POST", &uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let followers = format!("/api/v1/users/follower/{}", binh.user_id);
    let res = app(&fx, tokens.clone())
        .oneshot(request("GET", &followers, None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app(&fx, tokens)
        .oneshot(request("GET", "/api/v1/posts/followed", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
