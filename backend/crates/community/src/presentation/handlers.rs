//! HTTP Handlers

use std::sync::Arc;

use auth::{AuthUser, TokenIssuer};
use axum::Json;
use axum::extract::{Path, Query, State};
use kernel::id::{PostId, UserId, VideoId};
use kernel::page::PageQuery;
use kernel::response::ApiResponse;

use crate::application::{
    CommunityConfig, ContactUseCase, DashboardUseCase, FavoriteUseCase, FollowUseCase,
    VideoUseCase,
};
use crate::domain::repository::CommunityStore;
use crate::error::CommunityResult;
use crate::presentation::dto::{
    ContactIdsRequest, ContactPayload, ContactRequest, ContactResponse, ContactsPayload,
    DailyCountResponse, DataPayload, DeletedCountPayload, FavoriteIdsPayload, FavoriteRequest,
    FollowingIdsPayload, LatestUserResponse, LimitQuery, ModifiedPayload, PostCardPagePayload,
    PostCardResponse, PostCardsPayload, PostStatusResponse, RoleCountResponse, TotalsResponse,
    UserStatusResponse, UsersPayload, VideoIdsRequest, VideoListQuery, VideoPagePayload,
    VideoPageQuery, VideoPayload, VideoRequest, VideoResponse, VideosPayload, daily_series,
};

/// Shared state for community handlers
pub struct CommunityAppState<R>
where
    R: CommunityStore,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenIssuer>,
    pub config: Arc<CommunityConfig>,
}

impl<R> Clone for CommunityAppState<R>
where
    R: CommunityStore,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> CommunityAppState<R>
where
    R: CommunityStore,
{
    pub fn new(repo: R, tokens: Arc<TokenIssuer>, config: Arc<CommunityConfig>) -> Self {
        Self {
            repo: Arc::new(repo),
            tokens,
            config,
        }
    }

    fn follows(&self) -> FollowUseCase<R> {
        FollowUseCase::new(self.repo.clone())
    }

    fn favorites(&self) -> FavoriteUseCase<R> {
        FavoriteUseCase::new(self.repo.clone())
    }

    fn contacts(&self) -> ContactUseCase<R> {
        ContactUseCase::new(self.repo.clone())
    }

    fn videos(&self) -> VideoUseCase<R> {
        VideoUseCase::new(self.repo.clone(), self.config.clone())
    }

    fn dashboard(&self) -> DashboardUseCase<R> {
        DashboardUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Follows
// ============================================================================

/// POST /api/v1/users/follow/{id}
pub async fn follow_user<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    actor: AuthUser,
    Path(id): Path<UserId>,
) -> CommunityResult<ApiResponse> {
    state.follows().follow(actor, id).await?;
    Ok(ApiResponse::message("Followed successfully"))
}

/// DELETE /api/v1/users/follow/{id}
pub async fn unfollow_user<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    actor: AuthUser,
    Path(id): Path<UserId>,
) -> CommunityResult<ApiResponse> {
    state.follows().unfollow(actor, id).await?;
    Ok(ApiResponse::message("Unfollowed successfully"))
}

/// GET /api/v1/users/follower/{id}
pub async fn list_followers<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Path(id): Path<UserId>,
) -> CommunityResult<ApiResponse<UsersPayload>> {
    let users = state.follows().followers(id).await?;
    Ok(ApiResponse::ok(
        "Get followers successfully",
        UsersPayload::from_cards(users),
    ))
}

/// GET /api/v1/users/following/{id}
pub async fn list_following<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Path(id): Path<UserId>,
) -> CommunityResult<ApiResponse<UsersPayload>> {
    let users = state.follows().following(id).await?;
    Ok(ApiResponse::ok(
        "Get following successfully",
        UsersPayload::from_cards(users),
    ))
}

/// GET /api/v1/users/following-ids/get
pub async fn following_ids<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    actor: AuthUser,
) -> CommunityResult<ApiResponse<FollowingIdsPayload>> {
    let following_ids = state.follows().following_ids(actor).await?;
    Ok(ApiResponse::ok(
        "Get following ids successfully",
        FollowingIdsPayload { following_ids },
    ))
}

/// GET /api/v1/posts/followed
pub async fn followed_posts<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    actor: AuthUser,
    Query(page): Query<PageQuery>,
) -> CommunityResult<ApiResponse<PostCardPagePayload>> {
    let posts = state.follows().feed(actor, page).await?;
    Ok(ApiResponse::ok(
        "Get followed posts successfully",
        PostCardPagePayload {
            posts: posts.map(PostCardResponse::from),
        },
    ))
}

// ============================================================================
// Favorites
// ============================================================================

/// POST /api/v1/users/favorite
pub async fn add_favorite<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    actor: AuthUser,
    Json(req): Json<FavoriteRequest>,
) -> CommunityResult<ApiResponse> {
    state.favorites().add(actor, req.post_id).await?;
    Ok(ApiResponse::created_message("Post added to favorites"))
}

/// GET /api/v1/users/favorite/{id}
pub async fn list_favorites<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    actor: AuthUser,
    Path(id): Path<UserId>,
) -> CommunityResult<ApiResponse<PostCardsPayload>> {
    let posts = state.favorites().list(actor, id).await?;
    Ok(ApiResponse::ok(
        "Get favorite posts successfully",
        PostCardsPayload::from_cards(posts),
    ))
}

/// GET /api/v1/users/favorite-post/id
pub async fn favorite_ids<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    actor: AuthUser,
) -> CommunityResult<ApiResponse<FavoriteIdsPayload>> {
    let post_ids = state.favorites().ids(actor).await?;
    Ok(ApiResponse::ok(
        "Get favorite post ids successfully",
        FavoriteIdsPayload { post_ids },
    ))
}

/// DELETE /api/v1/users/favorite/{id}
pub async fn remove_favorite<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    actor: AuthUser,
    Path(id): Path<PostId>,
) -> CommunityResult<ApiResponse> {
    state.favorites().remove(actor, id).await?;
    Ok(ApiResponse::message("Post removed from favorites"))
}

// ============================================================================
// Contacts
// ============================================================================

/// POST /api/v1/contact
pub async fn submit_contact<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Json(req): Json<ContactRequest>,
) -> CommunityResult<ApiResponse<ContactPayload>> {
    let contact = state
        .contacts()
        .submit(&req.full_name, &req.email, &req.content)
        .await?;
    Ok(ApiResponse::ok(
        "Contact created successfully",
        ContactPayload {
            contact: contact.into(),
        },
    ))
}

/// GET /api/v1/contact
pub async fn list_contacts<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
) -> CommunityResult<ApiResponse<ContactsPayload>> {
    let contacts = state.contacts().list().await?;
    Ok(ApiResponse::ok(
        "All contacts retrieved successfully",
        ContactsPayload {
            contacts: contacts.into_iter().map(ContactResponse::from).collect(),
        },
    ))
}

/// PUT /api/v1/contact/resolve
pub async fn resolve_contacts<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Json(req): Json<ContactIdsRequest>,
) -> CommunityResult<ApiResponse<ModifiedPayload>> {
    let modified_count = state.contacts().resolve(&req.ids).await?;
    Ok(ApiResponse::ok(
        "Contacts resolved successfully",
        ModifiedPayload { modified_count },
    ))
}

/// POST /api/v1/contact/delete/multi
pub async fn delete_contacts<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Json(req): Json<ContactIdsRequest>,
) -> CommunityResult<ApiResponse<DeletedCountPayload>> {
    let deleted_count = state.contacts().delete(&req.ids).await?;
    Ok(ApiResponse::ok(
        "Contacts deleted successfully",
        DeletedCountPayload { deleted_count },
    ))
}

// ============================================================================
// Videos
// ============================================================================

/// POST /api/v1/video-youtube
pub async fn create_video<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Json(req): Json<VideoRequest>,
) -> CommunityResult<ApiResponse<VideoPayload>> {
    let video = state.videos().create(&req.title, &req.video_id).await?;
    Ok(ApiResponse::created(
        "Video YouTube created successfully",
        VideoPayload { video: video.into() },
    ))
}

/// PUT /api/v1/video-youtube/{id}
pub async fn update_video<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Path(id): Path<VideoId>,
    Json(req): Json<VideoRequest>,
) -> CommunityResult<ApiResponse<VideoPayload>> {
    let video = state.videos().update(id, &req.title, &req.video_id).await?;
    Ok(ApiResponse::ok(
        "Video YouTube updated successfully",
        VideoPayload { video: video.into() },
    ))
}

/// GET /api/v1/video-youtube
pub async fn list_videos<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Query(query): Query<VideoListQuery>,
) -> CommunityResult<ApiResponse<VideosPayload>> {
    let videos = state
        .videos()
        .latest(query.keyword.as_deref(), query.limit)
        .await?;
    Ok(ApiResponse::ok(
        "All video youtube retrieved successfully",
        VideosPayload {
            videos: videos.into_iter().map(VideoResponse::from).collect(),
        },
    ))
}

/// GET /api/v1/video-youtube/admin
pub async fn admin_list_videos<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Query(query): Query<VideoPageQuery>,
) -> CommunityResult<ApiResponse<VideoPagePayload>> {
    let videos = state
        .videos()
        .page(query.keyword.as_deref(), query.page_query())
        .await?;
    Ok(ApiResponse::ok(
        "All video youtube retrieved successfully",
        VideoPagePayload {
            videos: videos.map(VideoResponse::from),
        },
    ))
}

/// POST /api/v1/video-youtube/delete-many
pub async fn delete_videos<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Json(req): Json<VideoIdsRequest>,
) -> CommunityResult<ApiResponse<DeletedCountPayload>> {
    let deleted_count = state.videos().delete_many(&req.ids).await?;
    Ok(ApiResponse::ok(
        "Videos deleted successfully",
        DeletedCountPayload { deleted_count },
    ))
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/v1/dashboard/post-per-day
pub async fn posts_per_day<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
) -> CommunityResult<ApiResponse<DataPayload<Vec<DailyCountResponse>>>> {
    let days = state.dashboard().posts_per_day().await?;
    Ok(ApiResponse::ok(
        "Dashboard data retrieved successfully",
        DataPayload {
            data: daily_series(days),
        },
    ))
}

/// GET /api/v1/dashboard/user-per-day
pub async fn users_per_day<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
) -> CommunityResult<ApiResponse<DataPayload<Vec<DailyCountResponse>>>> {
    let days = state.dashboard().users_per_day().await?;
    Ok(ApiResponse::ok(
        "Dashboard data retrieved successfully",
        DataPayload {
            data: daily_series(days),
        },
    ))
}

/// GET /api/v1/dashboard/count-dashboard
pub async fn dashboard_totals<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
) -> CommunityResult<ApiResponse<DataPayload<TotalsResponse>>> {
    let totals = state.dashboard().totals().await?;
    Ok(ApiResponse::ok(
        "Dashboard data retrieved successfully",
        DataPayload { data: totals.into() },
    ))
}

/// GET /api/v1/dashboard/latest-user
pub async fn latest_users<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
    Query(query): Query<LimitQuery>,
) -> CommunityResult<ApiResponse<DataPayload<Vec<LatestUserResponse>>>> {
    let users = state.dashboard().latest_users(query.limit).await?;
    Ok(ApiResponse::ok(
        "Latest users retrieved successfully",
        DataPayload {
            data: users.into_iter().map(LatestUserResponse::from).collect(),
        },
    ))
}

/// GET /api/v1/dashboard/post-count/by-status
pub async fn post_counts<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
) -> CommunityResult<ApiResponse<DataPayload<PostStatusResponse>>> {
    let counts = state.dashboard().post_counts().await?;
    Ok(ApiResponse::ok(
        "Post count retrieved successfully",
        DataPayload { data: counts.into() },
    ))
}

/// GET /api/v1/dashboard/user-count/by-role
pub async fn role_counts<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
) -> CommunityResult<ApiResponse<DataPayload<Vec<RoleCountResponse>>>> {
    let counts = state.dashboard().role_counts().await?;
    Ok(ApiResponse::ok(
        "User count retrieved successfully",
        DataPayload {
            data: counts.into_iter().map(RoleCountResponse::from).collect(),
        },
    ))
}

/// GET /api/v1/dashboard/user-count/by-status
pub async fn user_status_counts<R: CommunityStore>(
    State(state): State<CommunityAppState<R>>,
) -> CommunityResult<ApiResponse<DataPayload<UserStatusResponse>>> {
    let counts = state.dashboard().user_status_counts().await?;
    Ok(ApiResponse::ok(
        "User count retrieved successfully",
        DataPayload { data: counts.into() },
    ))
}
