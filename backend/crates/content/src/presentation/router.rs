//! Content Router
//!
//! Routes are grouped by who may call them; each group carries its own gate
//! and the groups are merged, so one path can mix public and gated methods.

use auth::{ADMIN_ONLY, AuthGate, MEMBERS, middleware::require_role};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};
use platform::media::{DiskMediaStore, MediaStore};

use crate::domain::repository::ContentStore;
use crate::infra::postgres::PgContentRepository;
use crate::presentation::handlers::{self, ContentAppState};

/// Multipart overhead on top of the 5 MiB image limit
const UPLOAD_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// State wired to PostgreSQL and local media storage
pub type PgContentState = ContentAppState<PgContentRepository, DiskMediaStore>;

/// `/api/v1/posts` and `/api/v1/category-post`
pub fn content_routes<R, S>(state: ContentAppState<R, S>) -> Router
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    Router::new()
        .nest("/api/v1/posts", posts_router(state.clone()))
        .nest("/api/v1/category-post", categories_router(state))
}

/// Posts, comments and comment reports
pub fn posts_router<R, S>(state: ContentAppState<R, S>) -> Router
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let gate = AuthGate::new(state.tokens.clone());

    let admin = Router::new()
        .route("/admin/get-all", get(handlers::admin_list_posts::<R, S>))
        .route("/admin/detail/{id}", get(handlers::admin_post_detail::<R, S>))
        .route("/admin/block", put(handlers::block_posts::<R, S>))
        .route("/admin/unblock", put(handlers::unblock_posts::<R, S>))
        .route("/admin/delete-many-posts", post(handlers::delete_many_posts::<R, S>))
        .route("/comment/report", get(handlers::list_reports::<R, S>))
        .route("/comment/report/{id}/resolve", put(handlers::resolve_report::<R, S>))
        .route("/comment/report/resolve/multiple", put(handlers::resolve_reports::<R, S>))
        .route("/comment/report/delete/multiple", put(handlers::delete_reports::<R, S>))
        .route_layer(middleware::from_fn_with_state(gate.roles(ADMIN_ONLY), require_role));

    let members = Router::new()
        .route(
            "/",
            post(handlers::create_post::<R, S>).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/{id}",
            put(handlers::update_post::<R, S>)
                .delete(handlers::delete_post::<R, S>)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/image",
            post(handlers::upload_image::<R, S>).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/detail/{id}", get(handlers::post_detail_by_id::<R, S>))
        .route("/me", get(handlers::my_posts::<R, S>))
        .route("/tags", get(handlers::list_tags::<R, S>))
        .route("/comment", post(handlers::create_comment::<R, S>))
        .route(
            "/comment/{id}",
            put(handlers::update_comment::<R, S>).delete(handlers::delete_comment::<R, S>),
        )
        .route_layer(middleware::from_fn_with_state(gate.roles(MEMBERS), require_role));

    let public = Router::new()
        .route("/latest", get(handlers::latest_posts::<R, S>))
        .route("/get-all", get(handlers::list_posts::<R, S>))
        .route("/most-view", get(handlers::most_viewed_posts::<R, S>))
        .route("/most-tags", get(handlers::popular_tags::<R, S>))
        .route("/relate-posts", get(handlers::related_posts::<R, S>))
        .route("/detail", get(handlers::post_detail::<R, S>))
        .route("/comment", get(handlers::list_comments::<R, S>))
        .route("/comment/report", post(handlers::report_comment::<R, S>));

    admin.merge(members).merge(public).with_state(state)
}

/// `/api/v1/category-post`
pub fn categories_router<R, S>(state: ContentAppState<R, S>) -> Router
where
    R: ContentStore,
    S: MediaStore + Sync + 'static,
{
    let gate = AuthGate::new(state.tokens.clone());

    let admin = Router::new()
        .route("/", post(handlers::create_category::<R, S>))
        .route(
            "/{id}",
            put(handlers::update_category::<R, S>).delete(handlers::delete_category::<R, S>),
        )
        .route("/posts/{id}", get(handlers::category_posts::<R, S>))
        .route("/get/by-admin", get(handlers::admin_list_categories::<R, S>))
        .route_layer(middleware::from_fn_with_state(gate.roles(ADMIN_ONLY), require_role));

    let public = Router::new()
        .route("/", get(handlers::list_categories::<R, S>))
        .route("/{id}", get(handlers::category_detail::<R, S>));

    admin.merge(public).with_state(state)
}
