//! Community Router
//!
//! Same layout as the other crates: one router per gate, merged per prefix.

use auth::{ADMIN_ONLY, AuthGate, MEMBERS, middleware::require_role};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::CommunityStore;
use crate::infra::postgres::PgCommunityRepository;
use crate::presentation::handlers::{self, CommunityAppState};

/// State wired to PostgreSQL
pub type PgCommunityState = CommunityAppState<PgCommunityRepository>;

/// `/api/v1/contact`, `/api/v1/video-youtube`, `/api/v1/dashboard` and
/// `/api/v1/posts/followed`
///
/// The follow and favorite routes live under `/api/v1/users`; see
/// [`users_routes`].
pub fn community_routes<R: CommunityStore>(state: CommunityAppState<R>) -> Router {
    Router::new()
        .nest("/api/v1/contact", contact_router(state.clone()))
        .nest("/api/v1/video-youtube", video_router(state.clone()))
        .nest("/api/v1/dashboard", dashboard_router(state.clone()))
        .merge(feed_router(state))
}

/// Follows and favorites, merged into the `/api/v1/users` router
pub fn users_routes<R: CommunityStore>(state: CommunityAppState<R>) -> Router {
    let gate = AuthGate::new(state.tokens.clone());

    let members = Router::new()
        .route(
            "/follow/{id}",
            post(handlers::follow_user::<R>).delete(handlers::unfollow_user::<R>),
        )
        .route("/following-ids/get", get(handlers::following_ids::<R>))
        .route("/favorite", post(handlers::add_favorite::<R>))
        .route(
            "/favorite/{id}",
            get(handlers::list_favorites::<R>).delete(handlers::remove_favorite::<R>),
        )
        .route("/favorite-post/id", get(handlers::favorite_ids::<R>))
        .route_layer(middleware::from_fn_with_state(gate.roles(MEMBERS), require_role));

    let public = Router::new()
        .route("/follower/{id}", get(handlers::list_followers::<R>))
        .route("/following/{id}", get(handlers::list_following::<R>));

    members.merge(public).with_state(state)
}

fn feed_router<R: CommunityStore>(state: CommunityAppState<R>) -> Router {
    let gate = AuthGate::new(state.tokens.clone());

    Router::new()
        .route("/api/v1/posts/followed", get(handlers::followed_posts::<R>))
        .route_layer(middleware::from_fn_with_state(gate.roles(MEMBERS), require_role))
        .with_state(state)
}

pub fn contact_router<R: CommunityStore>(state: CommunityAppState<R>) -> Router {
    let gate = AuthGate::new(state.tokens.clone());

    let admin = Router::new()
        .route("/", get(handlers::list_contacts::<R>))
        .route("/resolve", put(handlers::resolve_contacts::<R>))
        .route("/delete/multi", post(handlers::delete_contacts::<R>))
        .route_layer(middleware::from_fn_with_state(gate.roles(ADMIN_ONLY), require_role));

    let public = Router::new().route("/", post(handlers::submit_contact::<R>));

    admin.merge(public).with_state(state)
}

pub fn video_router<R: CommunityStore>(state: CommunityAppState<R>) -> Router {
    let gate = AuthGate::new(state.tokens.clone());

    let admin = Router::new()
        .route("/", post(handlers::create_video::<R>))
        .route("/admin", get(handlers::admin_list_videos::<R>))
        .route("/{id}", put(handlers::update_video::<R>))
        .route("/delete-many", post(handlers::delete_videos::<R>))
        .route_layer(middleware::from_fn_with_state(gate.roles(ADMIN_ONLY), require_role));

    let public = Router::new().route("/", get(handlers::list_videos::<R>));

    admin.merge(public).with_state(state)
}

pub fn dashboard_router<R: CommunityStore>(state: CommunityAppState<R>) -> Router {
    let gate = AuthGate::new(state.tokens.clone());

    Router::new()
        .route("/post-per-day", get(handlers::posts_per_day::<R>))
        .route("/user-per-day", get(handlers::users_per_day::<R>))
        .route("/count-dashboard", get(handlers::dashboard_totals::<R>))
        .route("/latest-user", get(handlers::latest_users::<R>))
        .route("/post-count/by-status", get(handlers::post_counts::<R>))
        .route("/user-count/by-role", get(handlers::role_counts::<R>))
        .route("/user-count/by-status", get(handlers::user_status_counts::<R>))
        .route_layer(middleware::from_fn_with_state(gate.roles(ADMIN_ONLY), require_role))
        .with_state(state)
}
