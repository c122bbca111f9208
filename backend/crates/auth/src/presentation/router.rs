//! Auth Router
//!
//! Each router is generic over the store, mailer and media backends so tests
//! can mount the same routes over in-memory implementations.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};
use platform::mail::{MailSender, Mailer};
use platform::media::{DiskMediaStore, MediaStore};

use crate::domain::repository::AuthStore;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{ADMIN_ONLY, AuthGate, MEMBERS, require_role};

/// Multipart overhead on top of the 5 MiB image limit
const UPLOAD_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// State wired to PostgreSQL, SMTP and local media storage
pub type PgAuthState = AuthAppState<PgAuthRepository, Mailer, DiskMediaStore>;

/// `/api/v1/auth`, `/api/v1/roles` and the mailed-link endpoints
pub fn auth_routes<R, M, S>(state: AuthAppState<R, M, S>) -> Router
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    Router::new()
        .nest("/api/v1/auth", auth_router(state.clone()))
        .nest("/api/v1/roles", roles_router(state.clone()))
        .merge(verification_router(state))
}

/// Register, login and token lifecycle
pub fn auth_router<R, M, S>(state: AuthAppState<R, M, S>) -> Router
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R, M, S>))
        .route("/login", post(handlers::login::<R, M, S>))
        .route("/refresh-token", post(handlers::refresh_token::<R, M, S>))
        .route("/logout", post(handlers::logout::<R, M, S>))
        .route("/forget-password", post(handlers::forget_password::<R, M, S>))
        .with_state(state)
}

/// Targets of the links sent by mail
pub fn verification_router<R, M, S>(state: AuthAppState<R, M, S>) -> Router
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    Router::new()
        .route("/verify", get(handlers::verify_email::<R, M, S>))
        .route(
            "/change-password",
            get(handlers::check_reset_token::<R, M, S>).put(handlers::reset_password::<R, M, S>),
        )
        .with_state(state)
}

/// `/api/v1/users`
pub fn users_router<R, M, S>(state: AuthAppState<R, M, S>) -> Router
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let gate = AuthGate::new(state.tokens.clone());

    let admin = Router::new()
        .route(
            "/",
            get(handlers::list_users::<R, M, S>).post(handlers::create_user::<R, M, S>),
        )
        .route("/block/{id}", put(handlers::block_user::<R, M, S>))
        .route("/unblock/{id}", put(handlers::unblock_user::<R, M, S>))
        .route("/role-change/{id}", put(handlers::change_user_role::<R, M, S>))
        .route("/change-roles/users", put(handlers::change_users_role::<R, M, S>))
        .route("/block-unblock/users", put(handlers::block_unblock_users::<R, M, S>))
        .route_layer(middleware::from_fn_with_state(gate.roles(ADMIN_ONLY), require_role));

    let members = Router::new()
        .route("/me", get(handlers::me::<R, M, S>))
        .route(
            "/{id}",
            get(handlers::get_user::<R, M, S>).put(handlers::update_profile::<R, M, S>),
        )
        .route(
            "/avatar/{id}",
            put(handlers::update_avatar::<R, M, S>).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/change-password/user", put(handlers::change_password::<R, M, S>))
        .route_layer(middleware::from_fn_with_state(gate.roles(MEMBERS), require_role));

    let public = Router::new()
        .route("/public/{id}", get(handlers::public_user::<R, M, S>))
        .route(
            "/public/username/{username}",
            get(handlers::public_user_by_username::<R, M, S>),
        );

    admin.merge(members).merge(public).with_state(state)
}

/// `/api/v1/roles`
pub fn roles_router<R, M, S>(state: AuthAppState<R, M, S>) -> Router
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let gate = AuthGate::new(state.tokens.clone());

    Router::new()
        .route(
            "/",
            get(handlers::list_roles::<R, M, S>).post(handlers::create_role::<R, M, S>),
        )
        .route_layer(middleware::from_fn_with_state(gate.roles(ADMIN_ONLY), require_role))
        .with_state(state)
}
