//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! rendered by each domain crate.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::domain::repository::PasswordResetRepository;
use auth::{
    AdminSeed, AuthConfig, PgAuthRepository, PgAuthState, TokenIssuer, auth_routes, ensure_admin,
    users_router,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use community::{CommunityConfig, PgCommunityRepository, PgCommunityState, community_routes};
use content::{ContentConfig, PgContentRepository, PgContentState, content_routes};
use platform::mail::{MailConfig, Mailer};
use platform::media::{DiskMediaStore, MEDIA_ROUTE, MediaConfig};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,content=info,community=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Shared configuration
    let auth_config = Arc::new(AuthConfig::from_env()?);
    let tokens = Arc::new(TokenIssuer::new(&auth_config));
    let mailer = Arc::new(Mailer::new(&MailConfig::from_env())?);
    let media_config = MediaConfig::from_env();
    let media_dir = media_config.dir.clone();
    let media = Arc::new(DiskMediaStore::new(media_config));

    // Startup housekeeping
    // Errors here should not prevent server startup
    let auth_repo = Arc::new(PgAuthRepository::new(pool.clone()));
    match auth_repo.purge_expired_password_resets().await {
        Ok(resets) => {
            tracing::info!(resets_deleted = resets, "Password reset cleanup completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Password reset cleanup failed, continuing anyway"
            );
        }
    }

    if let Some(seed) = AdminSeed::from_env() {
        match ensure_admin(auth_repo, &auth_config, seed).await {
            Ok(true) => tracing::info!("Seeded administrator account"),
            Ok(false) => tracing::debug!("Administrator account already present"),
            Err(e) => tracing::warn!(error = %e, "Administrator seed failed, continuing anyway"),
        }
    }

    // Router state
    let auth_state = PgAuthState::new(
        PgAuthRepository::new(pool.clone()),
        mailer,
        media.clone(),
        tokens.clone(),
        auth_config,
    );
    let content_state = PgContentState::new(
        PgContentRepository::new(pool.clone()),
        media,
        tokens.clone(),
        Arc::new(ContentConfig::from_env()),
    );
    let community_state = PgCommunityState::new(
        PgCommunityRepository::new(pool),
        tokens,
        Arc::new(CommunityConfig::default()),
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let users = users_router(auth_state.clone()).merge(community::users_routes(community_state.clone()));

    let app = Router::new()
        .merge(auth_routes(auth_state))
        .nest("/api/v1/users", users)
        .merge(content_routes(content_state))
        .merge(community_routes(community_state))
        .nest_service(MEDIA_ROUTE, ServeDir::new(media_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = match env::var("PORT") {
        Ok(raw) => raw.trim().parse().context("PORT must be a port number")?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
