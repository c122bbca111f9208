//! Community Error Types
//!
//! Community-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Messages are client-facing.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use thiserror::Error;

/// Community-specific result type alias
pub type CommunityResult<T> = Result<T, CommunityError>;

#[derive(Debug, Error)]
pub enum CommunityError {
    #[error("User not found")]
    UserNotFound,

    #[error("You cannot follow yourself")]
    SelfFollow,

    #[error("Already following")]
    AlreadyFollowing,

    #[error("You are not following this user")]
    NotFollowing,

    /// Unknown or not published
    #[error("Post not found")]
    PostNotFound,

    #[error("Post already in favorites")]
    AlreadyFavorite,

    #[error("Post not in favorites")]
    FavoriteNotFound,

    #[error("Video not found")]
    VideoNotFound,

    /// Reading another user's private lists
    #[error("You are not allowed")]
    NotAllowed,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommunityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommunityError::SelfFollow | CommunityError::Validation(_) => ErrorKind::BadRequest,
            CommunityError::NotAllowed => ErrorKind::Forbidden,
            CommunityError::UserNotFound
            | CommunityError::NotFollowing
            | CommunityError::PostNotFound
            | CommunityError::FavoriteNotFound
            | CommunityError::VideoNotFound => ErrorKind::NotFound,
            CommunityError::AlreadyFollowing | CommunityError::AlreadyFavorite => {
                ErrorKind::Conflict
            }
            CommunityError::Database(e) => classify_sqlx(e).0,
            CommunityError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CommunityError::Database(e) => {
                let (kind, message) = classify_sqlx(e);
                AppError::new(kind, message)
            }
            CommunityError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CommunityError::Database(e) => {
                tracing::error!(error = %e, "Community database error");
            }
            CommunityError::Internal(msg) => {
                tracing::error!(message = %msg, "Community internal error");
            }
            CommunityError::NotAllowed => {
                tracing::warn!(error = %self, "Community access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Community error");
            }
        }
    }
}

impl IntoResponse for CommunityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
