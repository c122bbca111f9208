//! Content Error Types
//!
//! Content-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Messages are client-facing.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use platform::media::MediaError;
use thiserror::Error;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Category not found")]
    CategoryNotFound,

    #[error("Cannot delete category with existing posts")]
    CategoryHasPosts,

    /// Publishing (or linking) a post to a category that does not exist
    #[error("Category post doesn't exist")]
    CategoryMissing,

    /// Every suffixed candidate was taken
    #[error("Category slug is not available")]
    SlugUnavailable,

    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("Comment does not belong to this post")]
    CommentPostMismatch,

    #[error("Type comment not found")]
    UnknownCommentType,

    #[error("Report comment not found")]
    ReportNotFound,

    #[error("Report comment resolved")]
    ReportResolved,

    #[error("No unresolved reports found")]
    NothingToResolve,

    /// Acting on someone else's post or comment
    #[error("You are not allowed")]
    NotAllowed,

    /// Owner edits of a post an admin has blocked
    #[error("Post has been blocked")]
    PostBlocked,

    #[error("{0}")]
    Validation(String),

    /// Upload rejected or storage failure
    #[error("{0}")]
    Media(#[from] MediaError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::CategoryHasPosts
            | ContentError::CategoryMissing
            | ContentError::CommentPostMismatch
            | ContentError::ReportResolved
            | ContentError::NothingToResolve
            | ContentError::Validation(_) => ErrorKind::BadRequest,
            ContentError::NotAllowed | ContentError::PostBlocked => ErrorKind::Forbidden,
            ContentError::CategoryNotFound
            | ContentError::PostNotFound
            | ContentError::CommentNotFound
            | ContentError::UnknownCommentType
            | ContentError::ReportNotFound => ErrorKind::NotFound,
            ContentError::SlugUnavailable => ErrorKind::Conflict,
            ContentError::Media(e) => match e {
                MediaError::Empty => ErrorKind::BadRequest,
                MediaError::TooLarge { .. } => ErrorKind::PayloadTooLarge,
                MediaError::UnsupportedType(_) => ErrorKind::UnsupportedMediaType,
                MediaError::Io(_) => ErrorKind::InternalServerError,
            },
            ContentError::Database(e) => classify_sqlx(e).0,
            ContentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            ContentError::Database(e) => {
                let (kind, message) = classify_sqlx(e);
                AppError::new(kind, message)
            }
            ContentError::Media(MediaError::Io(_)) => AppError::internal("Failed to store file"),
            ContentError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ContentError::Database(e) => {
                tracing::error!(error = %e, "Content database error");
            }
            ContentError::Internal(msg) => {
                tracing::error!(message = %msg, "Content internal error");
            }
            ContentError::Media(MediaError::Io(e)) => {
                tracing::error!(error = %e, "Media storage failure");
            }
            ContentError::NotAllowed | ContentError::PostBlocked => {
                tracing::warn!(error = %self, "Content access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Content error");
            }
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// True for a Postgres unique-constraint violation (23505)
pub(crate) fn is_unique_violation(err: &ContentError) -> bool {
    match err {
        ContentError::Database(e) => e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_taxonomy() {
        assert_eq!(ContentError::CategoryHasPosts.kind().status_code(), 400);
        assert_eq!(ContentError::ReportResolved.kind().status_code(), 400);
        assert_eq!(ContentError::UnknownCommentType.kind().status_code(), 404);
        assert_eq!(ContentError::NotAllowed.kind().status_code(), 403);
        assert_eq!(ContentError::SlugUnavailable.kind().status_code(), 409);
        assert_eq!(
            ContentError::Media(MediaError::TooLarge { max: 1, actual: 2 })
                .kind()
                .status_code(),
            413
        );
    }

    #[test]
    fn test_messages_are_client_facing() {
        assert_eq!(
            ContentError::CategoryMissing.to_app_error().message(),
            "Category post doesn't exist"
        );
        assert_eq!(
            ContentError::Internal("lock".into()).to_app_error().message(),
            "Internal server error"
        );
    }
}
