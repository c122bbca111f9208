//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Messages are client-facing.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use platform::media::MediaError;
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Register with a taken email or username
    #[error("User already exists")]
    UserExists,

    /// Login with an unknown email
    #[error("username does not exist")]
    UnknownLogin,

    #[error("Your account is not verified, please check your email")]
    NotVerified,

    #[error("Your account has been blocked")]
    Blocked,

    #[error("incorrect password")]
    IncorrectPassword,

    /// Refresh called without the cookie
    #[error("You are not authenticated")]
    NotAuthenticated,

    /// Refresh token well-formed but not in the session store
    #[error("Refresh token is not valid")]
    RefreshTokenRevoked,

    /// Refresh token failed signature or expiry checks
    #[error("{0}")]
    RefreshTokenRejected(TokenError),

    /// Missing, invalid or expired access token
    #[error("You need to sign in")]
    Unauthenticated,

    /// Authenticated, but the role is not on the allow-list
    #[error("Access denied, {0} only")]
    RoleNotAllowed(String),

    /// Acting on someone else's resource
    #[error("You are not allowed")]
    NotAllowed,

    /// Verification or reset token unknown or mismatched
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Forgot-password for an unknown email
    #[error("Invalid email")]
    InvalidEmail,

    #[error("incorrect old password")]
    IncorrectOldPassword,

    #[error("Invalid new password")]
    InvalidNewPassword,

    #[error("User does not exist")]
    UserNotFound,

    #[error("Role already exists")]
    RoleExists,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("You cannot block yourself")]
    CannotBlockSelf,

    /// Input validation failure from a value object
    #[error("{0}")]
    Validation(String),

    /// Upload rejected or storage failure
    #[error("{0}")]
    Media(#[from] MediaError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserExists
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::InvalidEmail
            | AuthError::IncorrectOldPassword
            | AuthError::InvalidNewPassword
            | AuthError::UnknownRole(_)
            | AuthError::CannotBlockSelf
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::NotAuthenticated | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Blocked
            | AuthError::RefreshTokenRevoked
            | AuthError::RoleNotAllowed(_)
            | AuthError::NotAllowed => ErrorKind::Forbidden,
            AuthError::UnknownLogin
            | AuthError::NotVerified
            | AuthError::IncorrectPassword
            | AuthError::RefreshTokenRejected(_)
            | AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::RoleExists => ErrorKind::Conflict,
            AuthError::Media(e) => match e {
                MediaError::Empty => ErrorKind::BadRequest,
                MediaError::TooLarge { .. } => ErrorKind::PayloadTooLarge,
                MediaError::UnsupportedType(_) => ErrorKind::UnsupportedMediaType,
                MediaError::Io(_) => ErrorKind::InternalServerError,
            },
            AuthError::Database(e) => classify_sqlx(e).0,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(e) => {
                let (kind, message) = classify_sqlx(e);
                AppError::new(kind, message)
            }
            AuthError::Media(MediaError::Io(_)) => AppError::internal("Failed to store file"),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Media(MediaError::Io(e)) => {
                tracing::error!(error = %e, "Media storage failure");
            }
            AuthError::IncorrectPassword | AuthError::IncorrectOldPassword => {
                tracing::warn!("Password mismatch");
            }
            AuthError::Blocked => {
                tracing::warn!("Login attempt on blocked account");
            }
            AuthError::RefreshTokenRevoked => {
                tracing::warn!("Revoked refresh token presented");
            }
            AuthError::RoleNotAllowed(allowed) => {
                tracing::warn!(allowed = %allowed, "Role not allowed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// True for a Postgres unique-constraint violation (23505)
pub(crate) fn is_unique_violation(err: &AuthError) -> bool {
    match err {
        AuthError::Database(e) => e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation()),
        _ => false,
    }
}

/// Value objects validate into `AppError`; keep their message as-is
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_taxonomy() {
        assert_eq!(AuthError::Unauthenticated.kind().status_code(), 401);
        assert_eq!(
            AuthError::RoleNotAllowed("admin".into()).kind().status_code(),
            403
        );
        assert_eq!(AuthError::RefreshTokenRevoked.kind().status_code(), 403);
        assert_eq!(
            AuthError::RefreshTokenRejected(TokenError::Expired)
                .kind()
                .status_code(),
            404
        );
        assert_eq!(AuthError::UserExists.kind().status_code(), 400);
        assert_eq!(AuthError::RoleExists.kind().status_code(), 409);
    }

    #[test]
    fn test_messages_are_client_facing() {
        assert_eq!(
            AuthError::RoleNotAllowed("admin".into()).to_app_error().message(),
            "Access denied, admin only"
        );
        assert_eq!(
            AuthError::RefreshTokenRejected(TokenError::Expired)
                .to_app_error()
                .message(),
            "jwt expired"
        );
        assert_eq!(
            AuthError::Internal("pool poisoned".into())
                .to_app_error()
                .message(),
            "Internal server error"
        );
    }

    #[test]
    fn test_validation_app_error_keeps_message() {
        let err: AuthError = AppError::bad_request("Invalid email format").into();
        assert_eq!(err.to_app_error().message(), "Invalid email format");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
}
