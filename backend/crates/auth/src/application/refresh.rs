//! Refresh Use Case
//!
//! Exchanges a stored refresh token for a new access token and rotates the
//! refresh token itself.

use std::sync::Arc;

use platform::crypto::token_digest;

use crate::application::token::TokenIssuer;
use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::repository::RefreshTokenRepository;
use crate::error::{AuthError, AuthResult};

pub struct RefreshOutput {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct RefreshUseCase<S>
where
    S: RefreshTokenRepository,
{
    session_repo: Arc<S>,
    tokens: Arc<TokenIssuer>,
}

impl<S> RefreshUseCase<S>
where
    S: RefreshTokenRepository,
{
    pub fn new(session_repo: Arc<S>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            session_repo,
            tokens,
        }
    }

    /// `presented` is the cookie value, `None` if the cookie is missing
    pub async fn execute(&self, presented: Option<&str>) -> AuthResult<RefreshOutput> {
        let presented = presented.ok_or(AuthError::NotAuthenticated)?;
        let old_digest = token_digest(presented);

        if self
            .session_repo
            .find_refresh_token(&old_digest)
            .await?
            .is_none()
        {
            return Err(AuthError::RefreshTokenRevoked);
        }

        let claims = self
            .tokens
            .verify_refresh_token(presented)
            .map_err(AuthError::RefreshTokenRejected)?;

        let access_token = self
            .tokens
            .issue_access_token(claims.user_id, claims.role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let refresh_token = self
            .tokens
            .issue_refresh_token(claims.user_id, claims.role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let rotated = self
            .session_repo
            .rotate_refresh_token(&old_digest, &RefreshToken::new(claims.user_id, &refresh_token))
            .await?;
        if !rotated {
            // A concurrent refresh consumed it first
            return Err(AuthError::RefreshTokenRevoked);
        }

        tracing::debug!(user_id = %claims.user_id, "Refresh token rotated");

        Ok(RefreshOutput {
            access_token,
            refresh_token,
        })
    }
}
