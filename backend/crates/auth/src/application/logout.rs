//! Logout Use Case

use std::sync::Arc;

use platform::crypto::token_digest;

use crate::domain::repository::RefreshTokenRepository;
use crate::error::AuthResult;

pub struct LogoutUseCase<S>
where
    S: RefreshTokenRepository,
{
    session_repo: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: RefreshTokenRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Idempotent: an unknown or missing token is not an error
    pub async fn execute(&self, presented: Option<&str>) -> AuthResult<()> {
        if let Some(token) = presented {
            let removed = self
                .session_repo
                .revoke_refresh_token(&token_digest(token))
                .await?;
            tracing::debug!(removed, "Logout");
        }
        Ok(())
    }
}
