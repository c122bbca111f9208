//! Verify Email Use Case

use std::sync::Arc;

use crate::domain::repository::EmailVerificationRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct VerifyEmailUseCase<V>
where
    V: EmailVerificationRepository,
{
    verification_repo: Arc<V>,
}

impl<V> VerifyEmailUseCase<V>
where
    V: EmailVerificationRepository,
{
    pub fn new(verification_repo: Arc<V>) -> Self {
        Self { verification_repo }
    }

    /// Consume the newest token for `email`; a replay finds nothing and fails
    pub async fn execute(&self, email: &str, token: &str) -> AuthResult<()> {
        let email = Email::new(email).map_err(|_| AuthError::InvalidToken)?;

        let record = self
            .verification_repo
            .latest_verification(&email)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !record.matches(token) {
            return Err(AuthError::InvalidToken);
        }

        self.verification_repo.complete_verification(&record).await?;

        tracing::info!(user_id = %record.user_id, "Email verified");
        Ok(())
    }
}
