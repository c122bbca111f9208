//! Forgot-Password Use Case
//!
//! `request` mails a 5-minute link and supersedes earlier ones. `check` and
//! `reset` apply the same token rules; an expired record is deleted the
//! first time it is presented.

use std::sync::Arc;

use chrono::Utc;
use platform::mail::MailSender;

use crate::application::config::AuthConfig;
use crate::application::notify;
use crate::domain::entity::one_time_token::PasswordReset;
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct PasswordResetUseCase<U, P, M>
where
    U: UserRepository,
    P: PasswordResetRepository,
    M: MailSender + Sync + 'static,
{
    user_repo: Arc<U>,
    reset_repo: Arc<P>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, P, M> PasswordResetUseCase<U, P, M>
where
    U: UserRepository,
    P: PasswordResetRepository,
    M: MailSender + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        reset_repo: Arc<P>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            reset_repo,
            mailer,
            config,
        }
    }

    pub async fn request(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email).map_err(|_| AuthError::InvalidEmail)?;
        let user = self
            .user_repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidEmail)?;

        let token = platform::crypto::random_token();
        let record = PasswordReset::new(user.id, email, &token);
        self.reset_repo.replace_password_reset(&record).await?;

        let mail = notify::password_reset_mail(&self.config.app_url, &record.email, &token)?;
        notify::dispatch(self.mailer.clone(), mail);

        tracing::info!(user_id = %user.id, "Password reset requested");
        Ok(())
    }

    /// Validate a link without consuming it
    pub async fn check(&self, email: &str, token: &str) -> AuthResult<()> {
        self.live_record(email, token).await.map(|_| ())
    }

    pub async fn reset(&self, email: &str, token: &str, new_password: String) -> AuthResult<()> {
        let record = self.live_record(email, token).await?;

        let raw_password = RawPassword::new(new_password)?;
        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        self.reset_repo
            .complete_password_reset(&record, &password)
            .await?;

        tracing::info!(user_id = %record.user_id, "Password reset completed");
        Ok(())
    }

    async fn live_record(&self, email: &str, token: &str) -> AuthResult<PasswordReset> {
        let email = Email::new(email).map_err(|_| AuthError::InvalidToken)?;
        let record = self
            .reset_repo
            .find_password_reset(&email)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !record.matches(token) {
            return Err(AuthError::InvalidToken);
        }
        if record.is_expired(Utc::now()) {
            self.reset_repo.delete_password_reset(&record).await?;
            return Err(AuthError::TokenExpired);
        }
        Ok(record)
    }
}
