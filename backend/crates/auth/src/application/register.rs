//! Register Use Case
//!
//! Creates an unverified account and mails the verification link.

use std::sync::Arc;

use platform::mail::MailSender;

use crate::application::config::AuthConfig;
use crate::application::notify;
use crate::domain::entity::{one_time_token::EmailVerification, user::User};
use crate::domain::repository::{EmailVerificationRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
    username::Username,
};
use crate::error::{AuthError, AuthResult, is_unique_violation};

pub struct RegisterInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U, V, M>
where
    U: UserRepository,
    V: EmailVerificationRepository,
    M: MailSender + Sync + 'static,
{
    user_repo: Arc<U>,
    verification_repo: Arc<V>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, V, M> RegisterUseCase<U, V, M>
where
    U: UserRepository,
    V: EmailVerificationRepository,
    M: MailSender + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        verification_repo: Arc<V>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            verification_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let name = FullName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let username = Username::new(&input.username).map_err(|e| AuthError::Validation(e.to_string()))?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.user_exists(&email, &username).await? {
            return Err(AuthError::UserExists);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(username, name, email, password, UserRole::User);

        // Lost race against a concurrent registration
        self.user_repo.insert_user(&user).await.map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::UserExists
            } else {
                e
            }
        })?;

        let token = platform::crypto::random_token();
        let record = EmailVerification::new(user.id, user.email.clone(), &token);
        self.verification_repo.store_verification(&record).await?;

        let mail = notify::verification_mail(&self.config.app_url, &user.email, &token)?;
        notify::dispatch(self.mailer.clone(), mail);

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }
}
