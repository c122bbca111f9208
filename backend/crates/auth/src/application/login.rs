//! Login Use Case
//!
//! Checks credentials, revokes every earlier refresh token of the user and
//! issues a fresh access/refresh pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::{refresh_token::RefreshToken, user::User};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: RefreshTokenRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        tokens: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::UnknownLogin)?;

        let user = self
            .user_repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::UnknownLogin)?;

        let raw_password = RawPassword::for_verification(input.password);
        if !user.password.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::IncorrectPassword);
        }

        // Account state is only disclosed to someone holding the password
        user.ensure_can_login()?;

        // Single active session per user
        let revoked = self.session_repo.revoke_all_refresh_tokens(&user.id).await?;

        let access_token = self
            .tokens
            .issue_access_token(user.id, user.role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let refresh_token = self
            .tokens
            .issue_refresh_token(user.id, user.role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.session_repo
            .store_refresh_token(&RefreshToken::new(user.id, &refresh_token))
            .await?;

        tracing::info!(user_id = %user.id, revoked, "User logged in");

        Ok(LoginOutput {
            user,
            access_token,
            refresh_token,
        })
    }
}
