//! Token Issuer
//!
//! HS256 JWTs. Access and refresh tokens use separate secrets, so one can
//! never be replayed as the other.

use std::time::Duration;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_role::UserRole;

/// Payload of both token kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: UserId,
    pub role: UserRole,
    pub iat: u64,
    pub exp: u64,
    /// Unique per token, so two tokens minted in the same second differ
    pub jti: Uuid,
}

/// Why a token was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("jwt expired")]
    Expired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("jwt malformed")]
    Malformed,

    #[error("failed to sign token")]
    Signing,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }
}

#[derive(Clone)]
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Keys {
    fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }
}

#[derive(Clone)]
pub struct TokenIssuer {
    access: Keys,
    refresh: Keys,
    validation: Validation,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access.ttl)
            .field("refresh_ttl", &self.refresh.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access: Keys::new(&config.access_secret, config.access_ttl),
            refresh: Keys::new(&config.refresh_secret, config.refresh_ttl),
            validation,
        }
    }

    pub fn issue_access_token(&self, user_id: UserId, role: UserRole) -> Result<String, TokenError> {
        Self::issue(&self.access, user_id, role)
    }

    pub fn issue_refresh_token(&self, user_id: UserId, role: UserRole) -> Result<String, TokenError> {
        Self::issue(&self.refresh, user_id, role)
    }

    /// `None` for anything but a valid, unexpired access token
    pub fn verify_access_token(&self, token: &str) -> Option<Claims> {
        self.verify(&self.access, token).ok()
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(&self.refresh, token)
    }

    fn issue(keys: &Keys, user_id: UserId, role: UserRole) -> Result<String, TokenError> {
        let iat = jsonwebtoken::get_current_timestamp();
        let claims = Claims {
            user_id,
            role,
            iat,
            exp: iat + keys.ttl.as_secs(),
            jti: Uuid::new_v4(),
        };
        Self::sign(keys, &claims)
    }

    fn sign(keys: &Keys, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::default(), claims, &keys.encoding).map_err(|e| {
            tracing::error!(error = %e, "JWT signing failed");
            TokenError::Signing
        })
    }

    fn verify(&self, keys: &Keys, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig::development())
    }

    #[test]
    fn test_access_token_round_trip() {
        let issuer = issuer();
        let user_id = UserId::new();
        let token = issuer.issue_access_token(user_id, UserRole::Admin).unwrap();

        let claims = issuer.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp - claims.iat, 20 * 60);
    }

    #[test]
    fn test_same_second_tokens_differ() {
        let issuer = issuer();
        let user_id = UserId::new();
        let a = issuer.issue_refresh_token(user_id, UserRole::User).unwrap();
        let b = issuer.issue_refresh_token(user_id, UserRole::User).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_kinds_are_not_interchangeable() {
        let issuer = issuer();
        let refresh = issuer.issue_refresh_token(UserId::new(), UserRole::User).unwrap();
        assert!(issuer.verify_access_token(&refresh).is_none());

        let access = issuer.issue_access_token(UserId::new(), UserRole::User).unwrap();
        assert_eq!(
            issuer.verify_refresh_token(&access),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issuer = issuer();
        let now = jsonwebtoken::get_current_timestamp();
        let claims = Claims {
            user_id: UserId::new(),
            role: UserRole::User,
            iat: now - 120,
            exp: now - 60,
            jti: Uuid::new_v4(),
        };
        let token = TokenIssuer::sign(&issuer.refresh, &claims).unwrap();
        assert_eq!(issuer.verify_refresh_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_is_rejected_without_panic() {
        let issuer = issuer();
        assert!(issuer.verify_access_token("").is_none());
        assert!(issuer.verify_access_token("a.b.c").is_none());
        assert_eq!(
            issuer.verify_refresh_token("not-a-jwt"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = issuer()
            .issue_access_token(UserId::new(), UserRole::User)
            .unwrap();
        assert!(issuer().verify_access_token(&token).is_none());
    }
}
