//! Auth Middleware
//!
//! Bearer-token gate for protected routes. `require_auth` accepts any valid
//! access token, `require_role` additionally checks the role against an
//! allow-list. Both leave an [`AuthUser`] in the request extensions for
//! handlers to extract.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use kernel::id::UserId;

use crate::application::token::TokenIssuer;
use crate::domain::value_object::user_role::{UserRole, describe_roles};
use crate::error::{AuthError, AuthResult};

/// Administration endpoints
pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// Endpoints for any signed-in member
pub const MEMBERS: &[UserRole] = &[UserRole::User, UserRole::Admin];

/// Identity decoded from the access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Yields 401 when no gate ran in front of the handler
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}

/// Middleware state for `require_auth`
#[derive(Debug, Clone)]
pub struct AuthGate {
    tokens: Arc<TokenIssuer>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenIssuer>) -> Self {
        Self { tokens }
    }

    /// Decode `Authorization: Bearer <token>`
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<AuthUser> {
        let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() else {
            return Err(AuthError::Unauthenticated);
        };

        let claims = self
            .tokens
            .verify_access_token(bearer.token())
            .ok_or(AuthError::Unauthenticated)?;

        Ok(AuthUser {
            user_id: claims.user_id,
            role: claims.role,
        })
    }

    /// Gate restricted to `allowed`
    pub fn roles(&self, allowed: &'static [UserRole]) -> RoleGate {
        RoleGate {
            gate: self.clone(),
            allowed,
        }
    }
}

/// Middleware state for `require_role`
#[derive(Debug, Clone)]
pub struct RoleGate {
    gate: AuthGate,
    allowed: &'static [UserRole],
}

impl RoleGate {
    pub fn authorize(&self, headers: &HeaderMap) -> AuthResult<AuthUser> {
        let user = self.gate.authenticate(headers)?;
        if !self.allowed.contains(&user.role) {
            return Err(AuthError::RoleNotAllowed(describe_roles(self.allowed)));
        }
        Ok(user)
    }
}

/// Middleware that requires a valid access token
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = gate.authenticate(req.headers())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Middleware that requires a valid access token with an allowed role
pub async fn require_role(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = gate.authorize(req.headers())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use axum::http::{HeaderValue, header};

    fn gate() -> AuthGate {
        AuthGate::new(Arc::new(TokenIssuer::new(&AuthConfig::development())))
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let err = gate().authenticate(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let gate = gate();
        let user_id = UserId::new();
        let token = gate.tokens.issue_access_token(user_id, UserRole::User).unwrap();

        let user = gate.authenticate(&bearer(&token)).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, UserRole::User);
    }

    #[test]
    fn test_refresh_token_is_not_a_bearer() {
        let gate = gate();
        let token = gate.tokens.issue_refresh_token(UserId::new(), UserRole::Admin).unwrap();
        assert!(matches!(
            gate.authenticate(&bearer(&token)),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_role_gate_rejects_other_roles() {
        let gate = gate();
        let token = gate.tokens.issue_access_token(UserId::new(), UserRole::User).unwrap();

        let err = gate.roles(ADMIN_ONLY).authorize(&bearer(&token)).unwrap_err();
        assert_eq!(err.to_app_error().message(), "Access denied, admin only");
        assert!(gate.roles(MEMBERS).authorize(&bearer(&token)).is_ok());
    }
}
