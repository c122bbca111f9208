//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::{CookieConfig, SameSite};
use thiserror::Error;

const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(20 * 60);
const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(24 * 3600);

/// Name of the cookie carrying the refresh token
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}")]
    Invalid(&'static str),
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 secret for access tokens
    pub access_secret: Vec<u8>,
    /// HS256 secret for refresh tokens
    pub refresh_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    /// Frontend origin used in mailed links
    pub app_url: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("app_url", &self.app_url)
            .field("cookie_secure", &self.cookie_secure)
            .field("password_pepper", &self.password_pepper.is_some())
            .finish_non_exhaustive()
    }
}

fn random_secret() -> Vec<u8> {
    use rand::RngCore;
    let mut secret = vec![0u8; 32];
    rand::rng().fill_bytes(&mut secret);
    secret
}

fn env_secs(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

fn required_secret(name: &'static str) -> Result<Vec<u8>, ConfigError> {
    let value = std::env::var(name).map_err(|_| ConfigError::Missing(name))?;
    if value.trim().is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(value.into_bytes())
}

impl AuthConfig {
    /// Read `JWT_*`, `APP_URL`, `COOKIE_SECURE` and `PASSWORD_PEPPER`
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            access_secret: required_secret("JWT_ACCESS_SECRET")?,
            refresh_secret: required_secret("JWT_REFRESH_SECRET")?,
            access_ttl: env_secs("JWT_ACCESS_TTL_SECS", DEFAULT_ACCESS_TTL)?,
            refresh_ttl: env_secs("JWT_REFRESH_TTL_SECS", DEFAULT_REFRESH_TTL)?,
            app_url: std::env::var("APP_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            password_pepper: std::env::var("PASSWORD_PEPPER")
                .ok()
                .filter(|p| !p.is_empty())
                .map(String::into_bytes),
        })
    }

    /// Random secrets and an insecure cookie (local runs and tests)
    pub fn development() -> Self {
        Self {
            access_secret: random_secret(),
            refresh_secret: random_secret(),
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
            app_url: "http://localhost:3000".to_string(),
            cookie_secure: false,
            password_pepper: None,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Attributes of the `refreshToken` cookie
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: REFRESH_COOKIE_NAME.to_string(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age_secs: Some(self.refresh_ttl.as_secs() as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_secrets_differ() {
        let config = AuthConfig::development();
        assert_eq!(config.access_secret.len(), 32);
        assert_ne!(config.access_secret, config.refresh_secret);
    }

    #[test]
    fn test_refresh_cookie_matches_ttl() {
        let config = AuthConfig::development();
        let cookie = config.refresh_cookie().build_set_cookie("t");
        assert!(cookie.starts_with("refreshToken=t"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", AuthConfig::development());
        assert!(!debug.contains("access_secret"));
    }
}
