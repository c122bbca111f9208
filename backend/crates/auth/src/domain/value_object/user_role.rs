use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of roles; the `roles` table holds one row per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
    Master,
}

/// Role name that is not one of [`UserRole`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::User, UserRole::Master];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "admin",
            User => "user",
            Master => "master",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Result<Self, UnknownRole> {
        use UserRole::*;
        match code.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Admin),
            "user" => Ok(User),
            "master" => Ok(Master),
            other => Err(UnknownRole(other.to_string())),
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Role allow-list rendered the way the gate reports it: `admin, user`
pub fn describe_roles(roles: &[UserRole]) -> String {
    roles
        .iter()
        .map(UserRole::code)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("admin"), Ok(UserRole::Admin));
        assert_eq!(UserRole::from_code("user"), Ok(UserRole::User));
        assert_eq!(UserRole::from_code(" Master "), Ok(UserRole::Master));
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        assert_eq!(
            UserRole::from_code("moderator"),
            Err(UnknownRole("moderator".into()))
        );
        assert!("".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_code_round_trips_for_every_role() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::from_code(role.code()), Ok(role));
            assert_eq!(role.to_string(), role.code());
        }
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let role: UserRole = serde_json::from_str("\"master\"").unwrap();
        assert_eq!(role, UserRole::Master);
    }

    #[test]
    fn test_describe_roles() {
        assert_eq!(describe_roles(&[UserRole::User, UserRole::Admin]), "user, admin");
    }
}
