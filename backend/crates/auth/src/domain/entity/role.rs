//! Role registry row

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Uuid,
    pub name: UserRole,
    pub created_at: DateTime<Utc>,
}

impl Role {
    pub fn new(name: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        }
    }
}
