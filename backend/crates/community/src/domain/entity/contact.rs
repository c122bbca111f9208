//! Contact Message

use auth::domain::value_object::email::Email;
use chrono::{DateTime, Utc};
use kernel::id::ContactId;

use crate::domain::value_object::contact_status::ContactStatus;
use crate::error::{CommunityError, CommunityResult};

pub const FULL_NAME_MAX: usize = 100;
pub const CONTENT_MAX: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub full_name: String,
    pub email: String,
    pub content: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Validated message from the public form, stored as pending
    pub fn submit(full_name: &str, email: &str, content: &str) -> CommunityResult<Self> {
        let email = Email::new(email)
            .map_err(|e| CommunityError::Validation(e.message().to_string()))?;
        let full_name = bounded(full_name, FULL_NAME_MAX, "Full name")?;
        let content = bounded(content, CONTENT_MAX, "Content")?;

        let now = Utc::now();
        Ok(Self {
            id: ContactId::new(),
            full_name,
            email: email.into_db(),
            content,
            status: ContactStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

fn bounded(raw: &str, max: usize, field: &str) -> CommunityResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(CommunityError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(CommunityError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_validates_fields() {
        let contact = Contact::submit(" Nguyễn Văn A ", "A@Example.com", "Xin chào").unwrap();
        assert_eq!(contact.full_name, "Nguyễn Văn A");
        assert_eq!(contact.email, "a@example.com");
        assert_eq!(contact.status, ContactStatus::Pending);

        let bad_email = Contact::submit("A", "not-an-email", "hi").unwrap_err();
        assert_eq!(bad_email.to_string(), "Invalid email");

        let blank = Contact::submit("  ", "a@example.com", "hi").unwrap_err();
        assert_eq!(blank.to_string(), "Full name is required");

        let long = "x".repeat(CONTENT_MAX + 1);
        assert!(Contact::submit("A", "a@example.com", &long).is_err());
    }
}
