use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Pending,
    Resolved,
}

impl ContactStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Resolved => "resolved",
        }
    }

    /// Unknown codes read as pending
    pub fn from_code(code: &str) -> Self {
        match code {
            "resolved" => ContactStatus::Resolved,
            _ => ContactStatus::Pending,
        }
    }
}
