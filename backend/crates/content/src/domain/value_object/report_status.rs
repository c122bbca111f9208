use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Resolved,
}

impl ReportStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Resolved => "resolved",
        }
    }

    /// Unknown codes read as pending
    pub fn from_code(code: &str) -> Self {
        match code {
            "resolved" => ReportStatus::Resolved,
            _ => ReportStatus::Pending,
        }
    }
}
