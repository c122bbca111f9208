//! Application Configuration

use kernel::page::MAX_LIMIT;

/// Community application configuration
#[derive(Debug, Clone)]
pub struct CommunityConfig {
    /// Length of the per-day dashboard series, today included
    pub dashboard_days: u32,
    /// Public video list size when the client sends no `limit`
    pub video_limit: u32,
    /// Latest-user list size when the client sends no `limit`
    pub latest_users_limit: u32,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            dashboard_days: 10,
            video_limit: 10,
            latest_users_limit: 5,
        }
    }
}

impl CommunityConfig {
    /// Client `limit` clamped to `1..=MAX_LIMIT`, else `default`
    pub fn limit(requested: Option<u32>, default: u32) -> i64 {
        let limit = requested
            .filter(|l| *l > 0)
            .map(|l| l.min(MAX_LIMIT))
            .unwrap_or(default);
        i64::from(limit)
    }
}
