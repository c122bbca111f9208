//! Dashboard Aggregates

use auth::UserRole;
use chrono::{DateTime, Days, NaiveDate, Utc};
use kernel::id::UserId;

/// Rows created on one UTC day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// First instant of the oldest day in a `days`-long window ending `today`
pub fn window_start(today: NaiveDate, days: u32) -> DateTime<Utc> {
    let first = today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN);
    first.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// One entry per day of the window, newest first; days without rows are zero
pub fn fill_days(today: NaiveDate, days: u32, counts: &[DailyCount]) -> Vec<DailyCount> {
    (0..u64::from(days))
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DailyCount {
            date,
            count: counts
                .iter()
                .filter(|c| c.date == date)
                .map(|c| c.count)
                .sum(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardTotals {
    pub posts: i64,
    pub categories: i64,
    pub users: i64,
    pub comments: i64,
    pub sub_comments: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostStatusCounts {
    pub draft: i64,
    pub published: i64,
    pub blocked: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCount {
    pub role: UserRole,
    pub count: i64,
}

/// Blocked accounts are counted once, under `blocked`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStatusCounts {
    pub verified: i64,
    pub unverified: i64,
    pub blocked: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestUser {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}
