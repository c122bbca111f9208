//! Dashboard Use Case
//!
//! Read-only aggregates for the admin dashboard.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::CommunityConfig;
use crate::domain::entity::dashboard::{
    DailyCount, DashboardTotals, LatestUser, PostStatusCounts, RoleCount, UserStatusCounts,
    fill_days, window_start,
};
use crate::domain::repository::DashboardRepository;
use crate::error::CommunityResult;

pub struct DashboardUseCase<D>
where
    D: DashboardRepository,
{
    stats: Arc<D>,
    config: Arc<CommunityConfig>,
}

impl<D> DashboardUseCase<D>
where
    D: DashboardRepository,
{
    pub fn new(stats: Arc<D>, config: Arc<CommunityConfig>) -> Self {
        Self { stats, config }
    }

    pub async fn posts_per_day(&self) -> CommunityResult<Vec<DailyCount>> {
        let today = Utc::now().date_naive();
        let days = self.config.dashboard_days;
        let counts = self.stats.posts_per_day(window_start(today, days)).await?;
        Ok(fill_days(today, days, &counts))
    }

    pub async fn users_per_day(&self) -> CommunityResult<Vec<DailyCount>> {
        let today = Utc::now().date_naive();
        let days = self.config.dashboard_days;
        let counts = self.stats.users_per_day(window_start(today, days)).await?;
        Ok(fill_days(today, days, &counts))
    }

    pub async fn totals(&self) -> CommunityResult<DashboardTotals> {
        self.stats.totals().await
    }

    pub async fn latest_users(&self, limit: Option<u32>) -> CommunityResult<Vec<LatestUser>> {
        let limit = CommunityConfig::limit(limit, self.config.latest_users_limit);
        self.stats.latest_users(limit).await
    }

    pub async fn post_counts(&self) -> CommunityResult<PostStatusCounts> {
        self.stats.post_counts_by_status().await
    }

    pub async fn role_counts(&self) -> CommunityResult<Vec<RoleCount>> {
        self.stats.user_counts_by_role().await
    }

    pub async fn user_status_counts(&self) -> CommunityResult<UserStatusCounts> {
        self.stats.user_counts_by_status().await
    }
}
