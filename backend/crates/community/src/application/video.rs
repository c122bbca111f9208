//! Video Use Case
//!
//! Admin-curated catalog of YouTube links.

use std::sync::Arc;

use kernel::id::VideoId;
use kernel::page::{Page, PageQuery};

use crate::application::config::CommunityConfig;
use crate::domain::entity::video::Video;
use crate::domain::repository::VideoRepository;
use crate::error::{CommunityError, CommunityResult};

pub struct VideoUseCase<V>
where
    V: VideoRepository,
{
    videos: Arc<V>,
    config: Arc<CommunityConfig>,
}

impl<V> VideoUseCase<V>
where
    V: VideoRepository,
{
    pub fn new(videos: Arc<V>, config: Arc<CommunityConfig>) -> Self {
        Self { videos, config }
    }

    pub async fn create(&self, title: &str, video_id: &str) -> CommunityResult<Video> {
        let video = Video::new(title, video_id)?;
        self.videos.insert_video(&video).await?;

        tracing::info!(video_id = %video.id, youtube_id = %video.video_id, "Video created");
        Ok(video)
    }

    pub async fn update(&self, id: VideoId, title: &str, video_id: &str) -> CommunityResult<Video> {
        let mut video = self
            .videos
            .find_video(&id)
            .await?
            .ok_or(CommunityError::VideoNotFound)?;
        video.edit(title, video_id)?;
        self.videos.update_video(&video).await?;

        tracing::info!(video_id = %video.id, "Video updated");
        Ok(video)
    }

    /// Newest first, optionally filtered by title
    pub async fn latest(&self, keyword: Option<&str>, limit: Option<u32>) -> CommunityResult<Vec<Video>> {
        let limit = CommunityConfig::limit(limit, self.config.video_limit);
        self.videos.list_videos(keyword_filter(keyword), limit, 0).await
    }

    pub async fn page(&self, keyword: Option<&str>, page: PageQuery) -> CommunityResult<Page<Video>> {
        let keyword = keyword_filter(keyword);
        let total = self.videos.count_videos(keyword).await?;
        let items = self
            .videos
            .list_videos(keyword, i64::from(page.limit()), page.offset())
            .await?;
        Ok(Page::new(items, total, &page))
    }

    pub async fn delete_many(&self, ids: &[VideoId]) -> CommunityResult<u64> {
        let deleted = self.videos.delete_videos(ids).await?;
        if deleted == 0 {
            return Err(CommunityError::VideoNotFound);
        }

        tracing::info!(requested = ids.len(), deleted, "Videos deleted");
        Ok(deleted)
    }
}

fn keyword_filter(keyword: Option<&str>) -> Option<&str> {
    keyword.map(str::trim).filter(|k| !k.is_empty())
}
