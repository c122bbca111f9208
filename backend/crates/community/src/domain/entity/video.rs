//! YouTube Video Link

use chrono::{DateTime, Utc};
use kernel::id::VideoId;

use crate::domain::value_object::youtube_id::YoutubeId;
use crate::error::{CommunityError, CommunityResult};

pub const TITLE_MAX: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub video_id: YoutubeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    pub fn new(title: &str, video_id: &str) -> CommunityResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: VideoId::new(),
            title: video_title(title)?,
            video_id: YoutubeId::parse(video_id)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn edit(&mut self, title: &str, video_id: &str) -> CommunityResult<()> {
        self.title = video_title(title)?;
        self.video_id = YoutubeId::parse(video_id)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn video_title(raw: &str) -> CommunityResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(CommunityError::Validation("Title is required".into()));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(CommunityError::Validation(format!(
            "Title must be at most {TITLE_MAX} characters"
        )));
    }
    Ok(title.to_string())
}
