//! YouTube Video Id
//!
//! Admins paste either the bare id or a share link; only the id is stored.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::error::{CommunityError, CommunityResult};

const ID_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct YoutubeId(String);

impl YoutubeId {
    /// Accepts `dQw4w9WgXcQ`, `https://www.youtube.com/watch?v=dQw4w9WgXcQ`,
    /// `https://youtu.be/dQw4w9WgXcQ` and the `/embed/` and `/shorts/` forms
    pub fn parse(raw: &str) -> CommunityResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CommunityError::Validation("Video id is required".into()));
        }

        let candidate = match Url::parse(raw) {
            Ok(url) => from_link(&url).ok_or_else(invalid)?,
            Err(_) => raw.to_string(),
        };

        if candidate.is_empty()
            || candidate.len() > ID_MAX_LENGTH
            || !candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid());
        }
        Ok(Self(candidate))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for YoutubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid() -> CommunityError {
    CommunityError::Validation("Invalid YouTube video id".into())
}

fn from_link(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" => match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            "embed" | "shorts" | "live" => segments.next().map(str::to_string),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bare_id_and_links() {
        for raw in [
            "dQw4w9WgXcQ",
            " https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42 ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://m.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
        ] {
            assert_eq!(YoutubeId::parse(raw).unwrap().as_str(), "dQw4w9WgXcQ", "{raw:?}");
        }
    }

    #[test]
    fn test_rejects_other_input() {
        assert!(matches!(
            YoutubeId::parse("  "),
            Err(CommunityError::Validation(m)) if m == "Video id is required"
        ));
        for raw in [
            "https://vimeo.com/123",
            "https://www.youtube.com/channel/abc",
            "not an id",
            "https://youtube.com/watch?list=x",
        ] {
            assert!(YoutubeId::parse(raw).is_err(), "{raw:?}");
        }
    }
}
