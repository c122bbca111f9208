//! Application Configuration

use kernel::page::MAX_LIMIT;

/// Content application configuration
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Category name listed last in the public category list
    pub fallback_category: String,
    /// Random suffixes tried when a category slug is taken
    pub slug_attempts: u32,
    /// Size of the latest, most-viewed, related and popular-tag feeds when
    /// the client sends no `limit`
    pub feed_limit: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            fallback_category: "Khác".to_string(),
            slug_attempts: 20,
            feed_limit: 5,
        }
    }
}

impl ContentConfig {
    /// Read `CONTENT_FALLBACK_CATEGORY`; everything else keeps its default
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            fallback_category: std::env::var("CONTENT_FALLBACK_CATEGORY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.fallback_category),
            ..defaults
        }
    }

    /// Clamp a client `limit` to `1..=MAX_LIMIT`
    pub fn feed_limit(&self, requested: Option<u32>) -> i64 {
        let limit = requested
            .filter(|l| *l > 0)
            .map(|l| l.min(MAX_LIMIT))
            .unwrap_or(self.feed_limit);
        i64::from(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_limit() {
        let config = ContentConfig::default();
        assert_eq!(config.feed_limit(None), 5);
        assert_eq!(config.feed_limit(Some(0)), 5);
        assert_eq!(config.feed_limit(Some(12)), 12);
        assert_eq!(config.feed_limit(Some(10_000)), i64::from(MAX_LIMIT));
    }
}
