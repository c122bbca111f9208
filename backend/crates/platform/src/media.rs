//! Media Storage
//!
//! Uploaded images (post thumbnails, inline post images, avatars) are written
//! to a local directory and addressed by public URL. Removal is keyed by that
//! URL so callers never handle filesystem paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// URL path segment under which the media directory is served
pub const MEDIA_ROUTE: &str = "/uploads";

const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("File too large: {actual} bytes (max {max})")]
    TooLarge { max: usize, actual: usize },

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Media storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Media storage configuration
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory the files are written to
    pub dir: PathBuf,
    /// Public origin, e.g. `http://localhost:8000`
    pub base_url: String,
    pub max_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./public/uploads"),
            base_url: "http://localhost:8000".to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl MediaConfig {
    /// Read `MEDIA_DIR` and `MEDIA_BASE_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dir: std::env::var("MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dir),
            base_url: std::env::var("MEDIA_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            max_bytes: defaults.max_bytes,
        }
    }

    fn url_prefix(&self) -> String {
        format!("{}{}/", self.base_url, MEDIA_ROUTE)
    }
}

/// An uploaded file as received from a multipart field
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub url: String,
}

#[trait_variant::make(MediaStore: Send)]
pub trait LocalMediaStore {
    /// Validate and persist an upload, returning its public URL
    async fn save(&self, upload: Upload) -> Result<StoredMedia, MediaError>;

    /// Delete by public URL; `Ok(false)` if it was not ours or already gone
    async fn remove(&self, url: &str) -> Result<bool, MediaError>;
}

/// Delete a stored file, logging instead of failing
///
/// Used for compensating deletes, where the primary error (or success) has
/// already been decided and a storage hiccup must not change it.
pub async fn discard<S: MediaStore + Sync>(store: &S, url: &str) {
    match store.remove(url).await {
        Ok(true) => tracing::debug!(url = %url, "Discarded media"),
        Ok(false) => tracing::debug!(url = %url, "Media already gone"),
        Err(e) => tracing::warn!(url = %url, error = %e, "Failed to discard media"),
    }
}

/// Map an upload to the extension we store it under
fn image_extension(upload: &Upload) -> Result<&'static str, MediaError> {
    let from_type = upload.content_type.as_deref().map(|ct| match ct {
        "image/jpeg" | "image/jpg" => Ok("jpg"),
        "image/png" => Ok("png"),
        "image/gif" => Ok("gif"),
        "image/webp" => Ok("webp"),
        other => Err(MediaError::UnsupportedType(other.to_string())),
    });
    if let Some(result) = from_type {
        return result;
    }

    let ext = upload
        .file_name
        .as_deref()
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg" | "jpeg") => Ok("jpg"),
        Some("png") => Ok("png"),
        Some("gif") => Ok("gif"),
        Some("webp") => Ok("webp"),
        other => Err(MediaError::UnsupportedType(
            other.unwrap_or("unknown").to_string(),
        )),
    }
}

/// Local-disk media store
#[derive(Debug, Clone)]
pub struct DiskMediaStore {
    config: Arc<MediaConfig>,
}

impl DiskMediaStore {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// File name inside the media dir for one of our URLs
    fn file_name_for<'a>(&self, url: &'a str) -> Option<&'a str> {
        let prefix = self.config.url_prefix();
        let name = url.strip_prefix(prefix.as_str())?;
        let is_plain = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !name.starts_with('.');
        is_plain.then_some(name)
    }
}

impl MediaStore for DiskMediaStore {
    async fn save(&self, upload: Upload) -> Result<StoredMedia, MediaError> {
        if upload.bytes.is_empty() {
            return Err(MediaError::Empty);
        }
        if upload.bytes.len() > self.config.max_bytes {
            return Err(MediaError::TooLarge {
                max: self.config.max_bytes,
                actual: upload.bytes.len(),
            });
        }
        let ext = image_extension(&upload)?;

        tokio::fs::create_dir_all(&self.config.dir).await?;

        let name = format!("{}.{}", nid::Nanoid::<21>::new(), ext);
        tokio::fs::write(self.config.dir.join(&name), &upload.bytes).await?;

        tracing::debug!(file = %name, bytes = upload.bytes.len(), "Stored media");

        Ok(StoredMedia {
            url: format!("{}{}", self.config.url_prefix(), name),
        })
    }

    async fn remove(&self, url: &str) -> Result<bool, MediaError> {
        let Some(name) = self.file_name_for(url) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(self.config.dir.join(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DiskMediaStore, MediaConfig, MediaError, MediaStore, Upload, image_extension,
    };

    fn store() -> DiskMediaStore {
        let dir = std::env::temp_dir().join(format!("media-test-{}", nid::Nanoid::<12>::new()));
        DiskMediaStore::new(MediaConfig {
            dir,
            base_url: "http://cdn.test".to_string(),
            max_bytes: 16,
        })
    }

    fn png(bytes: &[u8]) -> Upload {
        Upload {
            file_name: Some("a.png".into()),
            content_type: Some("image/png".into()),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_save_then_remove() {
        let store = store();
        let stored = store.save(png(b"\x89PNG")).await.unwrap();
        assert!(stored.url.starts_with("http://cdn.test/uploads/"));
        assert!(stored.url.ends_with(".png"));

        assert!(store.remove(&stored.url).await.unwrap());
        assert!(!store.remove(&stored.url).await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_bad_uploads() {
        let store = store();
        assert!(matches!(store.save(png(b"")).await, Err(MediaError::Empty)));
        assert!(matches!(
            store.save(png(&[0u8; 17])).await,
            Err(MediaError::TooLarge { max: 16, actual: 17 })
        ));

        let pdf = Upload {
            file_name: Some("cv.pdf".into()),
            content_type: Some("application/pdf".into()),
            bytes: b"%PDF".to_vec(),
        };
        assert!(matches!(
            store.save(pdf).await,
            Err(MediaError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_extension_falls_back_to_file_name() {
        let upload = Upload {
            file_name: Some("photo.JPEG".into()),
            content_type: None,
            bytes: vec![1],
        };
        assert_eq!(image_extension(&upload).unwrap(), "jpg");
    }

    #[tokio::test]
    async fn test_remove_ignores_foreign_and_traversal_urls() {
        let store = store();
        assert!(!store.remove("https://elsewhere.test/uploads/x.png").await.unwrap());
        assert!(!store.remove("http://cdn.test/uploads/../secret").await.unwrap());
        assert!(!store.remove("http://cdn.test/uploads/").await.unwrap());
    }
}
