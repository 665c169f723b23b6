//! Image Uploads
//!
//! Stores uploaded event images on disk under collision-free names and hands
//! back the public URL they are served from.
//!
//! Only raster image types are accepted; SVG is refused because it can carry
//! script. When the client sends a generic content type the file extension is
//! used instead.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upload errors
#[derive(Error, Debug)]
pub enum UploadError {
    /// Request carried no file
    #[error("No file provided")]
    Missing,

    /// File has no content
    #[error("Uploaded file is empty")]
    Empty,

    /// Content type is not an accepted image type
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// File exceeds the configured size limit
    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    /// Writing the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Upload storage configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are written to
    pub dir: PathBuf,
    /// Maximum accepted file size in bytes
    pub max_bytes: usize,
    /// URL prefix the directory is served under
    pub public_path: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("eventdash_data/uploads"),
            max_bytes: 5 * 1024 * 1024, // 5MB
            public_path: "/uploads".to_string(),
        }
    }
}

/// A file written by [`UploadStore::save`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    /// Generated file name inside the upload directory
    pub file_name: String,
    /// Public URL of the file
    pub url: String,
}

/// Disk-backed store for uploaded images
#[derive(Debug, Clone)]
pub struct UploadStore {
    config: UploadConfig,
}

impl UploadStore {
    /// Create the store, creating the upload directory if needed
    pub fn new(config: UploadConfig) -> Result<Self, UploadError> {
        std::fs::create_dir_all(&config.dir)?;
        Ok(Self { config })
    }

    /// Directory uploads are written to
    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// URL prefix uploads are served under
    pub fn public_path(&self) -> &str {
        &self.config.public_path
    }

    pub fn max_bytes(&self) -> usize {
        self.config.max_bytes
    }

    /// Validate and persist an uploaded image
    pub async fn save(
        &self,
        content_type: Option<&str>,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        if bytes.len() > self.config.max_bytes {
            return Err(UploadError::TooLarge {
                size: bytes.len(),
                max: self.config.max_bytes,
            });
        }

        let extension = resolve_extension(content_type, original_name).ok_or_else(|| {
            UploadError::UnsupportedType(
                content_type
                    .or(original_name)
                    .unwrap_or("unknown")
                    .to_string(),
            )
        })?;

        let file_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
        tokio::fs::write(self.config.dir.join(&file_name), bytes).await?;

        let url = format!(
            "{}/{}",
            self.config.public_path.trim_end_matches('/'),
            file_name
        );

        tracing::info!(file = %file_name, size = bytes.len(), "Stored upload");

        Ok(StoredUpload {
            file_name,
            url,
        })
    }
}

/// Map an image content type to a file extension
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    match essence.as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        _ => None,
    }
}

/// Map a file name's extension to a normalized image extension
fn extension_for_file_name(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("png"),
        "jpg" | "jpeg" => Some("jpg"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        "avif" => Some("avif"),
        _ => None,
    }
}

fn resolve_extension(content_type: Option<&str>, original_name: Option<&str>) -> Option<&'static str> {
    match content_type {
        Some(ct) if !is_generic(ct) => extension_for_content_type(ct),
        _ => original_name.and_then(extension_for_file_name),
    }
}

fn is_generic(content_type: &str) -> bool {
    let ct = content_type.trim().to_lowercase();
    ct.is_empty() || ct.starts_with("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store(dir: &Path) -> UploadStore {
        UploadStore::new(UploadConfig {
            dir: dir.join("uploads"),
            max_bytes: 16,
            public_path: "/uploads/".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for_content_type("image/png"), Some("png"));
        assert_eq!(extension_for_content_type("IMAGE/JPEG; q=1"), Some("jpg"));
        assert_eq!(extension_for_content_type("text/plain"), None);
        assert_eq!(extension_for_content_type("image/svg+xml"), None);
    }

    #[test]
    fn test_generic_content_type_falls_back_to_name() {
        assert_eq!(
            resolve_extension(Some("application/octet-stream"), Some("cat.JPEG")),
            Some("jpg")
        );
        assert_eq!(resolve_extension(None, Some("notes.txt")), None);
        assert_eq!(resolve_extension(Some("text/html"), Some("cat.png")), None);
        assert_eq!(resolve_extension(Some("application/octet-stream"), Some("x.svg")), None);
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        let stored = store.save(Some("image/png"), Some("a.png"), b"png-bytes").await.unwrap();

        assert!(stored.url.starts_with("/uploads/"));
        assert!(stored.url.ends_with(".png"));
        assert!(!stored.url.contains("//"));
        let written = std::fs::read(store.dir().join(&stored.file_name)).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_uploads() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        assert!(matches!(
            store.save(Some("image/png"), None, b"").await,
            Err(UploadError::Empty)
        ));
        assert!(matches!(
            store.save(Some("text/plain"), None, b"hello").await,
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(matches!(
            store.save(Some("image/png"), None, &[0u8; 17]).await,
            Err(UploadError::TooLarge { size: 17, max: 16 })
        ));
    }
}
