//! Filesystem-based media storage.
//!
//! Objects are written under `{base_path}/{key}` and published as
//! `{base_url}/{key}`. Point `base_url` at whatever serves `base_path`; it
//! defaults to a `file://` URL of the directory itself.

use crate::{MediaMetadata, MediaReference, MediaStorage, new_object_key};
use std::path::{Component, Path, PathBuf};
use storyteller_error::{StorageError, StorageErrorKind, StorytellerResult};

/// Filesystem storage backend.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
    base_url: String,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or resolved.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StorytellerResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;
        let base_path = std::fs::canonicalize(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;
        let base_url = format!("file://{}", base_path.display());

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        Ok(Self {
            base_path,
            base_url,
        })
    }

    /// Publish objects under a different URL prefix.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL prefix objects are published under.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Map a published URL back to a path inside the base directory.
    fn path_for_url(&self, url: &str) -> Result<PathBuf, StorageError> {
        let key = url
            .strip_prefix(&self.base_url)
            .map(|rest| rest.trim_start_matches('/'))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| StorageError::new(StorageErrorKind::InvalidPath(url.to_string())))?;

        let relative = Path::new(key);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(
                url.to_string(),
            )));
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait::async_trait]
impl MediaStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data, metadata), fields(size = data.len(), media_type = %metadata.media_type))]
    async fn store(
        &self,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> StorytellerResult<MediaReference> {
        let key = new_object_key(metadata.media_type, &metadata.mime_type);
        let path = self.base_path.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        let url = format!("{}/{}", self.base_url, key);
        tracing::info!(
            key = %key,
            size = data.len(),
            media_type = %metadata.media_type,
            "Stored media file"
        );

        Ok(MediaReference::new("filesystem", key, url, data, metadata))
    }

    #[tracing::instrument(skip(self))]
    async fn retrieve(&self, url: &str) -> StorytellerResult<Vec<u8>> {
        let path = self.path_for_url(url)?;

        let data = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(url.to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::debug!(path = %path.display(), size = data.len(), "Retrieved media file");
        Ok(data)
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
