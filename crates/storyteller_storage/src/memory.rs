//! In-process storage.

use crate::{MediaMetadata, MediaReference, MediaStorage, new_object_key};
use std::collections::HashMap;
use std::sync::Arc;
use storyteller_error::{StorageError, StorageErrorKind, StorytellerResult};
use tokio::sync::RwLock;

const SCHEME: &str = "memory://";

/// Storage that keeps objects in memory under `memory://` URLs.
///
/// Clones share the same objects. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait::async_trait]
impl MediaStorage for MemoryStorage {
    async fn store(
        &self,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> StorytellerResult<MediaReference> {
        let key = new_object_key(metadata.media_type, &metadata.mime_type);
        let url = format!("{SCHEME}{key}");
        self.objects.write().await.insert(url.clone(), data.to_vec());
        tracing::debug!(url = %url, size = data.len(), "Stored media in memory");
        Ok(MediaReference::new("memory", key, url, data, metadata))
    }

    async fn retrieve(&self, url: &str) -> StorytellerResult<Vec<u8>> {
        if !url.starts_with(SCHEME) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(url.to_string())).into());
        }
        self.objects
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(url.to_string())).into())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
