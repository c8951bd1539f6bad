//! Backend selection.

use crate::{FileSystemStorage, GcsStorage, MediaStorage, MemoryStorage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use storyteller_error::StorytellerResult;

/// Which storage backend to use, as written in the `[storage]` table.
///
/// ```toml
/// [storage]
/// backend = "gcs"
/// bucket = "my-story-bucket"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Local directory
    Filesystem {
        /// Directory objects are written to
        path: PathBuf,
        /// URL prefix that serves `path`, defaults to a `file://` URL
        #[serde(default)]
        base_url: Option<String>,
    },
    /// Google Cloud Storage bucket
    Gcs {
        /// Bucket name
        bucket: String,
        /// Environment variable holding an OAuth access token
        #[serde(default = "default_token_env")]
        token_env: String,
        /// Public URL prefix override
        #[serde(default)]
        public_base_url: Option<String>,
    },
    /// Process memory, lost on exit
    Memory,
}

fn default_token_env() -> String {
    "GCS_ACCESS_TOKEN".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Filesystem {
            path: PathBuf::from("media"),
            base_url: None,
        }
    }
}

/// Build the configured backend.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or credentials are missing.
pub fn build_storage(config: &StorageConfig) -> StorytellerResult<Arc<dyn MediaStorage>> {
    let storage: Arc<dyn MediaStorage> = match config {
        StorageConfig::Filesystem { path, base_url } => {
            let storage = FileSystemStorage::new(path)?;
            match base_url {
                Some(url) => Arc::new(storage.with_base_url(url)),
                None => Arc::new(storage),
            }
        }
        StorageConfig::Gcs {
            bucket,
            token_env,
            public_base_url,
        } => {
            let storage = GcsStorage::from_env(bucket, token_env)?;
            match public_base_url {
                Some(url) => Arc::new(storage.with_public_base(url)),
                None => Arc::new(storage),
            }
        }
        StorageConfig::Memory => Arc::new(MemoryStorage::new()),
    };
    tracing::info!(backend = storage.backend_name(), "Configured media storage");
    Ok(storage)
}
