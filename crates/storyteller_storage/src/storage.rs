//! Storage backend trait.

use crate::{MediaMetadata, MediaReference};
use storyteller_error::StorytellerResult;

/// Trait for pluggable media storage backends.
///
/// Objects are written once and read back by the URL returned from `store`.
#[async_trait::async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store media and return a reference carrying its public URL.
    ///
    /// Each call writes a new object under a fresh, collision-resistant key.
    async fn store(&self, data: &[u8], metadata: &MediaMetadata)
    -> StorytellerResult<MediaReference>;

    /// Fetch the bytes behind a URL previously returned by `store`.
    async fn retrieve(&self, url: &str) -> StorytellerResult<Vec<u8>>;

    /// Backend name (e.g., "filesystem", "gcs", "memory").
    fn backend_name(&self) -> &'static str;
}
