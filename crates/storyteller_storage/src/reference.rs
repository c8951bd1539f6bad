//! Metadata in, references out.

use crate::MediaType;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Metadata about media being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Type of media
    pub media_type: MediaType,
    /// MIME type (e.g., "image/png", "audio/mpeg")
    pub mime_type: String,
}

impl MediaMetadata {
    /// Describe media of a type and MIME type.
    pub fn new(media_type: MediaType, mime_type: impl Into<String>) -> Self {
        Self {
            media_type,
            mime_type: mime_type.into(),
        }
    }
}

/// Reference to stored media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    /// Unique identifier for this stored object
    pub id: Uuid,
    /// Backend-relative object key
    pub key: String,
    /// Publicly resolvable URL
    pub url: String,
    /// SHA-256 hash of the content
    pub content_hash: String,
    /// Storage backend name
    pub storage_backend: &'static str,
    /// Size of the media in bytes
    pub size_bytes: u64,
    /// Type of media
    pub media_type: MediaType,
    /// MIME type
    pub mime_type: String,
}

impl MediaReference {
    /// Build the reference for bytes stored at `key` and served from `url`.
    pub fn new(
        backend: &'static str,
        key: String,
        url: String,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
            url,
            content_hash: content_hash(data),
            storage_backend: backend,
            size_bytes: data.len() as u64,
            media_type: metadata.media_type,
            mime_type: metadata.mime_type.clone(),
        }
    }
}

/// Hex SHA-256 of `data`.
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
