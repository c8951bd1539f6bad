//! Google Cloud Storage backend.
//!
//! Uploads go through the JSON API's simple media upload with a `publicRead`
//! ACL, so every object is served at `https://storage.googleapis.com/{bucket}/{key}`.

use crate::{MediaMetadata, MediaReference, MediaStorage, new_object_key};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use storyteller_error::{StorageError, StorageErrorKind, StorytellerResult};

const UPLOAD_BASE: &str = "https://storage.googleapis.com/upload/storage/v1";
const PUBLIC_BASE: &str = "https://storage.googleapis.com";

/// Cloud Storage bucket with publicly readable objects.
#[derive(Clone)]
pub struct GcsStorage {
    client: Client,
    bucket: String,
    access_token: String,
    upload_base: String,
    public_base: String,
}

impl std::fmt::Debug for GcsStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcsStorage")
            .field("bucket", &self.bucket)
            .field("upload_base", &self.upload_base)
            .field("public_base", &self.public_base)
            .finish_non_exhaustive()
    }
}

impl GcsStorage {
    /// Create a backend for `bucket` authenticated with an OAuth access token.
    pub fn new(bucket: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bucket: bucket.into(),
            access_token: access_token.into(),
            upload_base: UPLOAD_BASE.to_string(),
            public_base: PUBLIC_BASE.to_string(),
        }
    }

    /// Create a backend reading the access token from `token_env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or empty.
    pub fn from_env(bucket: impl Into<String>, token_env: &str) -> StorytellerResult<Self> {
        let token = std::env::var(token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::InvalidConfig(format!(
                    "{token_env} environment variable not set"
                )))
            })?;
        Ok(Self::new(bucket, token))
    }

    /// Override the upload endpoint (emulators and tests).
    pub fn with_upload_base(mut self, url: impl Into<String>) -> Self {
        self.upload_base = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the public URL prefix (CDN or emulator).
    pub fn with_public_base(mut self, url: impl Into<String>) -> Self {
        self.public_base = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Public URL of an object key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket, key)
    }
}

#[async_trait::async_trait]
impl MediaStorage for GcsStorage {
    #[tracing::instrument(skip(self, data, metadata), fields(bucket = %self.bucket, size = data.len()))]
    async fn store(
        &self,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> StorytellerResult<MediaReference> {
        let key = new_object_key(metadata.media_type, &metadata.mime_type);
        let endpoint = format!("{}/b/{}/o", self.upload_base, self.bucket);

        let response = self
            .client
            .post(&endpoint)
            .query(&[
                ("uploadType", "media"),
                ("name", key.as_str()),
                ("predefinedAcl", "publicRead"),
            ])
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, metadata.mime_type.as_str())
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Upload(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::new(StorageErrorKind::Upload(format!(
                "HTTP {status}: {body}"
            )))
            .into());
        }

        let url = self.public_url(&key);
        tracing::info!(key = %key, url = %url, "Uploaded media object");
        Ok(MediaReference::new("gcs", key, url, data, metadata))
    }

    #[tracing::instrument(skip(self))]
    async fn retrieve(&self, url: &str) -> StorytellerResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Download(e.to_string())))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::new(StorageErrorKind::NotFound(url.to_string())).into());
        }
        if !status.is_success() {
            return Err(StorageError::new(StorageErrorKind::Download(format!(
                "HTTP {}: {}",
                status.as_u16(),
                url
            )))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Download(e.to_string())))?;
        Ok(bytes.to_vec())
    }

    fn backend_name(&self) -> &'static str {
        "gcs"
    }
}
