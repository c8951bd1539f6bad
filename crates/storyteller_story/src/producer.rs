//! Illustration and narration production.

use crate::illustration_prompt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use storyteller_core::{AudioClip, GeneratedMedia, ReferenceFallback, StoryConfig};
use storyteller_error::{AssetError, AssetErrorKind};
use storyteller_interface::{ImageGenerator, SpeechSynthesizer};
use storyteller_storage::{MediaMetadata, MediaStorage, MediaType};
use tracing::{debug, instrument, warn};

// Rough reading speed used for the duration estimate.
const SECONDS_PER_CHAR: f32 = 0.1;

/// Turns page text into stored media.
///
/// Failures come back as [`AssetError`] values; nothing here panics or
/// retries on its own.
pub struct AssetProducer {
    images: Arc<dyn ImageGenerator>,
    speech: Arc<dyn SpeechSynthesizer>,
    storage: Arc<dyn MediaStorage>,
    timeout: Duration,
    reference_fallback: ReferenceFallback,
}

impl std::fmt::Debug for AssetProducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetProducer")
            .field("images", &self.images.provider_name())
            .field("speech", &self.speech.provider_name())
            .field("storage", &self.storage.backend_name())
            .field("timeout", &self.timeout)
            .field("reference_fallback", &self.reference_fallback)
            .finish()
    }
}

impl AssetProducer {
    /// Create a producer over the given collaborators.
    pub fn new(
        images: Arc<dyn ImageGenerator>,
        speech: Arc<dyn SpeechSynthesizer>,
        storage: Arc<dyn MediaStorage>,
        config: &StoryConfig,
    ) -> Self {
        Self {
            images,
            speech,
            storage,
            timeout: config.asset_timeout(),
            reference_fallback: *config.reference_fallback(),
        }
    }

    /// Draw and store one page's illustration, returning its public URL.
    ///
    /// With a reference URL the stored image at that URL is attached so the
    /// new illustration keeps the same look.
    #[instrument(skip_all, fields(has_reference = reference_url.is_some(), chars = scene_text.chars().count()))]
    pub async fn produce_image(
        &self,
        scene_text: &str,
        reference_url: Option<&str>,
    ) -> Result<String, AssetError> {
        self.bounded(self.draw(scene_text, reference_url)).await
    }

    /// Narrate text and store the clip.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn produce_audio(&self, text: &str, language: &str) -> Result<AudioClip, AssetError> {
        self.bounded(self.narrate(text, language)).await
    }

    async fn bounded<T>(
        &self,
        work: impl Future<Output = Result<T, AssetError>>,
    ) -> Result<T, AssetError> {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(timeout_ms = millis, "Asset production timed out");
                Err(AssetError::new(AssetErrorKind::Timeout(millis)))
            }
        }
    }

    async fn draw(&self, scene_text: &str, reference_url: Option<&str>) -> Result<String, AssetError> {
        let reference = match reference_url {
            None => None,
            Some(url) => match self.fetch_reference(url).await {
                Ok(reference) => Some(reference),
                Err(e) if self.reference_fallback == ReferenceFallback::Standalone => {
                    warn!(error = %e, "Reference unavailable, drawing without it");
                    None
                }
                Err(e) => return Err(e),
            },
        };

        let prompt = illustration_prompt(scene_text, reference.is_some());
        let image = self
            .images
            .generate(&prompt, reference.as_ref())
            .await
            .map_err(|e| AssetError::new(AssetErrorKind::Generation(e.to_string())))?;
        if image.is_empty() {
            return Err(AssetError::new(AssetErrorKind::EmptyResponse));
        }

        let url = self.upload(MediaType::Image, image).await?;
        debug!(url = %url, provider = self.images.provider_name(), "Illustration stored");
        Ok(url)
    }

    async fn narrate(&self, text: &str, language: &str) -> Result<AudioClip, AssetError> {
        let audio = self
            .speech
            .synthesize(text, language)
            .await
            .map_err(|e| AssetError::new(AssetErrorKind::Generation(e.to_string())))?;
        if audio.is_empty() {
            return Err(AssetError::new(AssetErrorKind::EmptyResponse));
        }

        let audio_url = self.upload(MediaType::Audio, audio).await?;
        debug!(url = %audio_url, provider = self.speech.provider_name(), "Narration stored");
        Ok(AudioClip {
            audio_url,
            language: language.to_string(),
            duration_estimate_secs: text.chars().count() as f32 * SECONDS_PER_CHAR,
        })
    }

    async fn fetch_reference(&self, url: &str) -> Result<GeneratedMedia, AssetError> {
        let data = self
            .storage
            .retrieve(url)
            .await
            .map_err(|e| AssetError::new(AssetErrorKind::ReferenceFetch(e.to_string())))?;
        if data.is_empty() {
            return Err(AssetError::new(AssetErrorKind::ReferenceFetch(format!(
                "{url} is empty"
            ))));
        }
        Ok(GeneratedMedia::new(image_mime_for(url), data))
    }

    async fn upload(&self, media_type: MediaType, media: GeneratedMedia) -> Result<String, AssetError> {
        let metadata = MediaMetadata::new(media_type, media.mime_type);
        self.storage
            .store(&media.data, &metadata)
            .await
            .map(|stored| stored.url)
            .map_err(|e| AssetError::new(AssetErrorKind::Upload(e.to_string())))
    }
}

fn image_mime_for(url: &str) -> &'static str {
    let extension = url
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "image/png",
    }
}
