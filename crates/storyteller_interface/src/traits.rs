//! Collaborator traits.

use async_trait::async_trait;
use storyteller_core::GeneratedMedia;
use storyteller_error::StorytellerResult;

/// Writes the text of a whole story in one call.
///
/// The returned text introduces each page with a `[PAGE_n]` marker.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Generate page-delimited story text about `topic`.
    async fn generate(&self, topic: &str) -> StorytellerResult<String>;

    /// Provider name used in logs (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Draws illustrations, optionally in the style of a reference image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image for `prompt`.
    ///
    /// When `reference` is given, the art style and character appearance of
    /// the reference should carry over into the new image. A policy refusal
    /// is an error, not an empty image.
    async fn generate(
        &self,
        prompt: &str,
        reference: Option<&GeneratedMedia>,
    ) -> StorytellerResult<GeneratedMedia>;

    /// Provider name used in logs.
    fn provider_name(&self) -> &'static str;
}

/// Reads text aloud.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` in `language` (a short code like "ja" or a locale like "en-US").
    async fn synthesize(&self, text: &str, language: &str) -> StorytellerResult<GeneratedMedia>;

    /// Provider name used in logs.
    fn provider_name(&self) -> &'static str;
}
