//! Collaborators that work without network access.

use async_trait::async_trait;
use storyteller_core::GeneratedMedia;
use storyteller_error::{SpeechError, SpeechErrorKind, StorytellerResult};
use storyteller_interface::{ImageGenerator, NarrativeGenerator, SpeechSynthesizer};
use storyteller_story::fallback_pages;

/// Narrator that always tells the built-in story.
#[derive(Debug, Clone)]
pub struct OfflineNarrator {
    language: String,
    pages: u32,
}

impl OfflineNarrator {
    /// Narrator for `pages` pages in `language`.
    pub fn new(language: impl Into<String>, pages: u32) -> Self {
        Self {
            language: language.into(),
            pages,
        }
    }
}

#[async_trait]
impl NarrativeGenerator for OfflineNarrator {
    async fn generate(&self, _topic: &str) -> StorytellerResult<String> {
        Ok(fallback_pages(&self.language, self.pages)
            .into_iter()
            .map(|(page, text)| format!("[PAGE_{page}]\n{text}"))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    fn provider_name(&self) -> &'static str {
        "offline"
    }
}

const PALETTE: [&str; 6] = ["#ffd6a5", "#fdffb6", "#caffbf", "#9bf6ff", "#bdb2ff", "#ffc6ff"];

/// Illustrator that paints a plain placeholder picture.
///
/// With a reference, the placeholder reuses the reference's background
/// colour, so the chain stays visible in offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineIllustrator;

impl OfflineIllustrator {
    fn background(prompt: &str, reference: Option<&GeneratedMedia>) -> &'static str {
        let inherited = reference
            .and_then(|r| std::str::from_utf8(&r.data).ok())
            .and_then(|svg| PALETTE.iter().copied().find(|colour| svg.contains(colour)));
        match inherited {
            Some(colour) => colour,
            None => {
                let index = prompt.bytes().map(usize::from).sum::<usize>() % PALETTE.len();
                PALETTE[index]
            }
        }
    }
}

#[async_trait]
impl ImageGenerator for OfflineIllustrator {
    async fn generate(
        &self,
        prompt: &str,
        reference: Option<&GeneratedMedia>,
    ) -> StorytellerResult<GeneratedMedia> {
        let background = Self::background(prompt, reference);
        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512" viewBox="0 0 512 512"><rect width="512" height="512" fill="{background}"/><circle cx="256" cy="300" r="120" fill="#ffffff"/><circle cx="210" cy="170" r="40" fill="#ffffff"/><circle cx="302" cy="170" r="40" fill="#ffffff"/></svg>"##
        );
        Ok(GeneratedMedia::new("image/svg+xml", svg.into_bytes()))
    }

    fn provider_name(&self) -> &'static str {
        "offline"
    }
}

/// Speech synthesizer that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSpeech;

#[async_trait]
impl SpeechSynthesizer for OfflineSpeech {
    async fn synthesize(&self, _text: &str, _language: &str) -> StorytellerResult<GeneratedMedia> {
        Err(SpeechError::new(SpeechErrorKind::Request(
            "speech synthesis needs network access".to_string(),
        ))
        .into())
    }

    fn provider_name(&self) -> &'static str {
        "offline"
    }
}
