//! Story text generation.

use super::{Content, GeminiClient, GenerateContentRequest, GenerationConfig, Part};
use async_trait::async_trait;
use storyteller_error::{GeminiError, GeminiErrorKind, StorytellerResult};
use storyteller_interface::NarrativeGenerator;
use tracing::{info, instrument};

/// Prompt asking for a `pages`-page children's story about `topic`.
///
/// Each page is introduced by a `[PAGE_n]` marker on its own line.
pub fn story_prompt(topic: &str, pages: u32, language: &str) -> String {
    let markers = (1..=pages)
        .map(|n| format!("[PAGE_{n}]"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are a children's picture-book author. Write a gentle, heart-warming story \
         about \"{topic}\" for children aged 3 to 8.\n\
         \n\
         Rules:\n\
         - Exactly {pages} pages, introduced in order by the markers {markers}, each on its own line.\n\
         - Two or three short sentences per page, each page easy to picture as a single illustration.\n\
         - Keep the same main character on every page.\n\
         - Nothing frightening or violent. Finish happily on the last page.\n\
         - Write the story in the language with code \"{language}\".\n\
         - Output only the pages: no title, no commentary."
    )
}

/// Writes stories with a Gemini text model.
#[derive(Debug, Clone)]
pub struct GeminiNarrator {
    client: GeminiClient,
    model: String,
    pages: u32,
    language: String,
}

impl GeminiNarrator {
    /// Narrator writing `pages`-page stories in `language`.
    pub fn new(
        client: GeminiClient,
        model: impl Into<String>,
        pages: u32,
        language: impl Into<String>,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            pages,
            language: language.into(),
        }
    }
}

#[async_trait]
impl NarrativeGenerator for GeminiNarrator {
    #[instrument(skip(self), fields(model = %self.model, pages = self.pages))]
    async fn generate(&self, topic: &str) -> StorytellerResult<String> {
        let prompt = story_prompt(topic, self.pages, &self.language);
        let request = GenerateContentRequest::builder()
            .contents(vec![Content::user(vec![Part::text(prompt)])])
            .generation_config(Some(GenerationConfig {
                response_modalities: None,
                temperature: Some(0.9),
            }))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::RequestBuild(e.to_string())))?;

        let response = self.client.generate_content(&self.model, &request).await?;

        if let Some(text) = response.text() {
            info!(chars = text.chars().count(), "Generated story text");
            return Ok(text);
        }
        match response.block_reason() {
            Some(reason) => Err(GeminiError::new(GeminiErrorKind::Blocked(reason.to_string())).into()),
            None => Err(GeminiError::new(GeminiErrorKind::EmptyText).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_every_marker() {
        let prompt = story_prompt("forest adventure", 3, "ja");
        assert!(prompt.contains("\"forest adventure\""));
        assert!(prompt.contains("[PAGE_1], [PAGE_2], [PAGE_3]"));
        assert!(!prompt.contains("[PAGE_4]"));
        assert!(prompt.contains("Exactly 3 pages"));
        assert!(prompt.contains("code \"ja\""));
    }
}
