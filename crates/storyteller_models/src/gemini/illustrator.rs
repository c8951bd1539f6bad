//! Illustration generation.

use super::{Content, GeminiClient, GenerateContentRequest, GenerationConfig, Part};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use storyteller_core::GeneratedMedia;
use storyteller_error::{GeminiError, GeminiErrorKind, StorytellerResult};
use storyteller_interface::ImageGenerator;
use tracing::{debug, instrument};

/// Draws illustrations with a Gemini image model.
///
/// A reference image is sent inline after the prompt so the model can keep
/// the same style and characters.
#[derive(Debug, Clone)]
pub struct GeminiIllustrator {
    client: GeminiClient,
    model: String,
}

impl GeminiIllustrator {
    /// Illustrator using `model`.
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ImageGenerator for GeminiIllustrator {
    #[instrument(skip(self, prompt, reference), fields(model = %self.model, has_reference = reference.is_some()))]
    async fn generate(
        &self,
        prompt: &str,
        reference: Option<&GeneratedMedia>,
    ) -> StorytellerResult<GeneratedMedia> {
        let mut parts = vec![Part::text(prompt)];
        if let Some(reference) = reference {
            parts.push(Part::inline(&reference.mime_type, &reference.data));
        }

        let request = GenerateContentRequest::builder()
            .contents(vec![Content::user(parts)])
            .generation_config(Some(GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
                temperature: None,
            }))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::RequestBuild(e.to_string())))?;

        let response = self.client.generate_content(&self.model, &request).await?;

        let Some(inline) = response.first_inline_data() else {
            return Err(match response.block_reason() {
                Some(reason) => GeminiError::new(GeminiErrorKind::Blocked(reason.to_string())),
                None => GeminiError::new(GeminiErrorKind::NoImage),
            }
            .into());
        };

        let data = STANDARD
            .decode(&inline.data)
            .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
        debug!(mime_type = %inline.mime_type, size = data.len(), "Received illustration");

        Ok(GeneratedMedia::new(inline.mime_type.clone(), data))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
