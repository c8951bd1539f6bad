//! Cloud Text-to-Speech client.

use super::SpeechConfig;
use super::dto::{AudioConfig, SynthesisInput, SynthesizeRequest, SynthesizeResponse, VoiceSelection};
use crate::retry::with_retry;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use storyteller_core::GeneratedMedia;
use storyteller_error::{SpeechError, SpeechErrorKind, StorytellerResult};
use storyteller_interface::SpeechSynthesizer;
use tracing::{debug, instrument};

/// BCP-47 locale for a short language code.
///
/// Codes that already carry a region pass through unchanged.
///
/// ```
/// use storyteller_models::voice_locale;
///
/// assert_eq!(voice_locale("ja"), "ja-JP");
/// assert_eq!(voice_locale("en-GB"), "en-GB");
/// ```
pub fn voice_locale(language: &str) -> String {
    if language.contains('-') {
        return language.to_string();
    }
    let locale = match language.to_ascii_lowercase().as_str() {
        "ja" => "ja-JP",
        "en" => "en-US",
        "es" => "es-ES",
        "fr" => "fr-FR",
        "de" => "de-DE",
        "it" => "it-IT",
        "ko" => "ko-KR",
        "pt" => "pt-BR",
        "zh" => "cmn-CN",
        _ => return language.to_string(),
    };
    locale.to_string()
}

/// Cloud Text-to-Speech client.
#[derive(Clone)]
pub struct GoogleTtsClient {
    client: Client,
    api_key: String,
    config: SpeechConfig,
}

impl std::fmt::Debug for GoogleTtsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTtsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GoogleTtsClient {
    /// Creates a client reading the API key from the configured variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unset or the HTTP client cannot be built.
    pub fn from_config(config: &SpeechConfig) -> Result<Self, SpeechError> {
        let api_key = std::env::var(config.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                SpeechError::new(SpeechErrorKind::MissingApiKey(config.api_key_env().clone()))
            })?;
        Self::with_api_key(api_key, config)
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_key(
        api_key: impl Into<String>,
        config: &SpeechConfig,
    ) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SpeechError::new(SpeechErrorKind::Request(e.to_string())))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config: config.clone(),
        })
    }

    async fn synthesize_once(&self, text: &str, locale: &str) -> Result<Vec<u8>, SpeechError> {
        let body = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: locale,
                name: self.config.voice_name().as_deref(),
            },
            audio_config: AudioConfig {
                audio_encoding: self.config.audio_encoding(),
                speaking_rate: *self.config.speaking_rate(),
            },
        };

        let url = format!(
            "{}/text:synthesize",
            self.config.base_url().trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::new(SpeechErrorKind::Request(e.to_string())))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::new(SpeechErrorKind::HttpError {
                status_code,
                message,
            }));
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::new(SpeechErrorKind::ResponseParse(e.to_string())))?;
        let encoded = parsed
            .audio_content
            .filter(|content| !content.is_empty())
            .ok_or_else(|| SpeechError::new(SpeechErrorKind::EmptyAudio))?;

        STANDARD
            .decode(encoded)
            .map_err(|e| SpeechError::new(SpeechErrorKind::Base64Decode(e.to_string())))
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn synthesize(&self, text: &str, language: &str) -> StorytellerResult<GeneratedMedia> {
        let locale = voice_locale(language);
        let audio = with_retry("tts.synthesize", *self.config.max_retries(), || {
            self.synthesize_once(text, &locale)
        })
        .await?;
        debug!(locale = %locale, size = audio.len(), "Synthesized speech");
        Ok(GeneratedMedia::new(self.config.mime_type(), audio))
    }

    fn provider_name(&self) -> &'static str {
        "google-tts"
    }
}
