//! Speech settings from the `[speech]` table.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cloud Text-to-Speech settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default, deny_unknown_fields)]
pub struct SpeechConfig {
    /// Environment variable holding the API key
    api_key_env: String,
    /// REST endpoint root
    base_url: String,
    /// "MP3", "OGG_OPUS" or "LINEAR16"
    audio_encoding: String,
    /// 0.25 to 4.0, 1.0 is normal speed
    speaking_rate: f32,
    /// Specific voice, otherwise the service picks one for the language
    voice_name: Option<String>,
    /// Upper bound on retries of a transient failure
    max_retries: usize,
    /// Per-request HTTP timeout
    request_timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            base_url: "https://texttospeech.googleapis.com/v1".to_string(),
            audio_encoding: "MP3".to_string(),
            speaking_rate: 0.9,
            voice_name: None,
            max_retries: 2,
            request_timeout_secs: 30,
        }
    }
}

impl SpeechConfig {
    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// MIME type of the configured encoding.
    pub fn mime_type(&self) -> &'static str {
        match self.audio_encoding.as_str() {
            "OGG_OPUS" => "audio/ogg",
            "LINEAR16" => "audio/wav",
            _ => "audio/mpeg",
        }
    }
}
