//! Gemini settings from the `[gemini]` table.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini connection and model settings.
///
/// The API key itself is never configured here, only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default, deny_unknown_fields)]
pub struct GeminiConfig {
    /// Environment variable holding the API key
    api_key_env: String,
    /// REST endpoint root
    base_url: String,
    /// Model that writes the story text
    text_model: String,
    /// Model that draws illustrations
    image_model: String,
    /// Language code the story is written in
    story_language: String,
    /// Request quota, `None` for unlimited
    requests_per_minute: Option<u32>,
    /// Requests in flight, `None` for unlimited
    max_concurrent: Option<u32>,
    /// Upper bound on retries of a transient failure
    max_retries: usize,
    /// Per-request HTTP timeout
    request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image-preview".to_string(),
            story_language: "ja".to_string(),
            requests_per_minute: Some(10),
            max_concurrent: Some(4),
            max_retries: 3,
            request_timeout_secs: 60,
        }
    }
}

impl GeminiConfig {
    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Point the client at a different endpoint (mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Change the story language.
    pub fn with_story_language(mut self, language: impl Into<String>) -> Self {
        self.story_language = language.into();
        self
    }
}
