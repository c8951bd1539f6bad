//! Shared `generateContent` client.

use super::{GeminiConfig, GeminiResult, GenerateContentRequest, GenerateContentResponse};
use crate::limiter::RequestLimiter;
use crate::retry::with_retry;
use reqwest::Client;
use storyteller_error::{GeminiError, GeminiErrorKind};
use tracing::{debug, instrument};

/// Gemini REST client.
///
/// Clones share the HTTP connection pool and the request limiter, so one
/// client can back both the narrator and the illustrator.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    limiter: RequestLimiter,
    max_retries: usize,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("limiter", &self.limiter)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client reading the API key from the configured variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is not set in the environment
    /// - The HTTP client cannot be initialized
    #[instrument(skip_all)]
    pub fn from_config(config: &GeminiConfig) -> GeminiResult<Self> {
        let api_key = std::env::var(config.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GeminiError::new(GeminiErrorKind::MissingApiKey(
                    config.api_key_env().clone(),
                ))
            })?;
        Self::with_api_key(api_key, config)
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn with_api_key(api_key: impl Into<String>, config: &GeminiConfig) -> GeminiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            limiter: RequestLimiter::new(*config.requests_per_minute(), *config.max_concurrent()),
            max_retries: *config.max_retries(),
        })
    }

    /// Call `generateContent` on `model`, retrying transient failures.
    #[instrument(skip(self, request), fields(model = %model))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        with_retry("gemini.generate_content", self.max_retries, || {
            self.send_once(model, request)
        })
        .await
    }

    async fn send_once(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let _guard = self.limiter.acquire().await;

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!(url = %url, "Sending Gemini API request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message,
            }));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ResponseParse(e.to_string())))
    }
}
