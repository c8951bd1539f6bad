//! Router wired to in-process stubs.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use std::sync::Arc;
use storyteller_core::{GeneratedMedia, StoryConfig};
use storyteller_error::{SpeechError, SpeechErrorKind, StorytellerResult};
use storyteller_interface::{ImageGenerator, NarrativeGenerator, SpeechSynthesizer};
use storyteller_server::{ApiState, create_router};
use storyteller_storage::MemoryStorage;
use storyteller_story::{AssetProducer, SessionStore, StoryController};
use tower::ServiceExt;

pub struct FixedNarrator;

#[async_trait]
impl NarrativeGenerator for FixedNarrator {
    async fn generate(&self, topic: &str) -> StorytellerResult<String> {
        Ok(format!(
            "[PAGE_1] {topic} one. [PAGE_2] {topic} two. [PAGE_3] {topic} three."
        ))
    }

    fn provider_name(&self) -> &'static str {
        "fixed"
    }
}

pub struct FixedIllustrator;

#[async_trait]
impl ImageGenerator for FixedIllustrator {
    async fn generate(
        &self,
        _prompt: &str,
        _reference: Option<&GeneratedMedia>,
    ) -> StorytellerResult<GeneratedMedia> {
        Ok(GeneratedMedia::new("image/png", b"png".to_vec()))
    }

    fn provider_name(&self) -> &'static str {
        "fixed"
    }
}

pub struct FixedSpeech {
    pub fail: bool,
}

#[async_trait]
impl SpeechSynthesizer for FixedSpeech {
    async fn synthesize(&self, _text: &str, _language: &str) -> StorytellerResult<GeneratedMedia> {
        if self.fail {
            return Err(SpeechError::new(SpeechErrorKind::EmptyAudio).into());
        }
        Ok(GeneratedMedia::new("audio/mpeg", b"mp3".to_vec()))
    }

    fn provider_name(&self) -> &'static str {
        "fixed"
    }
}

pub fn controller(speech_fails: bool) -> StoryController {
    let config = StoryConfig::default()
        .with_advance_wait_ms(1_000)
        .with_poll_interval_ms(50);
    let producer = Arc::new(AssetProducer::new(
        Arc::new(FixedIllustrator),
        Arc::new(FixedSpeech { fail: speech_fails }),
        Arc::new(MemoryStorage::new()),
        &config,
    ));
    StoryController::new(Arc::new(FixedNarrator), producer, SessionStore::new(), config)
}

pub fn app(controller: &StoryController) -> Router {
    create_router(ApiState::new(controller.clone(), 200))
}

/// Send one request and decode the JSON reply.
pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}
