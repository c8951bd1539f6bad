//! Wiring configuration to a ready controller.

use crate::{OfflineIllustrator, OfflineNarrator, OfflineSpeech, StorytellerConfig};
use std::sync::Arc;
use storyteller_error::StorytellerResult;
use storyteller_models::{GeminiClient, GeminiIllustrator, GeminiNarrator, GoogleTtsClient};
use storyteller_storage::{MemoryStorage, build_storage};
use storyteller_story::{AssetProducer, SessionStore, StoryController};
use tracing::info;

/// Build a controller backed by Gemini, Cloud Text-to-Speech and the
/// configured storage.
///
/// # Errors
///
/// Returns an error if an API key is missing or storage cannot be opened.
pub fn build_controller(config: &StorytellerConfig) -> StorytellerResult<StoryController> {
    let story = config.story();
    let gemini = config.gemini();

    let client = GeminiClient::from_config(gemini)?;
    let narrator = GeminiNarrator::new(
        client.clone(),
        gemini.text_model(),
        *story.max_pages(),
        gemini.story_language(),
    );
    let illustrator = GeminiIllustrator::new(client, gemini.image_model());
    let speech = GoogleTtsClient::from_config(config.speech())?;
    let storage = build_storage(config.storage())?;

    info!(
        text_model = %gemini.text_model(),
        image_model = %gemini.image_model(),
        storage = storage.backend_name(),
        max_pages = story.max_pages(),
        "Story pipeline ready"
    );

    let producer = AssetProducer::new(Arc::new(illustrator), Arc::new(speech), storage, story);
    Ok(StoryController::new(
        Arc::new(narrator),
        Arc::new(producer),
        SessionStore::new(),
        story.clone(),
    ))
}

/// Build a controller that needs no network: the built-in story,
/// placeholder illustrations and in-memory storage. Audio always fails.
pub fn build_offline_controller(config: &StorytellerConfig) -> StoryController {
    let story = config.story();
    let narrator = OfflineNarrator::new(story.default_language().as_str(), *story.max_pages());
    let producer = AssetProducer::new(
        Arc::new(OfflineIllustrator),
        Arc::new(OfflineSpeech),
        Arc::new(MemoryStorage::new()),
        story,
    );

    info!("Offline story pipeline ready");
    StoryController::new(
        Arc::new(narrator),
        Arc::new(producer),
        SessionStore::new(),
        story.clone(),
    )
}
