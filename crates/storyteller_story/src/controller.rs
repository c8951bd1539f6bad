//! Story lifecycle.

use crate::{
    Advance, AssetProducer, PageSegmenter, PrefetchReference, PrefetchScheduler, SessionStore,
    contiguous_prefix, fallback_pages,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use storyteller_core::{
    AdvanceOutcome, AssetState, AssetStatus, AudioClip, PageNumber, PageView, SessionId,
    StartedStory, StoryConfig,
};
use storyteller_error::{StoryError, StoryErrorKind, StorytellerResult};
use storyteller_interface::NarrativeGenerator;
use tracing::{info, instrument, warn};

/// Entry point for reading stories.
///
/// Starting a story writes the whole text up front, draws page 1 before
/// returning and queues page 2. Each advance shows the next page, waiting a
/// bounded time for its illustration, and queues the page after it with the
/// shown page's illustration as its reference.
///
/// # Examples
///
/// ```no_run
/// use storyteller_story::StoryController;
///
/// # async fn example(controller: StoryController) -> storyteller_error::StorytellerResult<()> {
/// let started = controller.start("a brave little rabbit").await?;
/// println!("{}", started.page.text);
///
/// while let Some(page) = controller.advance(&started.session_id).await?.page() {
///     println!("{}", page.text);
/// }
/// controller.end(&started.session_id).await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StoryController {
    narrator: Arc<dyn NarrativeGenerator>,
    producer: Arc<AssetProducer>,
    store: SessionStore,
    scheduler: PrefetchScheduler,
    segmenter: PageSegmenter,
    config: StoryConfig,
}

impl std::fmt::Debug for StoryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryController")
            .field("narrator", &self.narrator.provider_name())
            .field("producer", &self.producer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StoryController {
    /// Create a controller. Sessions live in `store`.
    pub fn new(
        narrator: Arc<dyn NarrativeGenerator>,
        producer: Arc<AssetProducer>,
        store: SessionStore,
        config: StoryConfig,
    ) -> Self {
        let scheduler = PrefetchScheduler::new(Arc::clone(&producer), store.clone(), &config);
        Self {
            narrator,
            producer,
            store,
            scheduler,
            segmenter: PageSegmenter::new(*config.max_pages()),
            config,
        }
    }

    /// The session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The background illustration scheduler.
    pub fn scheduler(&self) -> &PrefetchScheduler {
        &self.scheduler
    }

    /// Pipeline settings.
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Write a story about `topic` and open it on page 1.
    ///
    /// A failed or unparseable narrative falls back to the built-in story.
    /// A failed illustration leaves `image_url` empty. Neither is an error.
    #[instrument(skip(self))]
    pub async fn start(&self, topic: &str) -> StorytellerResult<StartedStory> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(StoryError::new(StoryErrorKind::InvalidInput(
                "topic must not be empty".to_string(),
            ))
            .into());
        }

        let (pages, used_fallback) = self.write_story(topic).await;
        let first_text = pages.get(&PageNumber::FIRST).cloned().unwrap_or_default();
        let second_text = pages.get(&PageNumber::FIRST.next()).cloned();
        let total_pages = pages.len();

        let session_id = self.store.create(topic, pages, used_fallback).await?;

        let first_state = match self.producer.produce_image(&first_text, None).await {
            Ok(url) => AssetState::Ready(url),
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "First page illustration failed");
                AssetState::Failed
            }
        };
        self.store
            .record_asset(&session_id, PageNumber::FIRST, first_state.clone())
            .await;

        if let Some(text) = second_text {
            self.scheduler.schedule(
                &session_id,
                PageNumber::FIRST.next(),
                text,
                PrefetchReference::from_state(&first_state),
            );
        }

        info!(
            session_id = %session_id,
            total_pages,
            used_fallback,
            illustrated = first_state.is_ready(),
            "Story started"
        );

        Ok(StartedStory {
            session_id,
            page: PageView {
                page_number: PageNumber::FIRST,
                text: first_text,
                image_url: first_state.url().map(str::to_string),
                is_final_page: total_pages == 1,
            },
        })
    }

    /// Show the next page.
    ///
    /// On the last page this returns [`AdvanceOutcome::StoryComplete`] and
    /// leaves the session as it is.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn advance(&self, session_id: &SessionId) -> StorytellerResult<AdvanceOutcome> {
        let (page, text, is_final) = match self.store.advance(session_id).await? {
            Advance::AtLastPage { last_page } => {
                info!(total_pages = %last_page, "Story already complete");
                return Ok(AdvanceOutcome::StoryComplete {
                    session_id: session_id.clone(),
                    total_pages: last_page,
                });
            }
            Advance::Moved {
                page,
                text,
                is_final,
            } => (page, text, is_final),
        };

        let resolved = self
            .store
            .wait_for_asset(
                session_id,
                page,
                self.config.advance_wait(),
                self.config.poll_interval(),
            )
            .await;
        if resolved.is_none() {
            info!(page = %page, "Illustration not ready, showing page without it");
        }

        if !is_final {
            self.queue_following(session_id, page, resolved.as_ref()).await;
        }

        Ok(AdvanceOutcome::Page(PageView {
            page_number: page,
            text,
            image_url: resolved.as_ref().and_then(AssetState::url).map(str::to_string),
            is_final_page: is_final,
        }))
    }

    /// Narrate arbitrary text. Uses the configured language when none is given.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn synthesize_audio(
        &self,
        text: &str,
        language: Option<&str>,
    ) -> StorytellerResult<AudioClip> {
        if text.trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::InvalidInput(
                "text must not be empty".to_string(),
            ))
            .into());
        }
        let language = language
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .unwrap_or(self.config.default_language().as_str());

        self.producer
            .produce_audio(text, language)
            .await
            .map_err(|e| StoryError::new(StoryErrorKind::AudioGenerationFailed(e.to_string())).into())
    }

    /// Where the session is and whether its next illustration is ready.
    pub async fn asset_status(&self, session_id: &SessionId) -> StorytellerResult<AssetStatus> {
        self.store.status(session_id).await
    }

    /// Discard a session. Background work for it finishes but is not recorded.
    pub async fn end(&self, session_id: &SessionId) -> bool {
        self.store.remove(session_id).await
    }

    async fn write_story(&self, topic: &str) -> (BTreeMap<PageNumber, String>, bool) {
        let failure = match self.narrator.generate(topic).await {
            Ok(raw) => {
                let pages = contiguous_prefix(self.segmenter.segment(&raw));
                if !pages.is_empty() {
                    return (pages, false);
                }
                StoryErrorKind::NarrativeGenerationFailed("no usable page markers".to_string())
            }
            Err(e) => StoryErrorKind::NarrativeGenerationFailed(e.to_string()),
        };

        warn!(
            provider = self.narrator.provider_name(),
            error = %failure,
            "Using built-in story"
        );
        (
            fallback_pages(self.config.default_language(), *self.config.max_pages()),
            true,
        )
    }

    async fn queue_following(
        &self,
        session_id: &SessionId,
        page: PageNumber,
        resolved: Option<&AssetState>,
    ) {
        let next = page.next();
        let Ok(Some(text)) = self.store.page_text(session_id, next).await else {
            return;
        };
        let reference = match resolved {
            Some(state) => PrefetchReference::from_state(state),
            None => PrefetchReference::AfterPage(page),
        };
        self.scheduler.schedule(session_id, next, text, reference);
    }
}
