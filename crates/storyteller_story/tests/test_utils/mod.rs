//! Stub collaborators for story pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storyteller_core::{GeneratedMedia, StoryConfig};
use storyteller_error::{
    GeminiError, GeminiErrorKind, SpeechError, SpeechErrorKind, StorageError, StorageErrorKind,
    StorytellerResult,
};
use storyteller_interface::{ImageGenerator, NarrativeGenerator, SpeechSynthesizer};
use storyteller_storage::{MediaMetadata, MediaReference, MediaStorage, MemoryStorage};
use storyteller_story::{AssetProducer, SessionStore, StoryController};

/// Narrator returning a canned response.
pub struct StubNarrator {
    response: Result<String, String>,
    calls: AtomicUsize,
}

impl StubNarrator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: Err("quota exhausted".to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NarrativeGenerator for StubNarrator {
    async fn generate(&self, _topic: &str) -> StorytellerResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .map_err(|e| GeminiError::new(GeminiErrorKind::Blocked(e)).into())
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

/// How the stub illustrator answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawing {
    /// Return `image-{n}` bytes for the n-th call
    Succeed,
    /// Fail every call
    Fail,
    /// Fail the first `n` calls, then succeed
    FailFirst(usize),
    /// Return zero bytes
    Empty,
}

/// One call the stub illustrator received.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub prompt: String,
    pub reference: Option<Vec<u8>>,
}

/// Illustrator with a configurable delay and outcome.
pub struct StubIllustrator {
    mode: Drawing,
    delay: Duration,
    calls: Mutex<Vec<DrawCall>>,
    running: AtomicUsize,
    peak_running: AtomicUsize,
}

impl StubIllustrator {
    pub fn new(mode: Drawing, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            mode,
            delay,
            calls: Mutex::new(Vec::new()),
            running: AtomicUsize::new(0),
            peak_running: AtomicUsize::new(0),
        })
    }

    pub fn instant() -> Arc<Self> {
        Self::new(Drawing::Succeed, Duration::ZERO)
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    pub fn peak_running(&self) -> usize {
        self.peak_running.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for StubIllustrator {
    async fn generate(
        &self,
        prompt: &str,
        reference: Option<&GeneratedMedia>,
    ) -> StorytellerResult<GeneratedMedia> {
        let call_number = {
            let mut calls = self.calls.lock().expect("calls lock");
            calls.push(DrawCall {
                prompt: prompt.to_string(),
                reference: reference.map(|r| r.data.clone()),
            });
            calls.len()
        };

        let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_running.fetch_max(running, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.running.fetch_sub(1, Ordering::SeqCst);

        let fail = match self.mode {
            Drawing::Succeed | Drawing::Empty => false,
            Drawing::Fail => true,
            Drawing::FailFirst(n) => call_number <= n,
        };
        if fail {
            return Err(GeminiError::new(GeminiErrorKind::NoImage).into());
        }
        let data = match self.mode {
            Drawing::Empty => Vec::new(),
            _ => format!("image-{call_number}").into_bytes(),
        };
        Ok(GeneratedMedia::new("image/png", data))
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

/// Speech synthesizer returning fixed bytes or failing.
pub struct StubSpeech {
    fail: bool,
}

impl StubSpeech {
    pub fn working() -> Arc<Self> {
        Arc::new(Self { fail: false })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true })
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, _text: &str, _language: &str) -> StorytellerResult<GeneratedMedia> {
        if self.fail {
            return Err(SpeechError::new(SpeechErrorKind::HttpError {
                status_code: 403,
                message: "forbidden".to_string(),
            })
            .into());
        }
        Ok(GeneratedMedia::new("audio/mpeg", b"mp3-bytes".to_vec()))
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

/// Storage whose every call fails.
pub struct BrokenStorage;

#[async_trait]
impl MediaStorage for BrokenStorage {
    async fn store(
        &self,
        _data: &[u8],
        _metadata: &MediaMetadata,
    ) -> StorytellerResult<MediaReference> {
        Err(StorageError::new(StorageErrorKind::Upload("bucket unavailable".to_string())).into())
    }

    async fn retrieve(&self, url: &str) -> StorytellerResult<Vec<u8>> {
        Err(StorageError::new(StorageErrorKind::NotFound(url.to_string())).into())
    }

    fn backend_name(&self) -> &'static str {
        "broken"
    }
}

/// Config with short waits suited to paused-clock tests.
pub fn quick_config() -> StoryConfig {
    StoryConfig::default()
        .with_advance_wait_ms(2_000)
        .with_poll_interval_ms(100)
        .with_asset_timeout_secs(60)
}

/// Everything a controller test needs to inspect.
pub struct Harness {
    pub controller: StoryController,
    pub illustrator: Arc<StubIllustrator>,
    pub narrator: Arc<StubNarrator>,
    pub storage: MemoryStorage,
    pub store: SessionStore,
}

pub fn harness(
    narrator: Arc<StubNarrator>,
    illustrator: Arc<StubIllustrator>,
    config: StoryConfig,
) -> Harness {
    let storage = MemoryStorage::new();
    let producer = Arc::new(AssetProducer::new(
        illustrator.clone(),
        StubSpeech::working(),
        Arc::new(storage.clone()),
        &config,
    ));
    let store = SessionStore::new();
    let controller = StoryController::new(narrator.clone(), producer, store.clone(), config);
    Harness {
        controller,
        illustrator,
        narrator,
        storage,
        store,
    }
}

/// Producer over memory storage.
pub fn producer(
    illustrator: Arc<StubIllustrator>,
    speech: Arc<StubSpeech>,
    config: &StoryConfig,
) -> (AssetProducer, MemoryStorage) {
    let storage = MemoryStorage::new();
    let producer = AssetProducer::new(illustrator, speech, Arc::new(storage.clone()), config);
    (producer, storage)
}
