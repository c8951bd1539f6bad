//! Background illustration work.

use crate::{AssetProducer, SessionStore};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use storyteller_core::{AssetState, PageNumber, SessionId, StoryConfig};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, warn};

/// Which reference illustration a prefetched page should follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefetchReference {
    /// Draw without a reference
    None,
    /// Use the illustration stored at this URL
    Url(String),
    /// Wait for this page's illustration to resolve, however long it is
    /// queued, and use it if it succeeded
    AfterPage(PageNumber),
}

impl PrefetchReference {
    /// Reference for a page whose predecessor is already resolved.
    pub fn from_state(state: &AssetState) -> Self {
        match state.url() {
            Some(url) => PrefetchReference::Url(url.to_string()),
            None => PrefetchReference::None,
        }
    }
}

/// How a prefetch task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefetchOutcome {
    /// The result was written to the session
    Recorded(AssetState),
    /// The session was gone, so the result was dropped
    Discarded(AssetState),
    /// The task panicked or was cancelled
    Aborted,
}

/// A running prefetch task.
///
/// Dropping the handle does not cancel the task.
#[derive(Debug)]
pub struct PrefetchHandle {
    page: PageNumber,
    task: JoinHandle<PrefetchOutcome>,
}

impl PrefetchHandle {
    /// Page being prefetched.
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Wait for the task to finish.
    pub async fn wait(self) -> PrefetchOutcome {
        self.task.await.unwrap_or(PrefetchOutcome::Aborted)
    }
}

type InFlight = Arc<Mutex<HashSet<(SessionId, PageNumber)>>>;

fn lock(in_flight: &InFlight) -> MutexGuard<'_, HashSet<(SessionId, PageNumber)>> {
    in_flight
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

// Clears the in-flight entry however the task ends.
struct InFlightEntry {
    in_flight: InFlight,
    key: (SessionId, PageNumber),
}

impl Drop for InFlightEntry {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.key);
    }
}

/// Launches illustration work off the request path.
///
/// At most one task runs per `(session, page)`, and a shared semaphore caps
/// how many produce at once across all sessions.
#[derive(Debug, Clone)]
pub struct PrefetchScheduler {
    producer: Arc<AssetProducer>,
    store: SessionStore,
    permits: Arc<Semaphore>,
    in_flight: InFlight,
    max_pages: u32,
}

impl PrefetchScheduler {
    /// Create a scheduler writing results into `store`.
    pub fn new(producer: Arc<AssetProducer>, store: SessionStore, config: &StoryConfig) -> Self {
        Self {
            producer,
            store,
            permits: Arc::new(Semaphore::new(*config.max_concurrent_assets())),
            in_flight: Arc::default(),
            max_pages: *config.max_pages(),
        }
    }

    /// Start drawing `page` in the background and return immediately.
    ///
    /// Returns `None` without doing anything when `page` is beyond the story
    /// length or a task for the same page is already running. The result is
    /// recorded on the session, or discarded if the session is gone by then.
    pub fn schedule(
        &self,
        session_id: &SessionId,
        page: PageNumber,
        page_text: String,
        reference: PrefetchReference,
    ) -> Option<PrefetchHandle> {
        if page.get() > self.max_pages {
            debug!(session_id = %session_id, page = %page, "Page beyond story length, not prefetching");
            return None;
        }

        let key = (session_id.clone(), page);
        if !lock(&self.in_flight).insert(key.clone()) {
            debug!(session_id = %session_id, page = %page, "Prefetch already in flight");
            return None;
        }
        let entry = InFlightEntry {
            in_flight: Arc::clone(&self.in_flight),
            key,
        };

        let scheduler = self.clone();
        let session_id = session_id.clone();
        let span = info_span!("prefetch", session_id = %session_id, page = %page);
        let task = tokio::spawn(
            async move {
                let _entry = entry;
                scheduler.run(session_id, page, page_text, reference).await
            }
            .instrument(span),
        );

        Some(PrefetchHandle { page, task })
    }

    /// Number of prefetch tasks currently running.
    pub fn in_flight(&self) -> usize {
        lock(&self.in_flight).len()
    }

    async fn run(
        &self,
        session_id: SessionId,
        page: PageNumber,
        page_text: String,
        reference: PrefetchReference,
    ) -> PrefetchOutcome {
        let reference_url = match reference {
            PrefetchReference::None => None,
            PrefetchReference::Url(url) => Some(url),
            // The predecessor may itself be waiting for a permit, so only its
            // resolution or the session's removal ends this wait.
            PrefetchReference::AfterPage(previous) => self
                .store
                .wait_until_resolved(&session_id, previous)
                .await
                .and_then(|state| state.url().map(str::to_string)),
        };

        // Closed only if the scheduler is torn down; produce anyway.
        let _permit = Arc::clone(&self.permits).acquire_owned().await.ok();

        if !self.store.contains(&session_id).await {
            debug!("Session gone before production, skipping");
            return PrefetchOutcome::Discarded(AssetState::Pending);
        }

        let state = match self
            .producer
            .produce_image(&page_text, reference_url.as_deref())
            .await
        {
            Ok(url) => {
                info!(url = %url, with_reference = reference_url.is_some(), "Page illustrated");
                AssetState::Ready(url)
            }
            Err(e) => {
                warn!(error = %e, "Page illustration failed");
                AssetState::Failed
            }
        };

        if self.store.record_asset(&session_id, page, state.clone()).await {
            PrefetchOutcome::Recorded(state)
        } else {
            debug!("Session gone, discarding illustration");
            PrefetchOutcome::Discarded(state)
        }
    }
}
