//! Live story sessions.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use storyteller_core::{AssetState, AssetStatus, PageNumber, SessionId};
use storyteller_error::{StoryError, StoryErrorKind, StorytellerResult};
use tokio::sync::{Mutex, RwLock, watch};
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Result of moving a session forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The session now shows `page`
    Moved {
        /// Page moved to
        page: PageNumber,
        /// Text of that page
        text: String,
        /// Whether that page is the last one
        is_final: bool,
    },
    /// The session was already on its last page and did not move
    AtLastPage {
        /// The last page of the story
        last_page: PageNumber,
    },
}

#[derive(Debug)]
struct StorySession {
    topic: String,
    pages: BTreeMap<PageNumber, String>,
    current_page: PageNumber,
    last_page: PageNumber,
    // A dropped sender tells waiters the session is gone.
    assets: BTreeMap<PageNumber, watch::Sender<AssetState>>,
    used_fallback: bool,
    last_activity: Instant,
}

impl StorySession {
    fn slot(&mut self, page: PageNumber) -> Option<&watch::Sender<AssetState>> {
        if !self.pages.contains_key(&page) {
            return None;
        }
        Some(
            self.assets
                .entry(page)
                .or_insert_with(|| watch::channel(AssetState::Pending).0),
        )
    }

    fn asset(&self, page: PageNumber) -> AssetState {
        self.assets
            .get(&page)
            .map(|slot| slot.borrow().clone())
            .unwrap_or_default()
    }
}

/// Every live story session, keyed by id.
///
/// Clones share the same sessions. Each session sits behind its own lock, so
/// work on one session never waits on another.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Mutex<StorySession>>>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn session(&self, session_id: &SessionId) -> StorytellerResult<Arc<Mutex<StorySession>>> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| {
                StoryError::new(StoryErrorKind::SessionNotFound(session_id.to_string())).into()
            })
    }

    /// Register a new session positioned on page 1.
    ///
    /// `pages` must be non-empty and numbered `1..=k` without gaps.
    #[instrument(skip(self, pages), fields(pages = pages.len()))]
    pub async fn create(
        &self,
        topic: &str,
        pages: BTreeMap<PageNumber, String>,
        used_fallback: bool,
    ) -> StorytellerResult<SessionId> {
        let contiguous = pages
            .keys()
            .zip(1u32..)
            .all(|(page, expected)| page.get() == expected);
        let Some(last_page) = pages.keys().next_back().copied().filter(|_| contiguous) else {
            return Err(StoryError::new(StoryErrorKind::InvalidInput(
                "a story needs pages numbered from 1 without gaps".to_string(),
            ))
            .into());
        };

        let session_id = SessionId::generate();
        let session = StorySession {
            topic: topic.to_string(),
            pages,
            current_page: PageNumber::FIRST,
            last_page,
            assets: BTreeMap::new(),
            used_fallback,
            last_activity: Instant::now(),
        };
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), Arc::new(Mutex::new(session)));

        debug!(session_id = %session_id, last_page = %last_page, "Session created");
        Ok(session_id)
    }

    /// Move to the next page, or report that the story is already finished.
    pub async fn advance(&self, session_id: &SessionId) -> StorytellerResult<Advance> {
        let session = self.session(session_id).await?;
        let mut session = session.lock().await;
        session.last_activity = Instant::now();

        if session.current_page >= session.last_page {
            return Ok(Advance::AtLastPage {
                last_page: session.last_page,
            });
        }

        let page = session.current_page.next();
        session.current_page = page;
        Ok(Advance::Moved {
            page,
            text: session.pages.get(&page).cloned().unwrap_or_default(),
            is_final: page == session.last_page,
        })
    }

    /// Text of one page, `None` when the story has no such page.
    pub async fn page_text(
        &self,
        session_id: &SessionId,
        page: PageNumber,
    ) -> StorytellerResult<Option<String>> {
        let session = self.session(session_id).await?;
        let text = session.lock().await.pages.get(&page).cloned();
        Ok(text)
    }

    /// Whether `page` is the last page of the story.
    pub async fn is_last_page(
        &self,
        session_id: &SessionId,
        page: PageNumber,
    ) -> StorytellerResult<bool> {
        let session = self.session(session_id).await?;
        let last_page = session.lock().await.last_page;
        Ok(page == last_page)
    }

    /// Topic the session was started with.
    pub async fn topic(&self, session_id: &SessionId) -> StorytellerResult<String> {
        let session = self.session(session_id).await?;
        let topic = session.lock().await.topic.clone();
        Ok(topic)
    }

    /// Whether the session is reading the built-in story.
    pub async fn used_fallback(&self, session_id: &SessionId) -> StorytellerResult<bool> {
        let session = self.session(session_id).await?;
        let used_fallback = session.lock().await.used_fallback;
        Ok(used_fallback)
    }

    /// Current state of one page's illustration.
    pub async fn asset(
        &self,
        session_id: &SessionId,
        page: PageNumber,
    ) -> StorytellerResult<AssetState> {
        let session = self.session(session_id).await?;
        let state = session.lock().await.asset(page);
        Ok(state)
    }

    /// Subscribe to one page's illustration state.
    ///
    /// The receiver reports an error once the session is removed.
    pub async fn watch_asset(
        &self,
        session_id: &SessionId,
        page: PageNumber,
    ) -> StorytellerResult<watch::Receiver<AssetState>> {
        let session = self.session(session_id).await?;
        let mut session = session.lock().await;
        session.slot(page).map(watch::Sender::subscribe).ok_or_else(|| {
            StoryError::new(StoryErrorKind::InvalidInput(format!(
                "page {page} is not part of session {session_id}"
            )))
            .into()
        })
    }

    /// Record the outcome of a page's illustration.
    ///
    /// Returns `false` when the session or page no longer exists, in which
    /// case nothing is recorded.
    pub async fn record_asset(
        &self,
        session_id: &SessionId,
        page: PageNumber,
        state: AssetState,
    ) -> bool {
        let Ok(session) = self.session(session_id).await else {
            return false;
        };
        let mut session = session.lock().await;
        match session.slot(page) {
            Some(slot) => {
                slot.send_replace(state);
                true
            }
            None => false,
        }
    }

    /// Wait until one page's illustration is resolved.
    ///
    /// Re-checks at least every `poll_interval` and gives up after `cap`.
    /// Returns `None` on timeout or when the session disappears.
    pub async fn wait_for_asset(
        &self,
        session_id: &SessionId,
        page: PageNumber,
        cap: Duration,
        poll_interval: Duration,
    ) -> Option<AssetState> {
        let mut receiver = self.watch_asset(session_id, page).await.ok()?;
        let deadline = Instant::now() + cap;

        loop {
            let state = receiver.borrow_and_update().clone();
            if state.is_resolved() {
                return Some(state);
            }

            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let tick = poll_interval.min(deadline - now);
            if let Ok(Err(_)) = tokio::time::timeout(tick, receiver.changed()).await {
                return None;
            }
        }
    }

    /// Wait, without a cap, until one page's illustration is resolved.
    ///
    /// Returns `None` when the session or page does not exist, or once the
    /// session is removed.
    pub async fn wait_until_resolved(
        &self,
        session_id: &SessionId,
        page: PageNumber,
    ) -> Option<AssetState> {
        let mut receiver = self.watch_asset(session_id, page).await.ok()?;
        let state = receiver.wait_for(AssetState::is_resolved).await.ok()?;
        Some(state.clone())
    }

    /// Progress snapshot. Does not count as activity.
    pub async fn status(&self, session_id: &SessionId) -> StorytellerResult<AssetStatus> {
        let session = self.session(session_id).await?;
        let session = session.lock().await;

        let next_page =
            (session.current_page < session.last_page).then(|| session.current_page.next());
        Ok(AssetStatus {
            session_id: session_id.clone(),
            current_page: session.current_page,
            next_page,
            next_page_ready: next_page.is_some_and(|page| session.asset(page).is_ready()),
        })
    }

    /// Whether the session exists.
    pub async fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    /// Delete a session. Returns whether it existed.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn remove(&self, session_id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(session_id).is_some();
        if removed {
            debug!("Session removed");
        }
        removed
    }

    /// Remove sessions idle for longer than `max_idle`. Returns how many.
    ///
    /// Sessions busy at the time of the sweep are kept.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => session.last_activity.elapsed() <= max_idle,
            Err(_) => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether there are no live sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
