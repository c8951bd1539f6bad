//! Idle session eviction.

use std::time::Duration;
use storyteller_story::SessionStore;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Evict sessions idle longer than `ttl`, checking every `every`.
///
/// Runs until the returned handle is aborted.
pub fn spawn_session_sweeper(store: SessionStore, ttl: Duration, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticks.tick().await;

        loop {
            ticks.tick().await;
            let evicted = store.evict_idle(ttl).await;
            if evicted > 0 {
                let remaining = store.len().await;
                info!(evicted, remaining, "Swept idle sessions");
            }
        }
    })
}
