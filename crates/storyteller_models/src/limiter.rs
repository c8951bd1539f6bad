//! Outbound request throttling using governor and a Tokio semaphore.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Limits requests per minute and requests in flight.
///
/// Clones share the same quota.
///
/// # Example
///
/// ```rust
/// use storyteller_models::RequestLimiter;
///
/// # async fn example() {
/// let limiter = RequestLimiter::new(Some(10), Some(2));
/// let guard = limiter.acquire().await;
/// // ... send the request ...
/// drop(guard);
/// # }
/// ```
#[derive(Clone)]
pub struct RequestLimiter {
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent_semaphore: Arc<Semaphore>,
}

impl std::fmt::Debug for RequestLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLimiter")
            .field("rpm_limited", &self.rpm_limiter.is_some())
            .field(
                "available_permits",
                &self.concurrent_semaphore.available_permits(),
            )
            .finish()
    }
}

impl RequestLimiter {
    /// Create a limiter. `None` (or zero) disables the respective limit.
    pub fn new(requests_per_minute: Option<u32>, max_concurrent: Option<u32>) -> Self {
        let rpm_limiter = requests_per_minute
            .and_then(NonZeroU32::new)
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));

        let max_concurrent = max_concurrent
            .filter(|n| *n > 0)
            .map(|n| n as usize)
            .unwrap_or(Semaphore::MAX_PERMITS);

        Self {
            rpm_limiter,
            concurrent_semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// A limiter that never waits.
    pub fn unlimited() -> Self {
        Self::new(None, None)
    }

    /// Wait until a request may be sent.
    ///
    /// The returned guard holds the in-flight slot until dropped.
    pub async fn acquire(&self) -> RequestGuard {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        // Acquire concurrent slot last to avoid holding it while waiting on quota
        let permit = self.concurrent_semaphore.clone().acquire_owned().await.ok();
        if permit.is_none() {
            tracing::warn!("Request limiter semaphore closed, proceeding unthrottled");
        }
        RequestGuard { _permit: permit }
    }

    /// Free in-flight slots.
    pub fn available_permits(&self) -> usize {
        self.concurrent_semaphore.available_permits()
    }
}

/// Holds an in-flight slot until dropped.
#[derive(Debug)]
pub struct RequestGuard {
    _permit: Option<OwnedSemaphorePermit>,
}
