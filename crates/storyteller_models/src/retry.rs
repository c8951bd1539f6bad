//! Retry with jittered exponential backoff.

use std::future::Future;
use std::time::Duration;
use storyteller_error::RetryableError;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{info, warn};

/// Run `operation`, retrying transient failures.
///
/// The first failure decides the backoff parameters (so a 429 backs off
/// longer than a 500). `max_retries` caps the error's suggested retry count;
/// zero disables retrying. Every retry, the first included, waits its backoff
/// delay, and the operation runs at most `max_retries + 1` times.
pub(crate) async fn with_retry<T, E, F, Fut>(
    operation_name: &str,
    max_retries: usize,
    mut operation: F,
) -> Result<T, E>
where
    E: RetryableError + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let first_error = match operation().await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if max_retries == 0 || !first_error.is_retryable() {
        warn!(operation = operation_name, error = %first_error, "Request failed, not retrying");
        return Err(first_error);
    }

    let (initial_ms, suggested_retries, max_delay_secs) = first_error.retry_strategy_params();
    let retries = suggested_retries.min(max_retries);
    info!(
        operation = operation_name,
        error = %first_error,
        initial_backoff_ms = initial_ms,
        max_retries = retries,
        max_delay_secs,
        "Request failed, will retry with backoff"
    );

    let mut strategy = ExponentialBackoff::from_millis(initial_ms)
        .factor(2)
        .max_delay(Duration::from_secs(max_delay_secs))
        .map(jitter)
        .take(retries);

    // The first attempt already ran, so the first retry waits out the first delay.
    let Some(first_delay) = strategy.next() else {
        return Err(first_error);
    };
    tokio::time::sleep(first_delay).await;

    Retry::spawn(strategy, || {
        let attempt = operation();
        async move {
            match attempt.await {
                Ok(value) => Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(operation = operation_name, error = %e, "Transient failure, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(operation = operation_name, error = %e, "Permanent failure, giving up");
                    Err(RetryError::Permanent(e))
                }
            }
        }
    })
    .await
}
