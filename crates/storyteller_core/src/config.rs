//! Pipeline tuning.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storyteller_error::ConfigError;

use crate::DEFAULT_MAX_PAGES;

/// What to do when a page's reference illustration cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceFallback {
    /// Fail the page's illustration
    #[default]
    Fail,
    /// Draw the page without a reference
    Standalone,
}

/// Tuning for the story pipeline.
///
/// Every field has a default, so an empty `[story]` table is valid.
///
/// # Examples
///
/// ```
/// use storyteller_core::StoryConfig;
/// use std::time::Duration;
///
/// let config = StoryConfig::default().with_advance_wait_ms(500);
/// assert_eq!(config.advance_wait(), Duration::from_millis(500));
/// assert_eq!(*config.max_pages(), 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[serde(default, deny_unknown_fields)]
#[setters(prefix = "with_")]
pub struct StoryConfig {
    /// Pages per story; markers beyond this are dropped
    max_pages: u32,
    /// Longest a reader waits for an illustration on advance
    advance_wait_ms: u64,
    /// Re-check interval during the reader wait
    poll_interval_ms: u64,
    /// Upper bound on a single asset production call
    asset_timeout_secs: u64,
    /// Background productions running at once across all sessions
    max_concurrent_assets: usize,
    /// Policy when a reference image cannot be fetched
    reference_fallback: ReferenceFallback,
    /// Narration language when none is requested
    #[setters(into)]
    default_language: String,
    /// Idle time after which a session may be evicted
    session_ttl_secs: u64,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            advance_wait_ms: 8_000,
            poll_interval_ms: 250,
            asset_timeout_secs: 60,
            max_concurrent_assets: 4,
            reference_fallback: ReferenceFallback::Fail,
            default_language: "ja".to_string(),
            session_ttl_secs: 3_600,
        }
    }
}

impl StoryConfig {
    /// Reader-facing wait cap.
    pub fn advance_wait(&self) -> Duration {
        Duration::from_millis(self.advance_wait_ms)
    }

    /// Re-check interval during the reader wait.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Per-call production timeout.
    pub fn asset_timeout(&self) -> Duration {
        Duration::from_secs(self.asset_timeout_secs)
    }

    /// Idle session lifetime.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Validates that the settings can drive a pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no pages, the poll interval is zero, no
    /// background work is allowed, or the reader wait is not shorter than the
    /// production timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pages == 0 {
            return Err(ConfigError::new("story.max_pages must be at least 1"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::new("story.poll_interval_ms must be positive"));
        }
        if self.max_concurrent_assets == 0 {
            return Err(ConfigError::new(
                "story.max_concurrent_assets must be at least 1",
            ));
        }
        if self.advance_wait() >= self.asset_timeout() {
            return Err(ConfigError::new(format!(
                "story.advance_wait_ms ({} ms) must be shorter than story.asset_timeout_secs ({} s)",
                self.advance_wait_ms, self.asset_timeout_secs
            )));
        }
        Ok(())
    }
}
