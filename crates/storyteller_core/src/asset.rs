//! Per-page asset state.

use serde::{Deserialize, Serialize};

/// Production state of one page's illustration.
///
/// `Failed` is recorded explicitly so callers can tell "still working" from
/// "gave up".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "url", rename_all = "snake_case")]
pub enum AssetState {
    /// Production launched or not yet started, no result
    #[default]
    Pending,
    /// Asset stored at this public URL
    Ready(String),
    /// Production gave up
    Failed,
}

impl AssetState {
    /// Whether a final result (success or failure) is known.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AssetState::Pending)
    }

    /// Whether the asset is available.
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetState::Ready(_))
    }

    /// The asset URL, when ready.
    pub fn url(&self) -> Option<&str> {
        match self {
            AssetState::Ready(url) => Some(url),
            _ => None,
        }
    }

    /// Build a state from a production result.
    pub fn from_result<E>(result: Result<String, E>) -> Self {
        match result {
            Ok(url) => AssetState::Ready(url),
            Err(_) => AssetState::Failed,
        }
    }
}
