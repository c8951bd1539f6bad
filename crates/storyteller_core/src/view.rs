//! Values returned across the story controller boundary.

use crate::{PageNumber, SessionId};
use serde::{Deserialize, Serialize};

/// One page as shown to a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    /// Page being shown
    pub page_number: PageNumber,
    /// Story text for the page
    pub text: String,
    /// Illustration URL, absent when it failed or is still being drawn
    pub image_url: Option<String>,
    /// True on the last page of the story
    pub is_final_page: bool,
}

/// Result of starting a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedStory {
    /// Id to use for subsequent calls
    pub session_id: SessionId,
    /// The opening page
    pub page: PageView,
}

/// Result of advancing a story.
///
/// Advancing a session that is already on its last page yields
/// `StoryComplete` and leaves the session unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// The session moved to this page
    Page(PageView),
    /// The session was already on its last page
    #[serde(rename = "complete")]
    StoryComplete {
        /// Session that finished
        session_id: SessionId,
        /// Number of pages in the story
        total_pages: PageNumber,
    },
}

impl AdvanceOutcome {
    /// The page shown, if the story moved.
    pub fn page(&self) -> Option<&PageView> {
        match self {
            AdvanceOutcome::Page(page) => Some(page),
            AdvanceOutcome::StoryComplete { .. } => None,
        }
    }

    /// Whether the story had already finished.
    pub fn is_complete(&self) -> bool {
        matches!(self, AdvanceOutcome::StoryComplete { .. })
    }
}

/// Snapshot of a session's prefetch progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetStatus {
    /// Session being described
    pub session_id: SessionId,
    /// Page the reader is on
    pub current_page: PageNumber,
    /// Page that will be shown next, absent on the last page
    pub next_page: Option<PageNumber>,
    /// Whether the next page's illustration is ready
    pub next_page_ready: bool,
}

/// A synthesized narration clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    /// Public URL of the stored audio
    pub audio_url: String,
    /// Language the text was read in
    pub language: String,
    /// Rough playback length
    pub duration_estimate_secs: f32,
}
