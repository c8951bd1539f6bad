//! Request and response bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/story`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartStoryRequest {
    /// What the story should be about
    pub topic: String,
}

/// Body of `POST /api/audio`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRequest {
    /// Text to read aloud
    pub text: String,
    /// Language code, the configured default when absent
    #[serde(default)]
    pub language: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBody {
    /// Always `ok`
    pub status: String,
    /// Live sessions
    pub sessions: usize,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable cause
    pub error: String,
}
