//! Speech synthesis error types.

use crate::RetryableError;
use crate::retry::{is_retryable_status, status_strategy_params};

/// Speech synthesis error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SpeechErrorKind {
    /// API key not found in environment
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Request could not be sent or the connection dropped
    #[display("Speech request failed: {}", _0)]
    Request(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Response body did not match the expected shape
    #[display("Failed to parse speech response: {}", _0)]
    ResponseParse(String),
    /// Base64 decoding failed
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// Service returned no audio
    #[display("Speech service returned no audio")]
    EmptyAudio,
}

/// Speech error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Speech Error: {} at line {} in {}", kind, line, file)]
pub struct SpeechError {
    /// The kind of error that occurred
    pub kind: SpeechErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SpeechError {
    /// Create a new SpeechError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SpeechErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for SpeechError {
    fn is_retryable(&self) -> bool {
        match &self.kind {
            SpeechErrorKind::HttpError { status_code, .. } => is_retryable_status(*status_code),
            SpeechErrorKind::Request(_) => true,
            _ => false,
        }
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match &self.kind {
            SpeechErrorKind::HttpError { status_code, .. } => status_strategy_params(*status_code),
            _ => (1000, 3, 10),
        }
    }
}
