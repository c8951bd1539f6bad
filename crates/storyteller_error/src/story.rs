//! Story session error types.

/// Failures visible at the story controller boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// No session with this id exists
    #[display("Session not found: {}", _0)]
    SessionNotFound(String),
    /// Narrative text could not be generated or segmented
    #[display("Narrative generation failed: {}", _0)]
    NarrativeGenerationFailed(String),
    /// Speech synthesis failed; there is no fallback audio
    #[display("Audio generation failed: {}", _0)]
    AudioGenerationFailed(String),
    /// Caller supplied unusable input
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),
}

/// Story error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyteller_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::SessionNotFound("abc".to_string()));
/// assert!(format!("{}", err).contains("abc"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The kind of error that occurred
    pub kind: StoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
