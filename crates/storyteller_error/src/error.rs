//! Top-level error wrapper types.

use crate::{
    AssetError, ConfigError, GeminiError, ServerError, SpeechError, StorageError, StoryError,
};

/// Every error a Storyteller crate can produce.
///
/// # Examples
///
/// ```
/// use storyteller_error::{StorytellerError, ConfigError};
///
/// let config_err = ConfigError::new("max_pages must be at least 1");
/// let err: StorytellerError = config_err.into();
/// assert!(format!("{}", err).contains("max_pages"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorytellerErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Gemini API error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Speech synthesis error
    #[from(SpeechError)]
    Speech(SpeechError),
    /// Asset production error
    #[from(AssetError)]
    Asset(AssetError),
    /// Story session error
    #[from(StoryError)]
    Story(StoryError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Storyteller error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyteller_error::{StorytellerResult, ConfigError};
///
/// fn might_fail() -> StorytellerResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyteller Error: {}", _0)]
pub struct StorytellerError(Box<StorytellerErrorKind>);

impl StorytellerError {
    /// Create a new error from a kind.
    pub fn new(kind: StorytellerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorytellerErrorKind {
        &self.0
    }

    /// The story error kind, if this is a story error.
    pub fn story_kind(&self) -> Option<&crate::StoryErrorKind> {
        match self.kind() {
            StorytellerErrorKind::Story(e) => Some(&e.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to StorytellerErrorKind
impl<T> From<T> for StorytellerError
where
    T: Into<StorytellerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyteller operations.
pub type StorytellerResult<T> = std::result::Result<T, StorytellerError>;
