//! Asset production error types.

/// Why an illustration or audio clip could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AssetErrorKind {
    /// The previous page's illustration could not be fetched
    #[display("Reference image fetch failed: {}", _0)]
    ReferenceFetch(String),
    /// The generation collaborator failed or refused
    #[display("Asset generation failed: {}", _0)]
    Generation(String),
    /// The collaborator answered with no bytes
    #[display("Asset generation returned an empty response")]
    EmptyResponse,
    /// Storing the generated bytes failed
    #[display("Asset upload failed: {}", _0)]
    Upload(String),
    /// Production exceeded the per-call timeout
    #[display("Asset production timed out after {} ms", _0)]
    Timeout(u64),
}

/// Asset error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyteller_error::{AssetError, AssetErrorKind};
///
/// let err = AssetError::new(AssetErrorKind::Timeout(60_000));
/// assert!(format!("{}", err).contains("timed out"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Asset Error: {} at line {} in {}", kind, line, file)]
pub struct AssetError {
    /// The kind of error that occurred
    pub kind: AssetErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AssetError {
    /// Create a new AssetError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AssetErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
