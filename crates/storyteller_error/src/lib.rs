//! Error types for the Storyteller service.
//!
//! This crate provides the foundation error types used throughout the Storyteller workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyteller_error::{StorytellerResult, StoryError, StoryErrorKind};
//!
//! fn lookup(id: &str) -> StorytellerResult<()> {
//!     Err(StoryError::new(StoryErrorKind::SessionNotFound(id.to_string())))?
//! }
//!
//! match lookup("missing") {
//!     Ok(()) => println!("found"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod config;
mod error;
mod gemini;
mod retry;
mod server;
mod speech;
mod storage;
mod story;

pub use asset::{AssetError, AssetErrorKind};
pub use config::ConfigError;
pub use error::{StorytellerError, StorytellerErrorKind, StorytellerResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use retry::RetryableError;
pub use server::{ServerError, ServerErrorKind};
pub use speech::{SpeechError, SpeechErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};
