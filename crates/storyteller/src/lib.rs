//! Storyteller - interactive illustrated picture-book stories.
//!
//! A reader asks for a story on a topic and gets page 1, text and
//! illustration, straight away. Each following page is illustrated in the
//! background while the reader is still on the previous one, using the
//! previous illustration as a style reference so the book stays consistent.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storyteller::{StorytellerConfig, build_controller};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorytellerConfig::load()?;
//!     let controller = build_controller(&config)?;
//!
//!     let started = controller.start("a rabbit who wants to fly").await?;
//!     println!("{}", started.page.text);
//!
//!     while let Some(page) = controller.advance(&started.session_id).await?.page() {
//!         println!("{}", page.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry tracing with a stdout exporter
//! - `api` - enables tests that call the live Google APIs
//!
//! # Architecture
//!
//! - `storyteller_error` - error types
//! - `storyteller_core` - domain types and pipeline settings
//! - `storyteller_interface` - narrator, illustrator and speech traits
//! - `storyteller_storage` - public object storage
//! - `storyteller_models` - Gemini and Cloud Text-to-Speech clients
//! - `storyteller_story` - sessions, prefetch and the story controller
//! - `storyteller_server` - HTTP API
//!
//! This crate re-exports the commonly used pieces and wires them together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod offline;

#[cfg(feature = "observability")]
pub mod observability;

pub use app::{build_controller, build_offline_controller};
pub use config::StorytellerConfig;
pub use offline::{OfflineIllustrator, OfflineNarrator, OfflineSpeech};

// Re-export core crates
pub use storyteller_core::*;
pub use storyteller_error::*;
pub use storyteller_interface::*;

pub use storyteller_models::{
    GeminiClient, GeminiConfig, GeminiIllustrator, GeminiNarrator, GoogleTtsClient, SpeechConfig,
};
pub use storyteller_server::{ApiState, ServerConfig, create_router, serve};
pub use storyteller_storage::{
    FileSystemStorage, GcsStorage, MediaStorage, MemoryStorage, StorageConfig, build_storage,
};
pub use storyteller_story::{AssetProducer, SessionStore, StoryController};
