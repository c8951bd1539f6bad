//! Core data types for the Storyteller service.
//!
//! This crate provides the domain types shared by the story pipeline, its
//! collaborators, and the HTTP boundary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod config;
mod media;
mod page;
mod session;
mod view;

pub use asset::AssetState;
pub use config::{ReferenceFallback, StoryConfig};
pub use media::GeneratedMedia;
pub use page::{DEFAULT_MAX_PAGES, PageNumber};
pub use session::SessionId;
pub use view::{AdvanceOutcome, AssetStatus, AudioClip, PageView, StartedStory};
