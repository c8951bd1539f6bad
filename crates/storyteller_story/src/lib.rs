//! The illustrated story pipeline.
//!
//! A story is written in one call, split into pages, and read one page at a
//! time. Page 1's illustration is drawn before the first response. Every later
//! illustration is drawn in the background one page ahead of the reader, using
//! the previous page's illustration as a style reference.
//!
//! - [`PageSegmenter`] splits `[PAGE_n]`-delimited text into pages
//! - [`SessionStore`] owns every live session and its per-page asset slots
//! - [`AssetProducer`] draws, narrates and uploads, returning failures as values
//! - [`PrefetchScheduler`] runs illustration work off the request path
//! - [`StoryController`] exposes start, advance, audio and status

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
mod fallback;
mod prefetch;
mod producer;
mod prompts;
mod segmenter;
mod store;

pub use controller::StoryController;
pub use fallback::fallback_pages;
pub use prefetch::{PrefetchHandle, PrefetchOutcome, PrefetchReference, PrefetchScheduler};
pub use producer::AssetProducer;
pub use prompts::{CONTINUITY_DIRECTIVE, STYLE_DIRECTIVE, illustration_prompt};
pub use segmenter::{PageSegmenter, contiguous_prefix};
pub use store::{Advance, SessionStore};
