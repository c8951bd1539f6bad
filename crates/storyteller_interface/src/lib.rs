//! Trait definitions for the services a story is built from.
//!
//! The story pipeline only talks to text, image, and speech generation
//! through these traits, so live clients and test stubs are interchangeable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageGenerator, NarrativeGenerator, SpeechSynthesizer};
