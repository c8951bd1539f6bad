//! Cloud Text-to-Speech integration.

mod client;
mod config;
mod dto;

pub use client::{GoogleTtsClient, voice_locale};
pub use config::SpeechConfig;
