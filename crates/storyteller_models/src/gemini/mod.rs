//! Gemini REST integration.

mod client;
mod config;
mod dto;
mod illustrator;
mod narrator;

pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentRequestBuilder,
    GenerateContentResponse, GenerationConfig, InlineData, Part, PromptFeedback,
};
pub use illustrator::GeminiIllustrator;
pub use narrator::{GeminiNarrator, story_prompt};

/// Result type for Gemini calls.
pub type GeminiResult<T> = Result<T, storyteller_error::GeminiError>;
