//! Live collaborators for the Storyteller service.
//!
//! - [`GeminiNarrator`] writes page-delimited story text
//! - [`GeminiIllustrator`] draws illustrations, optionally from a reference image
//! - [`GoogleTtsClient`] reads text aloud through Cloud Text-to-Speech
//!
//! Every client shares the same request limiter and retry policy.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod limiter;
mod retry;
mod speech;

pub use gemini::{
    Candidate, Content, GeminiClient, GeminiConfig, GeminiIllustrator, GeminiNarrator,
    GeminiResult, GenerateContentRequest, GenerateContentRequestBuilder, GenerateContentResponse,
    GenerationConfig, InlineData, Part, PromptFeedback, story_prompt,
};
pub use limiter::{RequestGuard, RequestLimiter};
pub use speech::{GoogleTtsClient, SpeechConfig, voice_locale};
