//! HTTP API for the Storyteller story pipeline.
//!
//! Exposes the story controller over JSON:
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | POST | `/api/story` | start a story |
//! | POST | `/api/story/:session_id/next` | advance |
//! | GET | `/api/story/:session_id/status` | prefetch status |
//! | DELETE | `/api/story/:session_id` | end a session |
//! | POST | `/api/audio` | narrate text |
//! | GET | `/health` | liveness and session count |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod dto;
mod error;
mod server;
mod sweeper;

pub use api::{ApiState, create_router};
pub use config::ServerConfig;
pub use dto::{AudioRequest, ErrorBody, HealthBody, StartStoryRequest};
pub use error::ApiError;
pub use server::serve;
pub use sweeper::spawn_session_sweeper;
