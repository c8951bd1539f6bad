//! Routes and handlers.

use crate::{ApiError, AudioRequest, HealthBody, StartStoryRequest};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use storyteller_core::{AdvanceOutcome, AssetStatus, AudioClip, SessionId, StartedStory};
use storyteller_error::StoryErrorKind;
use storyteller_story::StoryController;

/// Shared state for every handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    controller: StoryController,
    max_topic_chars: usize,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(controller: StoryController, max_topic_chars: usize) -> Self {
        Self {
            controller,
            max_topic_chars,
        }
    }

    /// The story controller behind the API.
    pub fn controller(&self) -> &StoryController {
        &self.controller
    }
}

/// Creates the story API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/story", post(start_story))
        .route("/api/story/:session_id", delete(end_story))
        .route("/api/story/:session_id/next", post(advance_story))
        .route("/api/story/:session_id/status", get(story_status))
        .route("/api/audio", post(synthesize_audio))
        .with_state(state)
}

async fn health_check(State(state): State<ApiState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
        sessions: state.controller.store().len().await,
    })
}

async fn start_story(
    State(state): State<ApiState>,
    Json(request): Json<StartStoryRequest>,
) -> Result<Json<StartedStory>, ApiError> {
    let chars = request.topic.chars().count();
    if chars > state.max_topic_chars {
        return Err(ApiError::story(StoryErrorKind::InvalidInput(format!(
            "topic is {chars} characters, the limit is {}",
            state.max_topic_chars
        ))));
    }
    Ok(Json(state.controller.start(&request.topic).await?))
}

async fn advance_story(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<Json<AdvanceOutcome>, ApiError> {
    let session_id = SessionId::from(session_id);
    Ok(Json(state.controller.advance(&session_id).await?))
}

async fn story_status(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<Json<AssetStatus>, ApiError> {
    let session_id = SessionId::from(session_id);
    Ok(Json(state.controller.asset_status(&session_id).await?))
}

async fn end_story(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = SessionId::from(session_id);
    if state.controller.end(&session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::story(StoryErrorKind::SessionNotFound(
            session_id.to_string(),
        )))
    }
}

async fn synthesize_audio(
    State(state): State<ApiState>,
    Json(request): Json<AudioRequest>,
) -> Result<Json<AudioClip>, ApiError> {
    let clip = state
        .controller
        .synthesize_audio(&request.text, request.language.as_deref())
        .await?;
    Ok(Json(clip))
}
