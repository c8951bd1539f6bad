//! Error responses.

use crate::ErrorBody;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use storyteller_error::{StoryError, StoryErrorKind, StorytellerError};

/// A failed request, rendered as `{"error": ..}` with a matching status.
#[derive(Debug, derive_more::From)]
pub struct ApiError(StorytellerError);

impl ApiError {
    #[track_caller]
    pub(crate) fn story(kind: StoryErrorKind) -> Self {
        Self(StoryError::new(kind).into())
    }

    /// Status code for this error.
    ///
    /// Unknown sessions are 404, bad input 400, failed narration 502 and
    /// anything else 500.
    pub fn status(&self) -> StatusCode {
        match self.0.story_kind() {
            Some(StoryErrorKind::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            Some(StoryErrorKind::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Some(StoryErrorKind::AudioGenerationFailed(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self.0.story_kind() {
            Some(kind) => kind.to_string(),
            None => self.0.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "Request rejected");
        }
        (status, Json(ErrorBody { error: self.message() })).into_response()
    }
}
