//! Running the HTTP server.

use crate::{ApiState, ServerConfig, create_router, spawn_session_sweeper};
use std::future::Future;
use storyteller_error::{ServerError, ServerErrorKind, StorytellerResult};
use storyteller_story::StoryController;
use tracing::info;

/// Serve the story API until `shutdown` completes.
///
/// Also runs the idle-session sweeper for the controller's store.
pub async fn serve(
    controller: StoryController,
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> StorytellerResult<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.clone(),
            message: e.to_string(),
        })
    })?;

    let sweeper = spawn_session_sweeper(
        controller.store().clone(),
        controller.config().session_ttl(),
        config.sweep_interval(),
    );

    info!(addr = %addr, "Storyteller API listening");
    let router = create_router(ApiState::new(controller, *config.max_topic_chars()));
    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await;

    sweeper.abort();
    info!("Storyteller API stopped");
    result.map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())).into())
}
