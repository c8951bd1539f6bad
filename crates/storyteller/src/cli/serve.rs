//! HTTP server command handler.

use storyteller::{
    StorytellerConfig, StorytellerResult, build_controller, build_offline_controller, serve,
};
use tracing::{info, warn};

/// Run the HTTP API until Ctrl-C.
pub async fn run_server(
    config: StorytellerConfig,
    host: Option<String>,
    port: Option<u16>,
    offline: bool,
) -> StorytellerResult<()> {
    let mut server = config.server().clone();
    if let Some(host) = host {
        server = server.with_host(host);
    }
    if let Some(port) = port {
        server = server.with_port(port);
    }

    let controller = if offline {
        build_offline_controller(&config)
    } else {
        build_controller(&config)?
    };

    serve(controller, &server, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("Shutdown requested");
    })
    .await
}
