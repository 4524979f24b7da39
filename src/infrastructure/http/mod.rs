use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{episode::EpisodeController, health};
use crate::infrastructure::config::Config;

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    episode_controller: Arc<EpisodeController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let episode_routes = Router::new()
        .route("/api/episodes", post(EpisodeController::create))
        .with_state(episode_controller.clone());

    let app = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .merge(episode_routes)
        .layer(TraceLayer::new_for_http());

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
