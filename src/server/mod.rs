pub mod handlers;
pub mod types;

use crate::{config::Config, llm::OllamaClient, sentiment::SentimentService, Result};
use axum::{routing::post, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use handlers::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze/", post(handlers::analyze))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Initialize inference client
    let client = OllamaClient::new(config.ollama.clone())?;
    info!(
        "Relaying to Ollama at {} using model {}",
        client.generate_url(),
        client.model()
    );

    let app_state = AppState {
        service: Arc::new(SentimentService::new(Arc::new(client))),
    };

    let app = router(app_state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
