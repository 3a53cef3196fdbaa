//! Tutordesk - conversational tutoring web UI
//!
//! A Rust backend implementing the chat-transcript lifecycle for a
//! single-page tutoring assistant backed by a hosted completion API.

mod api;
mod config;
mod llm;
mod prompt;
mod reveal;
mod session;
mod state_machine;
mod transcript;

use api::{create_router, AppState};
use config::Config;
use llm::{CompletionClient, GeminiClient, LoggingClient};
use session::SessionManager;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutordesk=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration. A missing credential halts here, before any UI is
    // presented.
    let config = Config::from_env().map_err(|e| {
        tracing::error!(error = %e, "fatal configuration error");
        e
    })?;

    // Completion client
    let gemini = GeminiClient::new(config.api_key.clone(), config.model.clone()).map_err(|e| {
        tracing::error!(error = %e, "failed to initialize completion client");
        e
    })?;
    let client: Arc<dyn CompletionClient> = Arc::new(LoggingClient::new(Arc::new(gemini)));

    tracing::info!(model = %config.model, "completion client initialized");

    // Application state
    let sessions = SessionManager::new(client, config.model.clone());
    let state = AppState::new(sessions);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Tutordesk listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
