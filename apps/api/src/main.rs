mod config;
mod errors;
mod letter;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::letter::workflow::WorkflowController;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CoverGenie API v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_empty() {
        // Not fatal: the provider rejects the call and the attempt lands in Failed.
        warn!("GEMINI_API_KEY is not set; generation requests will fail authentication");
    }

    let gemini = GeminiClient::new(config.gemini_api_key.clone(), &config.gemini_api_url);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        workflow: WorkflowController::new(Arc::new(gemini)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
