mod config;
mod errors;
mod extraction;
mod format;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod text_extractor;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::ResumeExtractor;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (errors on malformed values, not on a
    // missing credential — that is a valid, handled state)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Formatter API v{}", env!("CARGO_PKG_VERSION"));

    if config.openai_api_key.is_none() {
        info!("No OPENAI_API_KEY configured; extraction will use the rule-based fallback");
    }

    // Initialize LLM client
    let llm = LlmClient::new(&config);
    info!("LLM client initialized (model: {})", config.openai_model);

    // Build app state
    let state = AppState {
        extractor: ResumeExtractor::new(llm),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
