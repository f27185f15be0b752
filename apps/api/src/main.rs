mod config;
mod errors;
mod generation;
mod intake;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SmartResume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Gemini client. A missing key is not fatal here — it
    // surfaces as MissingCredential on the first generation call.
    let llm = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.model_name.clone(),
        Duration::from_secs(config.generation_timeout_secs),
    )
    .with_max_attempts(config.generation_max_attempts);
    info!(
        "LLM client initialized (model: {}, key configured: {})",
        llm.model(),
        config.gemini_api_key.is_some()
    );

    let state = AppState {
        generator: Arc::new(llm.clone()),
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
