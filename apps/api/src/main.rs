mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod parser;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::PdfTextExtractor;
use crate::llm_client::LlmClient;
use crate::parser::{LlmStructuringClient, ParserLimits, ResumeParser};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a missing OPENAI_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Parser API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let limits = ParserLimits {
        extraction_timeout: config.extraction_timeout,
        structuring_timeout: config.structuring_timeout,
        ..ParserLimits::default()
    };
    info!(
        "Parser limits: max_file_bytes={} extraction_timeout={:?} structuring_timeout={:?}",
        limits.max_file_bytes, limits.extraction_timeout, limits.structuring_timeout
    );

    let parser = ResumeParser::new(
        Arc::new(PdfTextExtractor),
        Arc::new(LlmStructuringClient(llm)),
    )
    .with_limits(limits);

    // Build router
    let app = build_router(AppState::new(parser))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
