//! Chat Relay - Main entry point
//!
//! Loads configuration from the environment, builds the router, and serves it.

use anyhow::{Context, Result};
use chat_relay::{
    build_router,
    core::{init_metrics, init_tracing, AppConfig},
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;

fn main() -> Result<()> {
    // Load .env file if present (before reading any environment variables)
    dotenvy::dotenv().ok();

    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> Result<()> {
    init_tracing();
    init_metrics();

    let config = AppConfig::from_env()?;
    tracing::info!(worker_threads, "Configuration loaded: {:?}", config);

    if config.upstream.api_key.is_empty() {
        tracing::warn!("GROQ_API_KEY is not set; upstream calls will fail authentication");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let state = Arc::new(AppState::from_config(config)?);
    let app = build_router(state);

    tracing::info!("Starting chat relay on {}", addr);
    tracing::info!("Chat API: POST /chat, POST /api/chat");
    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Metrics endpoint: /metrics");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
