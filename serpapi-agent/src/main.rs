//! SerpAPI Hotel Agent - A2A server
//!
//! Live hotel search over Google Hotels (via SerpAPI), exposed as agent skills
//! - GET  /.well-known/agent.json - Agent card
//! - POST /a2a                    - JSON-RPC task endpoint
//! - GET  /health                 - Health check

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use serpapi_agent::{router, AgentConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AgentConfig::from_env();
    if config.serpapi_configured() {
        tracing::info!("SerpAPI key configured");
    } else {
        tracing::warn!("SERPAPI_API_KEY not set; skills will report a configuration error");
    }

    let state = Arc::new(AppState::from_config(&config).context("Failed to build SerpAPI client")?);
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║          SerpAPI Hotel Agent - A2A Server                  ║");
    println!("╚════════════════════════════════════════════════════════════╝\n");
    println!("✓ Agent running on http://{}", addr);
    println!("  GET  /.well-known/agent.json  - Agent card");
    println!("  POST /a2a                     - JSON-RPC tasks (send/get/cancel)");
    println!("  GET  /health                  - Health check\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
