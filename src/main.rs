//! Redactor relay server
//!
//! HTTP relay that turns press-content requests into chat completions

use anyhow::{Context, Result};
use redactor::{create_router, version_info, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is read before logging so RUST_LOG / LOG_FORMAT can live there
    dotenv::dotenv().ok();

    init_logging();

    let settings = Settings::new().context("Failed to load server settings")?;
    info!("Server settings loaded: provider={} deployment={}", settings.provider.kind, settings.provider.deployment);

    let app = create_router(settings.clone()).await?;

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 {} started!", version_info());
    info!("📝 Health check: http://{}/health", addr);
    info!("✍️ Generation endpoint: http://{}/api/generar", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let result = if log_format == "json" {
        // JSON format logs (production environment)
        tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .try_init()
    } else {
        // Human readable format (development environment)
        tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    info!("Logging system initialized");
}
