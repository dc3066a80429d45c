//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod generate;
pub mod health;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::providers::{CompletionProvider, OpenAIProvider};
use crate::services::GenerationRelay;
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub relay: GenerationRelay,
}

/// Create application router backed by the configured provider
pub async fn create_router(settings: Settings) -> Result<Router> {
    let provider = OpenAIProvider::new(settings.provider.clone())
        .context("Failed to create completion provider")?;

    build_router(settings, Arc::new(provider))
}

/// Create application router around an arbitrary completion provider
pub fn build_router(settings: Settings, provider: Arc<dyn CompletionProvider>) -> Result<Router> {
    health::mark_started();

    let relay = GenerationRelay::new(provider, settings.generation.clone());
    let cors = cors_layer(&settings)?;
    let max_request_size = settings.request.max_request_size;

    let app_state = Arc::new(AppState { settings, relay });

    // Checked by the Json extractor; oversize bodies surface as a 413 rejection
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_logging_middleware))
        .layer(DefaultBodyLimit::max(max_request_size));

    let router = Router::new()
        .route("/api/generar", post(generate::handle_generate))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(middleware_stack);

    Ok(match cors {
        Some(cors) => router.layer(cors),
        None => router,
    })
}

/// CORS layer from the security settings; `None` when disabled
fn cors_layer(settings: &Settings) -> Result<Option<CorsLayer>> {
    if !settings.security.cors_enabled {
        return Ok(None);
    }

    let origins = &settings.security.allowed_origins;
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .iter()
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("Invalid allowed origin: {}", o)))
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any),
    ))
}
