//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::debug;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Configured completion provider
    pub provider: String,
    /// Configuration status
    pub config: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Record the process start; called when the router is built
pub fn mark_started() {
    START_TIME.get_or_init(Instant::now);
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            provider: format!(
                "{} ({})",
                state.settings.provider.kind, state.settings.provider.deployment
            ),
            config: "valid".to_string(),
            uptime_seconds: get_uptime_seconds(),
        }),
    })
}

/// Liveness check
///
/// GET /health/live
/// Does not look at the provider
pub async fn liveness_check() -> Json<HealthResponse> {
    debug!("Executing liveness check");

    Json(HealthResponse {
        status: "alive".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: None,
    })
}

/// Get service uptime in seconds
fn get_uptime_seconds() -> u64 {
    START_TIME.get_or_init(Instant::now).elapsed().as_secs()
}
