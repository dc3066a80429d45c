//! Content generation handler
//!
//! POST /api/generar

use crate::handlers::AppState;
use crate::models::{ContentRequest, GenerateRequest, GenerateResponse};
use crate::utils::error::{AppError, AppResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle content generation requests
///
/// Rejected bodies are answered with 400 and a detail; provider failures
/// with a fixed 500.
pub async fn handle_generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let Json(request) = payload.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        _ => AppError::Validation(rejection.body_text()),
    })?;

    let content = ContentRequest::try_from(request).map_err(|reason| {
        warn!("Request validation failed: {}", reason);
        AppError::Validation(reason)
    })?;

    debug!(
        "Received generation request: tone={}, audience={}",
        content.tone, content.audience
    );

    let result = state.relay.generate(&content).await?;

    Ok(Json(result.into()))
}
