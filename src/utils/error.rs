//! Error handling module
//!
//! Defines the relay's error types and how they are answered over HTTP

use crate::models::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Fixed message answered for every provider failure
pub const GENERATION_FAILED: &str = "Error al generar contenido";

/// Fixed message answered for rejected request bodies
pub const INVALID_REQUEST: &str = "Solicitud inválida";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Completion provider failed
    #[error("Completion provider error: {0}")]
    Upstream(String),

    /// Payload too large
    #[error("Payload too large")]
    PayloadTooLarge,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client
    ///
    /// Only rejected requests carry a detail; provider failures collapse
    /// into the same fixed message.
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            AppError::Validation(reason) => ErrorBody::new(INVALID_REQUEST).with_detail(reason.clone()),
            AppError::PayloadTooLarge => ErrorBody::new(INVALID_REQUEST).with_detail(self.to_string()),
            AppError::Upstream(_) => ErrorBody::new(GENERATION_FAILED),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add upstream error context
    fn upstream_context(self, message: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn upstream_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Upstream(format!("{}: {:#}", message, e)))
    }
}
