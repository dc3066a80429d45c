//! Client error types
//!
//! Every failure of a client-side call ends up as one of these and is
//! rendered as a message, never propagated as a panic.

use crate::models::ErrorBody;
use reqwest::{Response, StatusCode};
use thiserror::Error;
use tracing::warn;

/// Fixed message shown when the relay cannot be reached at all
pub const CONNECTIVITY_MESSAGE: &str = "No se pudo conectar con el servidor.";

/// Error derived from a non-2xx response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub http_status: u16,
    pub detail: Option<String>,
}

impl ErrorReport {
    /// Build a report from a failed response, reading its body as JSON when
    /// possible
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.best_detail().map(str::to_string),
            Err(e) => {
                warn!("Error body from {} is not JSON: {}", status, e);
                None
            }
        };

        Self {
            http_status: status.as_u16(),
            detail,
        }
    }

    /// Detail, falling back to the status line reason phrase
    pub fn detail_or_status(&self) -> String {
        match &self.detail {
            Some(detail) => detail.clone(),
            None => StatusCode::from_u16(self.http_status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Respuesta no válida")
                .to_string(),
        }
    }
}

/// Client error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Local validation failed; no request was issued
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-2xx status
    #[error("Error del servidor ({}): {}", .0.http_status, .0.detail_or_status())]
    Http(ErrorReport),

    /// The request never completed
    #[error("{}", CONNECTIVITY_MESSAGE)]
    Network,

    /// A 2xx response whose body could not be read
    #[error("Respuesta no válida del servidor: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Message rendered in the error panel
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else {
            // Connection refused, DNS, TLS, timeouts: the raw error stays in the logs
            warn!("Request could not complete: {}", e);
            ClientError::Network
        }
    }
}
