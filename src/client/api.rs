//! Relay HTTP client
//!
//! Joins every API path to the configured base URL and turns responses into
//! `ClientError`s

use crate::client::error::{ClientError, ErrorReport};
use crate::config::ClientSettings;
use crate::models::{ContentRequest, GenerateResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Content generation path
pub const GENERATE_PATH: &str = "/api/generar";
/// Article persistence path
pub const SAVE_ARTICLE_PATH: &str = "/api/guardar-articulo";
/// Text-to-speech path
pub const SPEECH_PATH: &str = "/api/texto-audio";
/// Document export path
pub const EXPORT_PATH: &str = "/api/descargar-articulo";
/// URL transcription path
pub const TRANSCRIBE_URL_PATH: &str = "/api/transcribir";
/// File transcription path
pub const TRANSCRIBE_FILE_PATH: &str = "/api/transcribir-archivo";

/// Something that can turn a content request into a relay response
#[async_trait]
pub trait GenerationApi: Send + Sync {
    async fn generate(&self, request: &ContentRequest) -> Result<GenerateResponse, ClientError>;
}

/// HTTP client for the relay and its sibling endpoints
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    settings: ClientSettings,
}

impl RelayClient {
    /// Create a new client instance
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .user_agent(concat!("redactor-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Start a POST request to a relative path
    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.settings.url(path))
    }

    /// Send a request; non-2xx statuses become `ClientError::Http`
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!("Relay answered {} for {}", status, response.url().path());

        if status.is_success() {
            Ok(response)
        } else {
            Err(ClientError::Http(ErrorReport::from_response(response).await))
        }
    }

    /// POST a JSON body to a relative path
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ClientError> {
        self.send(self.post(path).json(body)).await
    }
}

#[async_trait]
impl GenerationApi for RelayClient {
    async fn generate(&self, request: &ContentRequest) -> Result<GenerateResponse, ClientError> {
        let response = self.post_json(GENERATE_PATH, &request.to_wire()).await?;

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
