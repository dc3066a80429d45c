//! Audio transcription calls
//!
//! Audio comes either from a public URL or from a local file uploaded as
//! multipart form data.

use crate::client::api::{RelayClient, TRANSCRIBE_FILE_PATH, TRANSCRIBE_URL_PATH};
use crate::client::error::ClientError;
use crate::models::article::{TranscriptionRequest, TranscriptionResponse, TRANSCRIPTION_OUTPUT_MODE};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::path::Path;

/// Shown when the service answered without text
pub const EMPTY_TRANSCRIPTION_PLACEHOLDER: &str = "✅ Transcripción completada, pero vacía.";

/// Local validation message for a missing file
pub const MISSING_FILE_MESSAGE: &str = "Seleccioná un archivo de audio.";

/// Local validation message for a bad URL
pub const INVALID_URL_MESSAGE: &str = "Ingresá una URL válida.";

/// Where the audio comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    Url(String),
    File {
        file_name: String,
        bytes: Vec<u8>,
        mime: Option<String>,
    },
}

impl AudioSource {
    /// Read a local audio file
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(AudioSource::File {
            file_name,
            bytes,
            mime: None,
        })
    }

    /// Check the source before any request is issued
    pub fn validate(&self) -> Result<(), ClientError> {
        match self {
            AudioSource::Url(link) => {
                if link.trim().is_empty() || Url::parse(link.trim()).is_err() {
                    return Err(ClientError::Validation(INVALID_URL_MESSAGE.to_string()));
                }
            }
            AudioSource::File { file_name, bytes, .. } => {
                if file_name.is_empty() || bytes.is_empty() {
                    return Err(ClientError::Validation(MISSING_FILE_MESSAGE.to_string()));
                }
            }
        }
        Ok(())
    }
}

/// Calls to the transcription endpoints
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    relay: RelayClient,
}

impl TranscriptionClient {
    pub fn new(relay: RelayClient) -> Self {
        Self { relay }
    }

    /// Transcribe the source, returning the text to display
    pub async fn transcribe(&self, source: &AudioSource) -> Result<String, ClientError> {
        source.validate()?;

        let response = match source {
            AudioSource::Url(link) => {
                let body = TranscriptionRequest::for_link(link.trim());
                self.relay.post_json(TRANSCRIBE_URL_PATH, &body).await?
            }
            AudioSource::File {
                file_name,
                bytes,
                mime,
            } => {
                let mut part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                if let Some(mime) = mime {
                    part = part.mime_str(mime).map_err(|e| {
                        ClientError::Validation(format!("Tipo de archivo inválido: {}", e))
                    })?;
                }
                let form = Form::new()
                    .part("audio", part)
                    .text("modo_salida", TRANSCRIPTION_OUTPUT_MODE);
                self.relay
                    .send(self.relay.post(TRANSCRIBE_FILE_PATH).multipart(form))
                    .await?
            }
        };

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        Ok(body
            .transcripcion
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| EMPTY_TRANSCRIPTION_PLACEHOLDER.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(AudioSource::Url("https://www.youtube.com/watch?v=Sdb9yyA4W5k".to_string())
            .validate()
            .is_ok());
        assert_eq!(
            AudioSource::Url("no es una url".to_string()).validate(),
            Err(ClientError::Validation(INVALID_URL_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_file_validation() {
        let empty = AudioSource::File {
            file_name: "nota.mp3".to_string(),
            bytes: Vec::new(),
            mime: None,
        };
        assert_eq!(
            empty.validate(),
            Err(ClientError::Validation(MISSING_FILE_MESSAGE.to_string()))
        );
    }
}
