//! Article persistence, speech and export calls

use crate::client::api::{RelayClient, EXPORT_PATH, SAVE_ARTICLE_PATH, SPEECH_PATH};
use crate::client::error::ClientError;
use crate::models::article::SpeechRequest;
use crate::models::{Article, ExportFormat};
use std::path::{Path, PathBuf};
use tracing::info;

/// Downloaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Write the document into `dir` under its download name
    pub async fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}

/// Download file name `{title}.{format}`
///
/// Path separators are replaced so the name stays a single component.
pub fn export_file_name(title: &str, format: ExportFormat) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '-' } else { c })
        .collect();
    let stem = if stem.is_empty() { "articulo".to_string() } else { stem };
    format!("{}.{}", stem, format.extension())
}

/// Calls to the article endpoints
#[derive(Debug, Clone)]
pub struct ArticleClient {
    relay: RelayClient,
}

impl ArticleClient {
    pub fn new(relay: RelayClient) -> Self {
        Self { relay }
    }

    /// POST /api/guardar-articulo
    pub async fn save(&self, article: &Article) -> Result<(), ClientError> {
        self.relay.post_json(SAVE_ARTICLE_PATH, article).await?;
        info!("Article saved: {}", article.title);
        Ok(())
    }

    /// POST /api/texto-audio, returning the audio payload
    pub async fn speak(&self, text: &str) -> Result<Vec<u8>, ClientError> {
        let body = SpeechRequest {
            texto: text.to_string(),
        };
        let response = self.relay.post_json(SPEECH_PATH, &body).await?;
        let audio = response.bytes().await?;
        Ok(audio.to_vec())
    }

    /// POST /api/descargar-articulo?formato={format}
    pub async fn export(&self, article: &Article, format: ExportFormat) -> Result<ExportedDocument, ClientError> {
        let request = self
            .relay
            .post(EXPORT_PATH)
            .query(&[("formato", format.extension())])
            .json(article);
        let response = self.relay.send(request).await?;
        let bytes = response.bytes().await?;

        Ok(ExportedDocument {
            file_name: export_file_name(&article.title, format),
            format,
            bytes: bytes.to_vec(),
        })
    }
}
