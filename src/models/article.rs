//! Article and transcription data models
//!
//! Bodies exchanged with the article persistence, text-to-speech, export
//! and transcription endpoints

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title and content pair promoted from a generation result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "contenido")]
    pub content: String,
    #[serde(rename = "autor", default)]
    pub author: String,
}

/// Body of `POST /api/texto-audio`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub texto: String,
}

/// Document export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Docx,
}

impl ExportFormat {
    /// File extension, also used as the `formato` query value
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" => Ok(ExportFormat::Txt),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(format!("Unsupported export format: {}", other)),
        }
    }
}

/// Output layout requested from the transcription service
pub const TRANSCRIPTION_OUTPUT_MODE: &str = "dialogo";

/// Body of `POST /api/transcribir`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionRequest {
    pub link: String,
    pub modo_salida: String,
}

impl TranscriptionRequest {
    pub fn for_link(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            modo_salida: TRANSCRIPTION_OUTPUT_MODE.to_string(),
        }
    }
}

/// Response of both transcription endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    #[serde(default)]
    pub transcripcion: Option<String>,
}
