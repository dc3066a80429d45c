//! Content generation data models
//!
//! Wire bodies of `POST /api/generar` and the domain types built from them

use serde::{Deserialize, Serialize};

/// Prefix of the derived request title
pub const TITLE_PREFIX: &str = "Redacción de";

/// Derive the request title from a content type
pub fn derive_title(content_type: &str) -> String {
    format!("{} {}", TITLE_PREFIX, content_type)
}

/// Request body of `POST /api/generar`
///
/// Older clients send the brief as `prompt`, newer ones as `contenido`;
/// both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contenido: Option<String>,
    #[serde(default)]
    pub tono: String,
    #[serde(default)]
    pub audiencia: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
}

impl GenerateRequest {
    /// The brief, whichever field carried it
    pub fn brief(&self) -> Option<&str> {
        [self.contenido.as_deref(), self.prompt.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

/// A validated content request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub title: String,
    pub body: String,
    pub tone: String,
    pub subtone: Option<String>,
    pub audience: String,
}

impl ContentRequest {
    /// Wire body sent by the client
    pub fn to_wire(&self) -> GenerateRequest {
        GenerateRequest {
            prompt: None,
            contenido: Some(self.body.clone()),
            tono: self.tone.clone(),
            audiencia: self.audience.clone(),
            subtono: self.subtone.clone(),
            titulo: Some(self.title.clone()),
            tipo: None,
        }
    }
}

impl TryFrom<GenerateRequest> for ContentRequest {
    type Error = String;

    fn try_from(request: GenerateRequest) -> Result<Self, Self::Error> {
        let body = request
            .brief()
            .ok_or_else(|| "El contenido solicitado no puede estar vacío".to_string())?
            .to_string();

        if request.tono.trim().is_empty() {
            return Err("El tono es obligatorio".to_string());
        }

        if request.audiencia.trim().is_empty() {
            return Err("La audiencia es obligatoria".to_string());
        }

        let title = match (&request.titulo, &request.tipo) {
            (Some(titulo), _) if !titulo.trim().is_empty() => titulo.clone(),
            (_, Some(tipo)) if !tipo.trim().is_empty() => derive_title(tipo),
            _ => String::new(),
        };

        Ok(Self {
            title,
            body,
            tone: request.tono,
            subtone: request.subtono.filter(|s| !s.trim().is_empty()),
            audience: request.audiencia,
        })
    }
}

/// Successful generation payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
}

/// Response body of `POST /api/generar`
///
/// The first relay revision answered with `texto`; it is read as an alias.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, alias = "texto")]
    pub resultado: Option<String>,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            resultado: Some(result.text),
        }
    }
}

/// Error body answered by the relay and its sibling endpoints
///
/// Different endpoints fill different fields, so all are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Most specific human-readable text: `detail`, then `message`, then `error`
    pub fn best_detail(&self) -> Option<&str> {
        [&self.detail, &self.message, &self.error]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_prefers_contenido() {
        let request = GenerateRequest {
            prompt: Some("viejo".to_string()),
            contenido: Some("nuevo".to_string()),
            ..Default::default()
        };
        assert_eq!(request.brief(), Some("nuevo"));

        let request = GenerateRequest {
            prompt: Some("viejo".to_string()),
            contenido: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(request.brief(), Some("viejo"));
    }

    #[test]
    fn test_title_from_tipo() {
        let request = GenerateRequest {
            prompt: Some("Cierre de calles".to_string()),
            tono: "formal".to_string(),
            audiencia: "general".to_string(),
            tipo: Some("comunicado".to_string()),
            ..Default::default()
        };
        let content = ContentRequest::try_from(request).unwrap();
        assert_eq!(content.title, "Redacción de comunicado");
    }

    #[test]
    fn test_best_detail_order() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"e","message":"m","detail":"d"}"#).unwrap();
        assert_eq!(body.best_detail(), Some("d"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":"e","message":"m"}"#).unwrap();
        assert_eq!(body.best_detail(), Some("m"));

        let body: ErrorBody = serde_json::from_str(r#"{"otro":1}"#).unwrap();
        assert_eq!(body.best_detail(), None);
    }
}
