//! Declared field schema of the generation form
//!
//! A single schema drives the form: content types, tones with their
//! dependent sub-tones, and audiences. The standard schema is the one used
//! by the press office; other schemas can be deserialized from JSON.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A selectable value and its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// A tone and the sub-tone labels that refine it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneOption {
    pub value: String,
    #[serde(default)]
    pub subtones: Vec<String>,
}

impl ToneOption {
    /// Sub-tones as wire values (lower-cased labels)
    pub fn subtone_values(&self) -> impl Iterator<Item = String> + '_ {
        self.subtones.iter().map(|label| label.to_lowercase())
    }

    pub fn accepts_subtone(&self, value: &str) -> bool {
        self.subtone_values().any(|candidate| candidate == value)
    }
}

/// Field schema of the generation form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "tipos")]
    pub content_types: Vec<FieldOption>,
    #[serde(rename = "tonos")]
    pub tones: Vec<ToneOption>,
    #[serde(rename = "audiencias")]
    pub audiences: Vec<FieldOption>,
}

static STANDARD: Lazy<FieldSchema> = Lazy::new(|| {
    let tone = |value: &str, subtones: &[&str]| ToneOption {
        value: value.to_string(),
        subtones: subtones.iter().map(|s| s.to_string()).collect(),
    };

    FieldSchema {
        content_types: vec![
            FieldOption::new("comunicado", "Comunicado"),
            FieldOption::new("boletin", "Boletín"),
            FieldOption::new("correo", "Correo Institucional"),
            FieldOption::new("post", "Post para Redes"),
            FieldOption::new("informe", "Informe"),
            FieldOption::new("articulo", "Artículo"),
            FieldOption::new("otro", "Otro"),
        ],
        tones: vec![
            tone("institucional", &["Profesional", "Objetivo", "Serio", "Neutro", "Respetuoso"]),
            tone("cordial", &["Amigable", "Cercano", "Comprensivo", "Solidario", "Motivacional"]),
            tone("informativo", &["Claro", "Didáctico", "Accesible", "Directo"]),
            tone("persuasivo", &["Enérgico", "Inspirador", "Emocional", "Urgente"]),
            tone(
                "creativo",
                &["Divertido", "Irónico", "Descontracturado", "Popular", "Estilo redes sociales"],
            ),
            tone("reflexivo", &["Crítico", "Argumentativo", "Especializado", "Científico"]),
        ],
        audiences: vec![
            FieldOption::new("general", "Público general"),
            FieldOption::new("interna", "Interna"),
            FieldOption::new("institucional", "Institucional"),
        ],
    }
});

impl FieldSchema {
    /// The press office schema
    pub fn standard() -> &'static FieldSchema {
        &STANDARD
    }

    pub fn content_type(&self, value: &str) -> Option<&FieldOption> {
        self.content_types.iter().find(|o| o.value == value)
    }

    pub fn tone(&self, value: &str) -> Option<&ToneOption> {
        self.tones.iter().find(|t| t.value == value)
    }

    pub fn audience(&self, value: &str) -> Option<&FieldOption> {
        self.audiences.iter().find(|o| o.value == value)
    }

    /// Sub-tone wire values available for `tone`; empty for unknown tones
    pub fn subtones(&self, tone: &str) -> Vec<String> {
        self.tone(tone)
            .map(|t| t.subtone_values().collect())
            .unwrap_or_default()
    }

    /// First entry of each enumeration, used as the form's initial selection
    pub fn defaults(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.content_types.first()?.value.as_str(),
            self.tones.first()?.value.as_str(),
            self.audiences.first()?.value.as_str(),
        ))
    }

    /// Reject schemas the form cannot be driven by
    pub fn validate(&self) -> Result<(), String> {
        if self.defaults().is_none() {
            return Err("Schema needs at least one content type, tone and audience".to_string());
        }
        Ok(())
    }
}
