//! Chat completion data models
//!
//! Request and response structures of the OpenAI-style chat completion API
//! spoken by both Azure OpenAI deployments and OpenAI-compatible endpoints

use serde::{Deserialize, Serialize};

/// Chat completion request structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model name (omitted for Azure, where the deployment is in the URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Message list
    pub messages: Vec<ChatMessage>,
    /// Temperature parameter (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Chat message structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role (system/user/assistant)
    pub role: ChatRole,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Chat completion response structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response ID
    #[serde(default)]
    pub id: String,
    /// Model used
    #[serde(default)]
    pub model: String,
    /// Choice list
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    /// Usage statistics (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionUsage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, or an empty string when the provider
    /// returned no choice or no content
    pub fn first_text(&self) -> String {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.clone())
            .unwrap_or_default()
    }
}

/// Single completion choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message (absent when filtered)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ResponseMessage>,
    /// Finish reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Generated message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Provider error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderErrorResponse {
    pub error: ProviderError,
}

/// Provider error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderError {
    /// Error message
    pub message: String,
    /// Error type (optional)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Error code, a string or a number depending on the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
}
