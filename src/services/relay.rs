//! Generation relay service
//!
//! Forwards a content request to the completion provider and extracts the
//! first generated text

use crate::config::GenerationConfig;
use crate::models::completion::ChatCompletionRequest;
use crate::models::{ContentRequest, GenerationResult};
use crate::providers::CompletionProvider;
use crate::services::prompt::build_messages;
use crate::utils::error::{AppResult, ErrorContext};
use crate::utils::logging::{create_completion_log_summary, create_content_log_summary};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Stateless relay between content requests and the completion provider
#[derive(Clone)]
pub struct GenerationRelay {
    provider: Arc<dyn CompletionProvider>,
    generation: GenerationConfig,
}

impl fmt::Debug for GenerationRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRelay")
            .field("provider", &self.provider.name())
            .field("generation", &self.generation)
            .finish()
    }
}

impl GenerationRelay {
    pub fn new(provider: Arc<dyn CompletionProvider>, generation: GenerationConfig) -> Self {
        Self {
            provider,
            generation,
        }
    }

    /// Completion request with the fixed generation parameters
    pub fn build_completion_request(&self, request: &ContentRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: None,
            messages: build_messages(request),
            temperature: Some(self.generation.temperature),
            max_tokens: Some(self.generation.max_tokens),
        }
    }

    /// Generate text for a validated request
    ///
    /// An empty completion is a valid result. Provider failures are logged
    /// here with their full detail and returned as `AppError::Upstream`.
    pub async fn generate(&self, request: &ContentRequest) -> AppResult<GenerationResult> {
        if let Ok(summary) = serde_json::to_string_pretty(&create_content_log_summary(request)) {
            debug!("📥 Content request:\n{}", summary);
        }

        let completion_request = self.build_completion_request(request);
        if let Ok(summary) = serde_json::to_string_pretty(&create_completion_log_summary(&completion_request)) {
            debug!("🔄 Completion request:\n{}", summary);
        }

        let response = self
            .provider
            .chat_complete(completion_request)
            .await
            .map_err(|e| {
                error!("Completion provider '{}' failed: {:#}", self.provider.name(), e);
                e
            })
            .upstream_context("Completion request failed")?;

        let text = response.first_text();
        if let Some(usage) = &response.usage {
            info!(
                "Generation completed: {} chars, {} prompt tokens, {} completion tokens",
                text.chars().count(),
                usage.prompt_tokens,
                usage.completion_tokens
            );
        } else {
            info!("Generation completed: {} chars", text.chars().count());
        }

        Ok(GenerationResult { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::completion::*;
    use crate::utils::error::AppError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedProvider {
        reply: Option<String>,
        seen: Mutex<Vec<ChatCompletionRequest>>,
    }

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn chat_complete(&self, request: ChatCompletionRequest) -> anyhow::Result<ChatCompletionResponse> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Some(text) => Ok(ChatCompletionResponse {
                    choices: vec![ChatChoice {
                        message: Some(ResponseMessage {
                            role: Some("assistant".to_string()),
                            content: Some(text.clone()),
                        }),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
                None => anyhow::bail!("429 quota exceeded"),
            }
        }
    }

    fn request() -> ContentRequest {
        ContentRequest {
            title: "Redacción de boletin".to_string(),
            body: "Vacunación en escuelas".to_string(),
            tone: "informativo".to_string(),
            subtone: None,
            audience: "general".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_uses_fixed_parameters() {
        let provider = Arc::new(FixedProvider {
            reply: Some("Boletín listo".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let relay = GenerationRelay::new(provider.clone(), GenerationConfig::default());

        let result = relay.generate(&request()).await.unwrap();
        assert_eq!(result.text, "Boletín listo");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].max_tokens, Some(800));
        assert_eq!(seen[0].temperature, Some(0.7));
        assert_eq!(seen[0].messages.len(), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_is_upstream_error() {
        let provider = Arc::new(FixedProvider {
            reply: None,
            seen: Mutex::new(Vec::new()),
        });
        let relay = GenerationRelay::new(provider, GenerationConfig::default());

        let err = relay.generate(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(ref msg) if msg.contains("quota")));
    }
}
