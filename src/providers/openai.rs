//! OpenAI Provider implementation
//!
//! Talks to Azure OpenAI deployments and to OpenAI-compatible endpoints

use super::CompletionProvider;
use crate::config::{ProviderConfig, ProviderKind};
use crate::models::completion::*;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// OpenAI Provider
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    client: Client,
    config: ProviderConfig,
}

impl OpenAIProvider {
    /// Create a provider from the relay's provider configuration
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("redactor/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build the request URL
    pub fn build_url(&self) -> String {
        let base_url = self.config.endpoint.trim_end_matches('/');
        match self.config.kind {
            ProviderKind::Azure => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                base_url,
                self.config.deployment.trim().trim_matches('/'),
                self.config.api_version.trim()
            ),
            ProviderKind::OpenAi => format!("{}/chat/completions", base_url),
        }
    }

    /// Authentication header name and value
    fn auth_header(&self) -> (&'static str, String) {
        match self.config.kind {
            ProviderKind::Azure => ("api-key", self.config.api_key.clone()),
            ProviderKind::OpenAi => ("Authorization", format!("Bearer {}", self.config.api_key)),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    fn name(&self) -> &str {
        match self.config.kind {
            ProviderKind::Azure => "azure",
            ProviderKind::OpenAi => "openai",
        }
    }

    async fn chat_complete(&self, mut request: ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        debug!("Sending {} chat completion request", self.name());

        // Azure routes by deployment in the URL; OpenAI needs the model in the body
        request.model = match self.config.kind {
            ProviderKind::Azure => None,
            ProviderKind::OpenAi => Some(self.config.deployment.clone()),
        };

        let url = self.build_url();
        let (auth_name, auth_value) = self.auth_header();

        let response = self
            .client
            .post(&url)
            .header(auth_name, auth_value)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();

        if status.is_success() {
            let completion: ChatCompletionResponse = response
                .json()
                .await
                .context("Failed to parse completion response")?;

            debug!("Completion request finished with {} choices", completion.choices.len());
            Ok(completion)
        } else {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<ProviderErrorResponse>(&error_text) {
                error!("Provider API error: {:?}", error_response.error);
                anyhow::bail!("Provider API error ({}): {}", status, error_response.error.message);
            } else {
                error!("Provider API request failed: {} - {}", status, error_text);
                anyhow::bail!("Provider API request failed: {} - {}", status, error_text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kind: ProviderKind) -> ProviderConfig {
        ProviderConfig {
            kind,
            endpoint: "https://prensa.openai.azure.com/".to_string(),
            api_key: "test-key".to_string(),
            deployment: "gpt-4o".to_string(),
            api_version: "2024-06-01".to_string(),
            timeout: 30,
        }
    }

    #[test]
    fn test_azure_url() {
        let provider = OpenAIProvider::new(config(ProviderKind::Azure)).unwrap();
        assert_eq!(
            provider.build_url(),
            "https://prensa.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-06-01"
        );
        assert_eq!(provider.auth_header().0, "api-key");
    }

    #[test]
    fn test_openai_url() {
        let provider = OpenAIProvider::new(config(ProviderKind::OpenAi)).unwrap();
        assert_eq!(provider.build_url(), "https://prensa.openai.azure.com/chat/completions");
        assert_eq!(provider.auth_header().1, "Bearer test-key");
    }
}
