//! Provider module
//!
//! Defines the completion provider trait and its HTTP implementation

pub mod openai;

use crate::models::completion::{ChatCompletionRequest, ChatCompletionResponse};
use anyhow::Result;
use async_trait::async_trait;

/// Upstream chat completion provider
///
/// The relay only needs non-streaming completions; any error returned here
/// is answered to the client as a generic generation failure.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Send a chat completion request
    async fn chat_complete(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse>;
}

pub use openai::OpenAIProvider;
