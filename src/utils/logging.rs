//! Logging utilities
//!
//! Shared helpers that keep briefs and generated text out of debug logs
//! beyond a short prefix

use crate::models::completion::{ChatCompletionRequest, ChatRole};
use crate::models::ContentRequest;

/// Set to true to include full prompts in debug logs
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    let total = s.chars().count();
    if total > max_chars {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}... ({} chars truncated)", head, total - max_chars)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of a content request for logging
pub fn create_content_log_summary(request: &ContentRequest) -> serde_json::Value {
    let body = if VERBOSE_REQUEST_LOGGING {
        request.body.clone()
    } else {
        truncate_content(&request.body, 120)
    };

    serde_json::json!({
        "title": request.title,
        "tone": request.tone,
        "subtone": request.subtone,
        "audience": request.audience,
        "body": body,
    })
}

/// Create a filtered summary of a completion request for logging
pub fn create_completion_log_summary(request: &ChatCompletionRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|msg| {
            let max_len = if msg.role == ChatRole::System { 100 } else { 200 };
            let content = if VERBOSE_REQUEST_LOGGING {
                msg.content.clone()
            } else {
                truncate_content(&msg.content, max_len)
            };
            serde_json::json!({ "role": msg.role, "content": content })
        })
        .collect();

    serde_json::json!({
        "model": request.model,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
        "messages": messages,
    })
}
