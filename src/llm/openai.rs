//! OpenAI-compatible `/chat/completions` client.
//!
//! Messages are forwarded as-is: the shared `protocol::Message` already has
//! the `{ role, content }` shape the endpoint expects. Response parsing is a
//! pure function for testability.

use std::time::Duration;

use protocol::Message;
use serde::Serialize;
use serde_json::Value;

use super::config::LlmTimeouts;
use super::types::{ChatResponse, LlmError, Sampling};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    pub async fn chat(&self, model: &str, sampling: Sampling, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        let body = CcRequest { model, messages, max_tokens: sampling.max_tokens, top_p: sampling.top_p };
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_chat_completions_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    top_p: f32,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();
    let prompt_tokens = root
        .get("usage")
        .and_then(|u| u.get("prompt_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let completion_tokens = root
        .get("usage")
        .and_then(|u| u.get("completion_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };

    // A null `content` is legal (e.g. refusals); surface it as an empty reply.
    let text = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let stop_reason = match choice.get("finish_reason").and_then(Value::as_str) {
        Some("length") => "max_tokens",
        _ => "end_turn",
    }
    .to_string();

    Ok(ChatResponse { text, model, stop_reason, input_tokens: prompt_tokens, output_tokens: completion_tokens })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
