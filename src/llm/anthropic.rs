//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/v1/messages`. The Messages API takes the system
//! prompt as a top-level field, so system-role entries are lifted out of the
//! history before sending. Pure parsing in `parse_response` for testability.

use std::time::Duration;

use protocol::{Message, Role};
use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::types::{ChatResponse, LlmError, Sampling};

const API_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
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
        let (system, turns) = split_system(messages);
        let body = ApiRequest {
            model,
            max_tokens: sampling.max_tokens,
            top_p: sampling.top_p,
            system: system.as_deref(),
            messages: &turns,
        };

        let response = self
            .http
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
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

        parse_response(&text)
    }
}

/// Separate system prompts from conversational turns.
///
/// Multiple system messages are joined with a blank line, in order.
fn split_system(messages: &[Message]) -> (Option<String>, Vec<ApiMessage<'_>>) {
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect();
    let turns = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| ApiMessage { role: m.role.as_str(), content: &m.content })
        .collect();
    let system = if system.is_empty() { None } else { Some(system.join("\n\n")) };
    (system, turns)
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: &'a [ApiMessage<'a>],
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ApiContentBlock>,
    model: String,
    stop_reason: Option<String>,
    usage: Usage,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ApiContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text = api
        .content
        .into_iter()
        .filter_map(|block| match block {
            ApiContentBlock::Text { text } => Some(text),
            ApiContentBlock::Unknown => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(ChatResponse {
        text,
        model: api.model,
        stop_reason: api.stop_reason.unwrap_or_else(|| "end_turn".to_string()),
        input_tokens: api.usage.input_tokens,
        output_tokens: api.usage.output_tokens,
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
