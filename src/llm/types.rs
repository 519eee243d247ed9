//! LLM types — provider-neutral request parameters, responses, and errors.
//!
//! Conversation messages themselves come from the shared `protocol` crate so
//! the history posted by the client is forwarded without re-mapping.

use protocol::Message;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// A hand-built config carried an empty key.
    #[error("API key is blank")]
    BlankApiKey,

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Stable identifier for logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::BlankApiKey => "E_BLANK_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// `true` when the provider rejected the call for quota or rate reasons.
    #[must_use]
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, Self::ApiResponse { status: 429, .. })
    }
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// Generation bounds sent with every completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Nucleus-sampling probability mass.
    pub top_p: f32,
}

/// Response from an LLM chat call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    /// Concatenated text of the reply. Empty when the provider returned none.
    pub text: String,
    pub model: String,
    pub stop_reason: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for LLM chat. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send an ordered message list to the provider and return its reply.
    ///
    /// System-role messages are passed in-line; adapters whose API takes the
    /// system prompt separately lift them out.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is
    /// malformed.
    async fn chat(&self, sampling: Sampling, messages: &[Message]) -> Result<ChatResponse, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
