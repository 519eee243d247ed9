//! LLM — provider adapter for the completion endpoint.
//!
//! DESIGN
//! ======
//! The `LlmClient` is built explicitly from an [`LlmConfig`] and injected into
//! application state as `Arc<dyn LlmChat>`; nothing is created at module load.
//! A missing credential is rejected while building the config, before the
//! server binds. `LLM_PROVIDER` selects `OpenAI`-compatible chat completions
//! (default) or the Anthropic Messages API.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use protocol::Message;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Sampling};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either `OpenAI` or Anthropic.
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
}

enum LlmProvider {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::BlankApiKey);
        }
        let model = config.model.clone();
        let inner = match config.provider {
            LlmProviderKind::Anthropic => LlmProvider::Anthropic(anthropic::AnthropicClient::new(
                config.api_key,
                config.base_url,
                config.timeouts,
            )?),
            LlmProviderKind::OpenAi => {
                LlmProvider::OpenAi(openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name (e.g. `"gpt-3.5-turbo"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, sampling: Sampling, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        match &self.inner {
            LlmProvider::Anthropic(c) => c.chat(&self.model, sampling, messages).await,
            LlmProvider::OpenAi(c) => c.chat(&self.model, sampling, messages).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::config::{DEFAULT_OPENAI_BASE_URL, LlmTimeouts};
    use super::*;

    fn config(provider: LlmProviderKind, api_key: &str) -> LlmConfig {
        LlmConfig {
            provider,
            api_key: api_key.into(),
            model: "test-model".into(),
            base_url: DEFAULT_OPENAI_BASE_URL.into(),
            timeouts: LlmTimeouts { request_secs: 5, connect_secs: 1 },
        }
    }

    #[test]
    fn from_config_keeps_model() {
        let client = LlmClient::from_config(config(LlmProviderKind::OpenAi, "sk-test")).unwrap();
        assert_eq!(client.model(), "test-model");
        assert!(matches!(client.inner, LlmProvider::OpenAi(_)));
    }

    #[test]
    fn from_config_selects_anthropic() {
        let client = LlmClient::from_config(config(LlmProviderKind::Anthropic, "key")).unwrap();
        assert!(matches!(client.inner, LlmProvider::Anthropic(_)));
    }

    #[test]
    fn from_config_rejects_blank_key() {
        let result = LlmClient::from_config(config(LlmProviderKind::OpenAi, "  "));
        let err = result.err().expect("blank key must be rejected");
        assert!(matches!(err, LlmError::BlankApiKey));
        assert_eq!(err.to_string(), "API key is blank");
    }
}
