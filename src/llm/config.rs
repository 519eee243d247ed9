//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Anthropic,
    OpenAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Optional:
    /// - `LLM_PROVIDER`: `openai` (default) or `anthropic`
    /// - `LLM_API_KEY_ENV`: names the env var containing the key
    ///   (`OPENAI_API_KEY` / `ANTHROPIC_API_KEY` by default)
    /// - `LLM_MODEL`: provider default when absent
    /// - `LLM_BASE_URL`: provider API base URL
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// The key itself is required; an unset or blank key is an error.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when the key is absent and
    /// [`LlmError::ConfigParse`] for an unknown provider.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`LlmConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let provider = parse_provider(lookup("LLM_PROVIDER").as_deref())?;

        let key_var = lookup("LLM_API_KEY_ENV").unwrap_or_else(|| default_key_var(provider).to_string());
        let api_key = lookup(&key_var)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey { var: key_var.clone() })?;

        let model = lookup("LLM_MODEL").unwrap_or_else(|| default_model(provider).to_string());
        let base_url = lookup("LLM_BASE_URL")
            .unwrap_or_else(|| default_base_url(provider).to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = LlmTimeouts {
            request_secs: parse_u64(&lookup, "LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(&lookup, "LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { provider, api_key, model, base_url, timeouts })
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    lookup(key)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_provider(raw: Option<&str>) -> Result<LlmProviderKind, LlmError> {
    match raw.unwrap_or("openai") {
        "openai" => Ok(LlmProviderKind::OpenAi),
        "anthropic" => Ok(LlmProviderKind::Anthropic),
        other => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {other}"))),
    }
}

fn default_key_var(provider: LlmProviderKind) -> &'static str {
    match provider {
        LlmProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        LlmProviderKind::OpenAi => "OPENAI_API_KEY",
    }
}

fn default_model(provider: LlmProviderKind) -> &'static str {
    match provider {
        LlmProviderKind::Anthropic => "claude-3-5-haiku-latest",
        LlmProviderKind::OpenAi => "gpt-3.5-turbo",
    }
}

fn default_base_url(provider: LlmProviderKind) -> &'static str {
    match provider {
        LlmProviderKind::Anthropic => DEFAULT_ANTHROPIC_BASE_URL,
        LlmProviderKind::OpenAi => DEFAULT_OPENAI_BASE_URL,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
