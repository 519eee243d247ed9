//! Server configuration parsed from environment variables.
//!
//! Provider credentials live in [`crate::llm::config`]; this module covers
//! the listener, the reference document, and the fixed completion settings.

use std::path::PathBuf;
use std::str::FromStr;

use crate::llm::types::Sampling;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DOCUMENT_PATH: &str = "files/RSMtaxes.pdf";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_MAX_TOKENS: u32 = 25;
pub const DEFAULT_TOP_P: f32 = 0.9;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Fixed parameters of every provider call made by the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Instruction placed ahead of the caller's history.
    pub system_prompt: String,
    pub sampling: Sampling,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            sampling: Sampling { max_tokens: DEFAULT_MAX_TOKENS, top_p: DEFAULT_TOP_P },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub document_path: PathBuf,
    pub chat: ChatSettings,
}

impl ServerConfig {
    /// Read `PORT`, `DOCUMENT_PATH`, `CHAT_SYSTEM_PROMPT`, `CHAT_MAX_TOKENS`
    /// and `CHAT_TOP_P`, falling back to defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a set value does not parse
    /// or `CHAT_TOP_P` lies outside `(0, 1]`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let document_path = lookup("DOCUMENT_PATH").map_or_else(|| PathBuf::from(DEFAULT_DOCUMENT_PATH), PathBuf::from);

        let system_prompt = lookup("CHAT_SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        let max_tokens = parse_or(&lookup, "CHAT_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let top_p = parse_or(&lookup, "CHAT_TOP_P", DEFAULT_TOP_P)?;
        if !(top_p > 0.0 && top_p <= 1.0) {
            return Err(ConfigError::InvalidValue { key: "CHAT_TOP_P", value: top_p.to_string() });
        }

        Ok(Self { port, document_path, chat: ChatSettings { system_prompt, sampling: Sampling { max_tokens, top_p } } })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
