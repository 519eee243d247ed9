//! Shared chat wire model for the `/api/chat` endpoint.
//!
//! This crate owns the JSON representation used by both the server and the
//! `client` view model, so the two sides cannot drift on field names or
//! role spellings.

use serde::{Deserialize, Deserializer, Serialize};

/// Path of the completion endpoint.
pub const CHAT_PATH: &str = "/api/chat";

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Hidden instruction that seeds the conversation.
    System,
    /// Text typed (or injected by a shortcut) on behalf of the reader.
    User,
    /// Reply from a canned response or the completion provider.
    Assistant,
}

impl Role {
    /// Lowercase wire spelling, as used by completion providers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Body of `POST /api/chat`.
///
/// Both fields are optional on the wire: a missing or `null` `messages`
/// list is treated as empty, and `inputValue` is appended after the reference
/// document text when present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<Message>,
    #[serde(default, rename = "inputValue", skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Message>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRequest {
    #[must_use]
    pub fn from_history(messages: Vec<Message>) -> Self {
        Self { messages, input_value: None }
    }
}

/// Body of every non-2xx response from the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
