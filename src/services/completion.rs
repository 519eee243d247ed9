//! Completion service — conversation + reference document → provider reply.
//!
//! DESIGN
//! ======
//! The provider sees, in order: the configured system instruction, the
//! caller's history verbatim, then one synthesized user turn carrying the
//! reference document text followed by the optional extra input. One call,
//! no retry.

use protocol::{ChatRequest, Message};
use tracing::{info, warn};

use crate::llm::types::LlmError;
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl CompletionError {
    /// `true` when the provider ran out of quota for this credential.
    #[must_use]
    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            Self::Llm(e) => e.is_quota_exhausted(),
        }
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Forward `request` to the provider and wrap its text as an assistant message.
///
/// # Errors
///
/// Returns [`CompletionError::Llm`] when the provider call fails.
pub async fn complete(state: &AppState, request: &ChatRequest) -> Result<Message, CompletionError> {
    info!(history_len = request.messages.len(), "completion: request received");

    let messages = build_provider_messages(
        &state.chat.system_prompt,
        &request.messages,
        state.document.text(),
        request.input_value.as_deref().unwrap_or_default(),
    );

    let response = state
        .llm
        .chat(state.chat.sampling, &messages)
        .await
        .inspect_err(|e| warn!(code = e.error_code(), error = %e, "completion: provider call failed"))?;

    info!(
        model = %response.model,
        stop_reason = %response.stop_reason,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "completion: provider replied"
    );

    Ok(Message::assistant(response.text))
}

/// Assemble the ordered provider message list.
#[must_use]
pub fn build_provider_messages(system: &str, history: &[Message], document: &str, extra_input: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(system));
    messages.extend_from_slice(history);
    messages.push(Message::user(format!("{document}\n{extra_input}")));
    messages
}

#[cfg(test)]
#[path = "completion_test.rs"]
mod tests;
