//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Every field is immutable after startup: the provider client, the cached
//! reference document, and the completion settings. Requests share nothing
//! else.

use std::sync::Arc;

use crate::config::ChatSettings;
use crate::document::ReferenceDocument;
use crate::llm::LlmChat;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmChat>,
    pub document: Arc<ReferenceDocument>,
    pub chat: Arc<ChatSettings>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, document: ReferenceDocument, chat: ChatSettings) -> Self {
        Self { llm, document: Arc::new(document), chat: Arc::new(chat) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use protocol::Message;

    use super::*;
    use crate::llm::types::{ChatResponse, LlmError, Sampling};

    /// Scripted provider that records every call it receives.
    pub struct MockLlm {
        reply: Mutex<Option<Result<String, LlmError>>>,
        pub calls: Mutex<Vec<(Sampling, Vec<Message>)>>,
    }

    impl MockLlm {
        /// Always answers with `text`.
        #[must_use]
        pub fn replying(text: &str) -> Self {
            Self { reply: Mutex::new(Some(Ok(text.to_string()))), calls: Mutex::new(Vec::new()) }
        }

        /// Fails the next call with `err`, then answers `"done"`.
        #[must_use]
        pub fn failing(err: LlmError) -> Self {
            Self { reply: Mutex::new(Some(Err(err))), calls: Mutex::new(Vec::new()) }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl LlmChat for MockLlm {
        async fn chat(&self, sampling: Sampling, messages: &[Message]) -> Result<ChatResponse, LlmError> {
            self.calls.lock().unwrap().push((sampling, messages.to_vec()));
            let mut reply = self.reply.lock().unwrap();
            let text = match reply.take() {
                Some(Ok(text)) => {
                    *reply = Some(Ok(text.clone()));
                    text
                }
                Some(Err(err)) => return Err(err),
                None => "done".to_string(),
            };
            Ok(ChatResponse {
                text,
                model: "mock".into(),
                stop_reason: "end_turn".into(),
                input_tokens: 0,
                output_tokens: 0,
            })
        }
    }

    pub const TEST_DOCUMENT: &str = "RSM newsletter: Kuwaiti companies must retain 5% of each payment.";

    /// Create a test `AppState` around the given mock provider.
    #[must_use]
    pub fn test_app_state(llm: Arc<MockLlm>) -> AppState {
        AppState::new(llm, ReferenceDocument::from_text(TEST_DOCUMENT), ChatSettings::default())
    }
}
