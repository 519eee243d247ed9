use std::sync::Arc;

use protocol::Role;

use super::*;
use crate::state::test_helpers::{MockLlm, TEST_DOCUMENT, test_app_state};

// =========================================================================
// build_provider_messages
// =========================================================================

#[test]
fn provider_messages_wrap_history() {
    let history = vec![Message::system("You are a helpful AI assistant."), Message::user("What is a TCC?")];
    let messages = build_provider_messages("You are a helpful assistant.", &history, "DOC", "extra");

    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0], Message::system("You are a helpful assistant."));
    assert_eq!(&messages[1..3], history.as_slice());
    assert_eq!(messages[3], Message::user("DOC\nextra"));
}

#[test]
fn provider_messages_for_empty_history() {
    let messages = build_provider_messages("sys", &[], "DOC", "");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, "DOC\n");
}

// =========================================================================
// complete
// =========================================================================

#[tokio::test]
async fn complete_returns_assistant_message() {
    let llm = Arc::new(MockLlm::replying("Retention is 5%."));
    let state = test_app_state(llm.clone());

    let reply = complete(&state, &ChatRequest::default()).await.unwrap();
    assert_eq!(reply, Message::assistant("Retention is 5%."));
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn complete_sends_document_and_settings() {
    let llm = Arc::new(MockLlm::replying("ok"));
    let state = test_app_state(llm.clone());
    let request = ChatRequest { messages: vec![Message::user("hello")], input_value: Some("more".into()) };

    complete(&state, &request).await.unwrap();

    let calls = llm.calls.lock().unwrap();
    let (sampling, messages) = &calls[0];
    assert_eq!(sampling.max_tokens, 25);
    assert_eq!(messages[0].content, "You are a helpful assistant.");
    assert_eq!(messages[1], Message::user("hello"));
    assert_eq!(messages[2].content, format!("{TEST_DOCUMENT}\nmore"));
}

#[tokio::test]
async fn complete_propagates_quota_error() {
    let llm = Arc::new(MockLlm::failing(LlmError::ApiResponse { status: 429, body: "insufficient_quota".into() }));
    let state = test_app_state(llm);

    let err = complete(&state, &ChatRequest::default()).await.unwrap_err();
    assert!(err.is_quota_exhausted());
}

#[tokio::test]
async fn complete_propagates_generic_error() {
    let llm = Arc::new(MockLlm::failing(LlmError::ApiRequest("connection reset".into())));
    let state = test_app_state(llm);

    let err = complete(&state, &ChatRequest::default()).await.unwrap_err();
    assert!(!err.is_quota_exhausted());
    assert!(err.to_string().contains("connection reset"));
}
