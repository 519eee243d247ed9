use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_openai() {
    let cfg = LlmConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::OpenAi);
    assert_eq!(cfg.model, "gpt-3.5-turbo");
    assert_eq!(cfg.base_url, DEFAULT_OPENAI_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );
    assert_eq!(cfg.api_key, "sk-test");
}

#[test]
fn parses_anthropic_overrides() {
    let cfg = LlmConfig::from_lookup(lookup_from(&[
        ("LLM_PROVIDER", "anthropic"),
        ("LLM_API_KEY_ENV", "TEST_KEY"),
        ("TEST_KEY", "secret"),
        ("LLM_MODEL", "claude-test"),
        ("LLM_BASE_URL", "https://example.test/v1/"),
        ("LLM_REQUEST_TIMEOUT_SECS", "42"),
        ("LLM_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Anthropic);
    assert_eq!(cfg.model, "claude-test");
    assert_eq!(cfg.base_url, "https://example.test/v1");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn missing_key_fails_fast() {
    let err = LlmConfig::from_lookup(lookup_from(&[])).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "OPENAI_API_KEY"));
}

#[test]
fn blank_key_counts_as_missing() {
    let err = LlmConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "   ")])).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { .. }));
}

#[test]
fn missing_key_reports_custom_var_name() {
    let err = LlmConfig::from_lookup(lookup_from(&[("LLM_API_KEY_ENV", "MY_KEY")])).unwrap_err();
    assert!(err.to_string().contains("MY_KEY"));
}

#[test]
fn unknown_provider_errors() {
    let err = LlmConfig::from_lookup(lookup_from(&[("LLM_PROVIDER", "bad"), ("OPENAI_API_KEY", "sk")]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("unknown LLM_PROVIDER"));
}

#[test]
fn unparsable_timeout_falls_back_to_default() {
    let cfg = LlmConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk"), ("LLM_REQUEST_TIMEOUT_SECS", "soon")]))
        .unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_LLM_REQUEST_TIMEOUT_SECS);
}
