//! HTTP transport for `POST /api/chat`.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses are errors even when they carry a JSON body; the
//! endpoint's `{ message }` is kept for logging only. No retries.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use protocol::{ChatRequest, ErrorBody, Message};

use super::{ChatTransport, TransportError};

pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Transport posting to `{base_url}/api/chat`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { http, url: chat_url(base_url) })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn chat_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), protocol::CHAT_PATH)
}

#[async_trait::async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, messages: &[Message]) -> Result<Message, TransportError> {
        let body = ChatRequest::from_history(messages.to_vec());
        let resp = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .map_or_else(|_| status.to_string(), |b| b.message);
            return Err(TransportError::Status { status: status.as_u16(), message });
        }

        resp.json::<Message>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
