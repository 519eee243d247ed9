//! Networking for the conversation view.
//!
//! DESIGN
//! ======
//! The view only knows the [`ChatTransport`] trait; [`api::HttpTransport`]
//! is the production implementation and tests substitute a recorder.

pub mod api;

use protocol::Message;

/// Error returned by a [`ChatTransport`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("chat request failed: {0}")]
    Request(String),
    /// The endpoint answered with a non-success status.
    #[error("chat endpoint returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The success body was not a chat message.
    #[error("chat response decode failed: {0}")]
    Decode(String),
}

/// Sends a conversation to the completion endpoint.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post `messages` and return the assistant reply.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on connection, status, or decode failure.
    async fn send(&self, messages: &[Message]) -> Result<Message, TransportError>;
}
