//! Completion endpoint.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is reported as `{ "message": ... }`. Quota exhaustion at the
//! provider gets its own 429 so the caller can tell it apart from a generic
//! 500; details stay in the server log.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use protocol::{ChatRequest, ErrorBody, Message};
use tracing::{error, warn};

use crate::services::completion::{self, CompletionError};
use crate::state::AppState;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const QUOTA_MESSAGE: &str = "Quota exceeded. Please check your billing and plan.";
pub const GENERIC_ERROR_MESSAGE: &str = "Error generating AI response";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Completion(e) if e.is_quota_exhausted() => StatusCode::TOO_MANY_REQUESTS,
            Self::Completion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE,
            Self::InvalidBody(_) => INVALID_BODY_MESSAGE,
            Self::Completion(e) if e.is_quota_exhausted() => QUOTA_MESSAGE,
            Self::Completion(_) => GENERIC_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.public_message()))).into_response()
    }
}

/// `POST /api/chat` — answer the posted conversation using the reference document.
pub async fn complete(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        warn!(error = %rejection, "chat: rejected request body");
        ApiError::InvalidBody(rejection.body_text())
    })?;

    let reply = completion::complete(&state, &request)
        .await
        .inspect_err(|e| error!(error = %e, quota = e.is_quota_exhausted(), "chat: completion failed"))?;
    Ok(Json(reply))
}

/// Any method other than POST on `/api/chat`.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
