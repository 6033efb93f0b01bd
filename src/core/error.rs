//! Error types and handling for the chat relay.
//!
//! [`UpstreamError`] is the typed failure of a single upstream call.
//! [`AppError`] is the HTTP boundary type: every handler failure converts to
//! it, and its [`IntoResponse`] impl is the only place errors become
//! `{"error": "..."}` bodies.

use crate::api::models::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned when the inbound body carries no usable `message`.
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Message returned when the upstream API answers with a non-200 status.
pub const API_REQUEST_FAILED: &str = "API request failed";

/// Failure of one call to the upstream chat-completion API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The request could not be sent or the response could not be read
    /// (connection refused, DNS failure, timeout, ...)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered 200 but the body was not valid JSON of the expected shape
    #[error("Invalid upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The upstream answered 200 with an empty `choices` array
    #[error("Upstream response contained no choices")]
    NoChoices,

    /// The upstream answered with a status other than 200.
    /// Status and body are kept for logging only.
    #[error("API request failed")]
    Rejected { status: u16, body: String },
}

impl UpstreamError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport(e) if e.is_timeout() => "timeout",
            UpstreamError::Transport(e) if e.is_connect() => "connect",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::NoChoices => "no_choices",
            UpstreamError::Rejected { .. } => "rejected",
        }
    }
}

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// `message` absent or empty (`null`, `""`, `0`, `false`, `[]`, `{}`)
    #[error("Message is required")]
    MissingMessage,

    /// The inbound body could not be read as a JSON object
    #[error("{0}")]
    InvalidBody(String),

    /// The upstream call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Generic internal server errors with custom message
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingMessage => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(_) | AppError::Upstream(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                request_id = %crate::core::logging::get_request_id(),
                status = status.as_u16(),
                error = %self,
                "Request failed"
            );
        } else {
            tracing::debug!(
                request_id = %crate::core::logging::get_request_id(),
                status = status.as_u16(),
                error = %self,
                "Request rejected"
            );
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
