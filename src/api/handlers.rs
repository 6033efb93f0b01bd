//! HTTP request handlers for the chat relay.

use crate::api::models::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
use crate::core::config::AppConfig;
use crate::core::{AppError, Result};
use crate::services::ChatService;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::Value;
use std::sync::Arc;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub chat_service: ChatService,
}

impl AppState {
    pub fn new(config: AppConfig, chat_service: ChatService) -> Self {
        Self {
            config,
            chat_service,
        }
    }

    /// Build state with an HTTP client derived from the upstream settings.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let chat_service = ChatService::from_config(config.upstream.clone())?;
        Ok(Self::new(config, chat_service))
    }
}

/// Relay a user message to the upstream model and return its reply.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Model reply", body = ChatResponse),
        (status = 400, description = "Message missing or empty", body = ErrorResponse),
        (status = 500, description = "Unreadable body or upstream call failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(body) = payload.map_err(|e| AppError::InvalidBody(e.body_text()))?;

    let reply = state.chat_service.handle_chat(&body).await?;

    Ok(Json(ChatResponse { reply }))
}

/// Liveness check. Does not contact the upstream API.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prometheus metrics endpoint.
pub async fn metrics_handler() -> Result<Response> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response())
}
