//! Chat relay service.
//!
//! Validates an inbound chat body, forwards the message upstream as a
//! single-turn chat completion, and returns the first choice's content.

use crate::api::models::{ChatCompletionRequest, ChatCompletionResponse, Message};
use crate::core::config::UpstreamConfig;
use crate::core::error::{AppError, Result, UpstreamError};
use crate::core::logging::get_request_id;
use crate::core::metrics::get_metrics;
use anyhow::Context;
use serde_json::Value;
use std::error::Error;
use std::time::{Duration, Instant};

/// Upstream model identifier.
pub const MODEL: &str = "llama-3.1-8b-instant";

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f64 = 0.7;

/// Maximum tokens the upstream may generate.
pub const MAX_TOKENS: u32 = 1024;

/// How much of a rejected upstream body is kept for the log.
const BODY_PREVIEW_CHARS: usize = 500;

/// Relays chat messages to the upstream chat-completion API.
///
/// Cheap to clone; the underlying HTTP client shares its connection pool.
#[derive(Debug, Clone)]
pub struct ChatService {
    config: UpstreamConfig,
    http_client: reqwest::Client,
}

impl ChatService {
    /// Create a service with a caller-supplied HTTP client.
    pub fn new(config: UpstreamConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Create a service with an HTTP client built from `config`
    /// (SSL verification and timeout).
    pub fn from_config(config: UpstreamConfig) -> anyhow::Result<Self> {
        let http_client = create_http_client(&config)?;
        Ok(Self::new(config, http_client))
    }

    /// Handle one inbound chat body end to end.
    ///
    /// Returns the reply content, or an [`AppError`] that renders as the
    /// 400/500 response. No upstream call is made when validation fails.
    pub async fn handle_chat(&self, body: &Value) -> Result<Value> {
        let message = extract_message(body)?;
        let reply = self.complete(message).await?;
        Ok(reply)
    }

    /// Send `message` upstream and return the first choice's content.
    pub async fn complete(&self, message: &Value) -> std::result::Result<Value, UpstreamError> {
        let metrics = get_metrics();
        let start = Instant::now();

        let result = self.send(message).await;

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics
            .upstream_latency
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());

        if let Err(e) = &result {
            metrics.upstream_errors.with_label_values(&[e.kind()]).inc();
        }

        result
    }

    async fn send(&self, message: &Value) -> std::result::Result<Value, UpstreamError> {
        let request_id = get_request_id();
        let payload = build_payload(message);

        tracing::debug!(
            request_id = %request_id,
            url = %self.config.api_url,
            model = MODEL,
            message_is_text = message.is_string(),
            "Sending chat completion request upstream"
        );

        let response = self
            .http_client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    request_id = %request_id,
                    url = %self.config.api_url,
                    error = %e,
                    error_source = ?e.source(),
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    "HTTP request failed to upstream"
                );
                UpstreamError::from(e)
            })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        tracing::debug!(
            request_id = %request_id,
            status,
            body_bytes = bytes.len(),
            "Upstream request completed"
        );

        if status != 200 {
            let body: String = String::from_utf8_lossy(&bytes)
                .chars()
                .take(BODY_PREVIEW_CHARS)
                .collect();
            tracing::warn!(
                request_id = %request_id,
                status,
                body = %body,
                "Upstream rejected chat completion request"
            );
            return Err(UpstreamError::Rejected { status, body });
        }

        let completion: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(UpstreamError::NoChoices)
    }
}

/// Pull a usable `message` out of an inbound body.
///
/// Only presence is checked: an absent or empty message (`null`, `""`, `0`,
/// `false`, `[]`, `{}`) is rejected, anything else is forwarded as-is.
/// A body that is not a JSON object is an [`AppError::InvalidBody`].
pub fn extract_message(body: &Value) -> Result<&Value> {
    let fields = body.as_object().ok_or_else(|| {
        AppError::InvalidBody(format!(
            "Request body must be a JSON object, got {}",
            json_type_name(body)
        ))
    })?;

    fields
        .get("message")
        .filter(|m| !is_empty_value(m))
        .ok_or(AppError::MissingMessage)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build the upstream payload for a single user message.
pub fn build_payload(message: &Value) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: MODEL.to_string(),
        messages: vec![Message {
            role: "user".to_string(),
            content: message.clone(),
        }],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Create the upstream HTTP client with connection pooling.
pub fn create_http_client(config: &UpstreamConfig) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(!config.verify_ssl)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .pool_max_idle_per_host(32)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .context("Failed to build HTTP client")
}
