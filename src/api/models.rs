//! API request and response models.
//!
//! The inbound/outbound shapes of `POST /chat`, plus the subset of the
//! OpenAI-style chat-completion format spoken with the upstream API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Inbound chat request.
///
/// Handlers read the body as raw JSON so that an absent or empty `message`
/// produces the relay's own 400 instead of an extractor rejection; this type
/// documents the expected shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"message": "What is the capital of France?"}))]
pub struct ChatRequest {
    /// The user's message. Any non-empty value is forwarded as-is.
    pub message: String,
}

/// Successful chat reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"reply": "The capital of France is Paris."}))]
pub struct ChatResponse {
    /// The first choice's message content, exactly as the upstream sent it
    #[schema(value_type = Option<String>)]
    pub reply: Value,
}

/// Error body returned for every failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"error": "Message is required"}))]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"status": "ok"}))]
pub struct HealthResponse {
    pub status: String,
}

/// Chat completion request sent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature
    pub temperature: f64,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// A single message in a conversation.
///
/// `content` is usually a string but is forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Value,
}

/// Chat completion response from upstream.
///
/// Only the fields the relay reads are modelled; everything else the
/// upstream sends (`id`, `usage`, ...) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

/// `content` must be present but may be `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: Value,
}
