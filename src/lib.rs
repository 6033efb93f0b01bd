//! Chat Relay - forwards a user message to a chat-completion API
//!
//! The server exposes `POST /chat`, which accepts `{"message": "..."}`,
//! sends it upstream as a single-turn chat completion, and answers with
//! `{"reply": "..."}` or `{"error": "..."}`.
//!
//! # Architecture
//!
//! - [`core`]: configuration, errors, logging, metrics, middleware
//! - [`api`]: HTTP handlers, models, OpenAPI docs, router
//! - [`services`]: the relay itself ([`ChatService`])
//!
//! # Configuration
//!
//! Environment variables (a `.env` file is honored):
//! - `GROQ_API_KEY`: upstream API key (not validated; an empty key surfaces
//!   as an upstream authentication failure)
//! - `GROQ_API_URL`: upstream endpoint (default: Groq's chat completions URL)
//! - `HOST`: server bind address (default: 0.0.0.0)
//! - `PORT`: server port (default: 5000)
//! - `VERIFY_SSL`: verify SSL certificates for upstream (default: true)
//! - `REQUEST_TIMEOUT_SECS`: upstream call timeout in seconds (default: 60)

pub mod api;
pub mod core;
pub mod services;

// Re-export commonly used types for convenience
pub use api::{build_router, AppState, ChatRequest, ChatResponse, ErrorResponse};
pub use core::{AppConfig, AppError, Result, UpstreamConfig, UpstreamError};
pub use services::ChatService;
