//! API layer for the chat relay.
//!
//! This module contains the HTTP handlers, request/response models,
//! OpenAPI documentation, and router assembly.

pub mod docs;
pub mod handlers;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use docs::ApiDoc;
pub use handlers::{chat, health, metrics_handler, AppState};
pub use models::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
pub use routes::build_router;
