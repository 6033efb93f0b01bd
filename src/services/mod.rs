//! Business logic services for the chat relay.

pub mod chat_service;

pub use chat_service::{build_payload, extract_message, ChatService};
