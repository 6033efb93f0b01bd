//! OpenAPI documentation for the relay's public endpoints.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::handlers::chat, crate::api::handlers::health),
    components(
        schemas(
            crate::api::models::ChatRequest,
            crate::api::models::ChatResponse,
            crate::api::models::ErrorResponse,
            crate::api::models::HealthResponse,
        )
    ),
    tags(
        (name = "chat", description = "Chat relay endpoint"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Chat Relay API",
        version = "1.0.0",
        description = "Relays a user message to an upstream chat-completion model and returns its reply."
    ),
    servers(
        (url = "http://127.0.0.1:5000", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_public_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/chat"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn test_openapi_has_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        for name in ["ChatRequest", "ChatResponse", "ErrorResponse", "HealthResponse"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
