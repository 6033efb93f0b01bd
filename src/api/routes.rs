//! Router assembly.

use crate::api::docs::ApiDoc;
use crate::api::handlers::{chat, health, metrics_handler, AppState};
use crate::core::{request_id_middleware, MetricsMiddleware};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the full application router.
///
/// Layer order, outermost first: trace, CORS, request ID, metrics.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/chat", post(chat))
        // The bundled web client posts here
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .with_state(state);

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(api_routes)
        .merge(swagger_ui)
        .route("/metrics", get(metrics_handler))
        .layer(axum::middleware::from_fn(MetricsMiddleware::track_metrics))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
