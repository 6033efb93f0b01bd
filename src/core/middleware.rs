//! HTTP middleware for request IDs and request metrics.

use crate::core::logging::{generate_request_id, REQUEST_ID, REQUEST_ID_HEADER};
use crate::core::metrics::get_metrics;
use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;

/// Longest inbound request ID that is accepted as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Use the caller's `x-request-id` if it is sane, otherwise generate one.
fn resolve_request_id(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id)
}

/// Scope the rest of the request in a request ID and echo it on the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(&request);

    let mut response = REQUEST_ID
        .scope(request_id.clone(), next.run(request))
        .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Middleware for tracking request metrics.
pub struct MetricsMiddleware;

impl MetricsMiddleware {
    /// Track metrics for incoming requests.
    ///
    /// Increments the in-flight gauge, then records duration and the final
    /// status code once the handler returns.
    pub async fn track_metrics(request: Request, next: Next) -> Response {
        let endpoint = request.uri().path().to_string();
        let method = request.method().to_string();

        // Skip metrics endpoint itself to avoid recursion
        if endpoint == "/metrics" {
            return next.run(request).await;
        }

        let metrics = get_metrics();
        let active = metrics.active_requests.with_label_values(&[&endpoint]);
        active.inc();

        let start = Instant::now();
        let response = next.run(request).await;
        let duration = start.elapsed().as_secs_f64();

        active.dec();

        let status_code = response.status().as_u16().to_string();
        metrics
            .request_count
            .with_label_values(&[&method, &endpoint, &status_code])
            .inc();
        metrics
            .request_duration
            .with_label_values(&[&method, &endpoint])
            .observe(duration);

        tracing::info!(
            request_id = %crate::core::logging::get_request_id(),
            "{} {} - status={} duration={:.3}s",
            method,
            endpoint,
            status_code,
            duration
        );

        response
    }
}
