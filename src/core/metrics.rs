//! Prometheus metrics for monitoring the chat relay.

use prometheus::{
    register_gauge_vec, register_histogram_vec, register_int_counter_vec, GaugeVec, HistogramVec,
    IntCounterVec,
};
use std::sync::OnceLock;

/// Container for all application metrics.
pub struct Metrics {
    /// Total number of requests by method, endpoint, and status
    pub request_count: IntCounterVec,

    /// Request duration histogram in seconds
    pub request_duration: HistogramVec,

    /// Number of currently active requests by endpoint
    pub active_requests: GaugeVec,

    /// Upstream call latency in seconds, labelled `ok` or `error`
    pub upstream_latency: HistogramVec,

    /// Failed upstream calls by error kind
    pub upstream_errors: IntCounterVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

fn build_metrics() -> Metrics {
    let request_count = register_int_counter_vec!(
        "chat_relay_requests_total",
        "Total number of requests",
        &["method", "endpoint", "status_code"]
    )
    .expect("Failed to register request_count metric");

    let request_duration = register_histogram_vec!(
        "chat_relay_request_duration_seconds",
        "Request duration in seconds",
        &["method", "endpoint"],
        vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("Failed to register request_duration metric");

    let active_requests = register_gauge_vec!(
        "chat_relay_active_requests",
        "Number of active requests",
        &["endpoint"]
    )
    .expect("Failed to register active_requests metric");

    let upstream_latency = register_histogram_vec!(
        "chat_relay_upstream_latency_seconds",
        "Upstream chat-completion call latency in seconds",
        &["outcome"],
        vec![0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("Failed to register upstream_latency metric");

    let upstream_errors = register_int_counter_vec!(
        "chat_relay_upstream_errors_total",
        "Failed upstream chat-completion calls",
        &["kind"]
    )
    .expect("Failed to register upstream_errors metric");

    Metrics {
        request_count,
        request_duration,
        active_requests,
        upstream_latency,
        upstream_errors,
    }
}

/// Initialize the metrics registry.
///
/// Safe to call more than once; every call returns the same instance.
pub fn init_metrics() -> &'static Metrics {
    METRICS.get_or_init(build_metrics)
}

/// Get the global metrics instance, registering it on first use.
pub fn get_metrics() -> &'static Metrics {
    init_metrics()
}
