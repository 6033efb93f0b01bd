//! Logging setup and request-scoped context.
//!
//! [`init_tracing`] installs the global subscriber. [`REQUEST_ID`] carries
//! the current request's ID through a handler's task so log lines from deep
//! inside the relay can be correlated without threading the ID through every
//! call.

use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Header used to accept and echo request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    /// Task-local storage for the current request ID.
    pub static REQUEST_ID: String;
}

/// Get the current request ID from context, if set.
///
/// Returns an empty string if no request ID is set.
pub fn get_request_id() -> String {
    REQUEST_ID.try_with(|id| id.clone()).unwrap_or_default()
}

/// Generate a new unique request ID using UUID v4.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Custom time formatter that uses local timezone (respects TZ environment variable)
struct LocalTime;

impl tracing_subscriber::fmt::time::FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Build the filter directive string.
///
/// Noisy HTTP library logs are always capped at `warn`, even when `RUST_LOG`
/// is set to something broad like `trace`.
fn filter_directives(rust_log: Option<String>) -> String {
    let base = rust_log.unwrap_or_else(|| "info,chat_relay=debug".to_string());
    format!("{},hyper=warn,h2=warn,reqwest=warn", base)
}

/// Install the global tracing subscriber.
///
/// Set `NO_COLOR` to disable ANSI escapes (for file logging).
pub fn init_tracing() {
    let no_color = std::env::var("NO_COLOR").is_ok();
    let filter =
        tracing_subscriber::EnvFilter::new(filter_directives(std::env::var("RUST_LOG").ok()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_ansi(!no_color),
        )
        .init();
}
