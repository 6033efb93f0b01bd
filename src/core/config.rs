//! Configuration management for the chat relay.
//!
//! All settings come from the process environment (optionally seeded from a
//! `.env` file by the binary). Configuration is read once at start-up and is
//! immutable afterwards.

use anyhow::{Context, Result};
use std::fmt;

/// Default upstream chat-completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server configuration (host, port)
    pub server: ServerConfig,

    /// Upstream chat-completion API settings
    pub upstream: UpstreamConfig,
}

/// Server-specific configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the upstream chat-completion API.
#[derive(Clone)]
pub struct UpstreamConfig {
    /// Full URL of the chat-completion endpoint
    pub api_url: String,

    /// Bearer credential sent with every upstream call. May be empty.
    pub api_key: String,

    /// Whether to verify SSL certificates for upstream requests
    pub verify_ssl: bool,

    /// Upstream call timeout in seconds
    pub request_timeout_secs: u64,
}

impl UpstreamConfig {
    /// Build an upstream config for a given endpoint and key, with defaults for the rest.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            verify_ssl: default_verify_ssl(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, "")
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("UpstreamConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &api_key)
            .field("verify_ssl", &self.verify_ssl)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_verify_ssl() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    60
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Recognized variables: `HOST`, `PORT`, `GROQ_API_KEY`, `GROQ_API_URL`,
    /// `REQUEST_TIMEOUT_SECS`, `VERIFY_SSL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration using an arbitrary variable lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use chat_relay::core::config::AppConfig;
    /// use std::collections::HashMap;
    ///
    /// let vars = HashMap::from([("PORT", "8080"), ("GROQ_API_KEY", "gsk_test")]);
    /// let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
    /// assert_eq!(config.server.port, 8080);
    /// assert_eq!(config.upstream.api_key, "gsk_test");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut server = ServerConfig::default();
        let mut upstream = UpstreamConfig::default();

        if let Some(host) = lookup("HOST") {
            server.host = host;
        }

        if let Some(port_str) = lookup("PORT") {
            server.port = port_str
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {}", port_str))?;
        }

        if let Some(api_key) = lookup("GROQ_API_KEY") {
            upstream.api_key = api_key;
        }

        if let Some(api_url) = lookup("GROQ_API_URL").filter(|u| !u.trim().is_empty()) {
            upstream.api_url = api_url;
        }

        if let Some(verify_ssl_str) = lookup("VERIFY_SSL") {
            upstream.verify_ssl = str_to_bool(&verify_ssl_str);
        }

        if let Some(timeout_str) = lookup("REQUEST_TIMEOUT_SECS") {
            upstream.request_timeout_secs = timeout_str
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid REQUEST_TIMEOUT_SECS value: {}", timeout_str))?;
        }

        Ok(Self { server, upstream })
    }
}

/// Convert string to boolean.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive)
fn str_to_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.upstream.api_url, DEFAULT_API_URL);
        assert_eq!(config.upstream.api_key, "");
        assert!(config.upstream.verify_ssl);
        assert_eq!(config.upstream.request_timeout_secs, 60);
    }

    #[test]
    fn test_all_overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("GROQ_API_KEY", "gsk_abc"),
            ("GROQ_API_URL", "http://localhost:9000/v1/chat/completions"),
            ("VERIFY_SSL", "off"),
            ("REQUEST_TIMEOUT_SECS", "15"),
        ])
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.api_key, "gsk_abc");
        assert_eq!(
            config.upstream.api_url,
            "http://localhost:9000/v1/chat/completions"
        );
        assert!(!config.upstream.verify_ssl);
        assert_eq!(config.upstream.request_timeout_secs, 15);
    }

    #[test]
    fn test_blank_api_url_keeps_default() {
        let config = load(&[("GROQ_API_URL", "  ")]).unwrap();
        assert_eq!(config.upstream.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = load(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        let err = load(&[("REQUEST_TIMEOUT_SECS", "-1")]).unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_str_to_bool() {
        for truthy in ["true", "True", "TRUE", "1", "yes", "YES", "on", " On "] {
            assert!(str_to_bool(truthy), "{truthy:?} should be true");
        }
        for falsy in ["false", "0", "no", "off", "", "invalid"] {
            assert!(!str_to_bool(falsy), "{falsy:?} should be false");
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let upstream = UpstreamConfig::new("http://localhost", "gsk_secret");
        let debug = format!("{:?}", upstream);
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("<redacted>"));

        let unset = format!("{:?}", UpstreamConfig::default());
        assert!(unset.contains("<unset>"));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        unsafe {
            std::env::set_var("PORT", "7001");
            std::env::set_var("GROQ_API_KEY", "gsk_from_env");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.port, 7001);
        assert_eq!(config.upstream.api_key, "gsk_from_env");

        unsafe {
            std::env::remove_var("PORT");
            std::env::remove_var("GROQ_API_KEY");
        }
    }
}
