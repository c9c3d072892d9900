//! Provider connection configuration.
//!
//! Built once at startup and handed to the client by value. Nothing
//! below the binary reads environment state; the orchestrator and
//! client only ever see this immutable struct.

use std::time::Duration;

/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable connection settings for one generation provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base HTTP URL, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Bearer token sent with each request, if the provider requires one.
    pub api_key: Option<String>,
    /// Timeout applied to each individual HTTP request.
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Create a config with the default request timeout.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
