//! Client configuration

use crate::{ClientResult, NetworkHttpClient, StaffClient};

/// Default backend location (local Flask server)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Client configuration for connecting to the ordering backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL including the `/api` prefix
    /// (e.g. "http://127.0.0.1:5000/api" or a dev-proxy URL)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create the HTTP transport from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }

    /// Create the typed API client from this configuration
    pub fn build(&self) -> ClientResult<StaffClient> {
        Ok(StaffClient::new(self.build_http_client()?))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
