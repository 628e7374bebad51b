use std::time::Duration;

use staff_client::ClientConfig;
use staff_client::config::DEFAULT_BASE_URL;

/// Staff panel configuration
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | STAFF_API_BASE_URL | http://127.0.0.1:5000/api | backend base URL including `/api` |
/// | REQUEST_TIMEOUT_SECS | 30 | per-request timeout |
/// | POLL_INTERVAL_SECS | 10 | Order Board poll period |
/// | LOG_LEVEL | info | default log filter |
/// | LOG_JSON | false | JSON console output |
/// | LOG_DIR | (unset) | directory for rotating log files |
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl PanelConfig {
    /// Load from the process environment; unset or invalid values use defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };

        Self {
            api_base_url: lookup("STAFF_API_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            request_timeout_secs: positive("REQUEST_TIMEOUT_SECS", 30),
            poll_interval_secs: positive("POLL_INTERVAL_SECS", 10),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            log_dir: lookup("LOG_DIR").filter(|v| !v.trim().is_empty()),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base_url.clone()).with_timeout(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
