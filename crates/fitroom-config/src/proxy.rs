use std::time::Duration;

use serde::Deserialize;

/// Image passthrough endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    /// Expose the passthrough route
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Route path
    #[serde(default = "default_path")]
    pub path: String,
    /// Upstream fetch timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_path(),
            timeout: default_timeout(),
        }
    }
}

impl ProxyConfig {
    /// Upstream fetch timeout as a `Duration`
    pub const fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/proxy-image".to_string()
}

const fn default_timeout() -> u64 {
    15
}
