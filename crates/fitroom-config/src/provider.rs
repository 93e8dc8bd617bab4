use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Generative Language API connection settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key sent with every model call
    pub api_key: SecretString,
    /// Base URL override (defaults to the public v1beta endpoint)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Per-call timeout in seconds; unset means model calls may wait indefinitely
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl ProviderConfig {
    /// Build a config with only an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: None,
            timeout: None,
        }
    }

    /// Model call timeout as a `Duration`
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
