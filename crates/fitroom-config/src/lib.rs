#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod pipeline;
pub mod provider;
pub mod proxy;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use pipeline::*;
pub use provider::*;
pub use proxy::*;
pub use server::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};

/// Top-level fitroom configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Generative model provider credentials and transport settings
    pub provider: ProviderConfig,
    /// Two-stage generation pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Image passthrough endpoint
    #[serde(default)]
    pub proxy: ProxyConfig,
    /// Logging and trace export
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
