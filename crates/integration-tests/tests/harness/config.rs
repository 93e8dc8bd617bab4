//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use fitroom_config::{
    Config, CorsConfig, PipelineConfig, ProviderConfig, ProxyConfig, ServerConfig, SingleImageTemplate,
};

/// Model name the mock answers with a text brief
pub const DESCRIBER_MODEL: &str = "mock-describer";

/// Model name the mock answers with image parts
pub const PAINTER_MODEL: &str = "mock-painter";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder whose provider points at `base_url`
    pub fn new(base_url: &str) -> Self {
        let mut provider = ProviderConfig::with_api_key("test-key");
        provider.base_url = Some(base_url.parse().expect("valid URL"));

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                provider,
                pipeline: PipelineConfig {
                    description_model: DESCRIBER_MODEL.to_owned(),
                    synthesis_model: PAINTER_MODEL.to_owned(),
                    ..PipelineConfig::default()
                },
                proxy: ProxyConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Select the single-product meta-prompt
    pub fn with_template(mut self, template: SingleImageTemplate) -> Self {
        self.config.pipeline.single_image_template = template;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Disable the image passthrough
    pub fn without_proxy(mut self) -> Self {
        self.config.proxy.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
