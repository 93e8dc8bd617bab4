use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// resolved, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are empty or numeric settings are out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_provider()?;
        self.validate_pipeline()?;
        self.validate_proxy()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_provider(&self) -> anyhow::Result<()> {
        if self.provider.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("provider.api_key must not be empty");
        }

        if self.provider.timeout == Some(0) {
            anyhow::bail!("provider.timeout must be greater than 0 when set");
        }

        Ok(())
    }

    fn validate_pipeline(&self) -> anyhow::Result<()> {
        let pipeline = &self.pipeline;

        if pipeline.description_model.trim().is_empty() || pipeline.synthesis_model.trim().is_empty() {
            anyhow::bail!("pipeline model names must not be empty");
        }

        for (endpoint, temps) in [
            ("single", pipeline.single_temperatures()),
            ("multi", pipeline.multi_temperatures()),
        ] {
            if !(0.0..=2.0).contains(&temps.description) {
                anyhow::bail!("pipeline.{endpoint}.description_temperature must be between 0.0 and 2.0");
            }
            if !(0.0..=1.0).contains(&temps.synthesis) {
                anyhow::bail!("pipeline.{endpoint}.synthesis_temperature must be between 0.0 and 1.0");
            }
        }

        Ok(())
    }

    fn validate_proxy(&self) -> anyhow::Result<()> {
        if !self.proxy.enabled {
            return Ok(());
        }

        if self.proxy.timeout == 0 {
            anyhow::bail!("proxy.timeout must be greater than 0");
        }

        if !self.proxy.path.starts_with('/') {
            anyhow::bail!("proxy.path must start with '/'");
        }

        Ok(())
    }
}
