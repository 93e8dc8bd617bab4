use serde::Deserialize;

/// Defaults observed to work for single-product requests
const SINGLE_DESCRIPTION_TEMPERATURE: f64 = 0.2;
const SINGLE_SYNTHESIS_TEMPERATURE: f64 = 0.2;

/// Multi-angle briefs benefit from a little more freedom in stage one
const MULTI_DESCRIPTION_TEMPERATURE: f64 = 0.5;
const MULTI_SYNTHESIS_TEMPERATURE: f64 = 0.1;

/// Two-stage generation pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Text/vision model that writes the shot execution brief
    #[serde(default = "default_description_model")]
    pub description_model: String,
    /// Image model that executes the brief
    #[serde(default = "default_synthesis_model")]
    pub synthesis_model: String,
    /// Meta-prompt used by the single-product endpoint
    #[serde(default)]
    pub single_image_template: SingleImageTemplate,
    /// Sampling overrides for the single-product endpoint
    #[serde(default)]
    pub single: SamplingOverrides,
    /// Sampling overrides for the multi-product endpoint
    #[serde(default)]
    pub multi: SamplingOverrides,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            description_model: default_description_model(),
            synthesis_model: default_synthesis_model(),
            single_image_template: SingleImageTemplate::default(),
            single: SamplingOverrides::default(),
            multi: SamplingOverrides::default(),
        }
    }
}

impl PipelineConfig {
    /// Effective temperatures for the single-product endpoint
    pub fn single_temperatures(&self) -> StageTemperatures {
        self.single
            .resolve(SINGLE_DESCRIPTION_TEMPERATURE, SINGLE_SYNTHESIS_TEMPERATURE)
    }

    /// Effective temperatures for the multi-product endpoint
    pub fn multi_temperatures(&self) -> StageTemperatures {
        self.multi
            .resolve(MULTI_DESCRIPTION_TEMPERATURE, MULTI_SYNTHESIS_TEMPERATURE)
    }
}

/// Which instruction template the single-product endpoint uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleImageTemplate {
    /// Visual analysis only
    Basic,
    /// Product description treated as ground truth
    #[default]
    DataGrounded,
}

/// Optional per-endpoint temperature overrides
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingOverrides {
    #[serde(default)]
    pub description_temperature: Option<f64>,
    #[serde(default)]
    pub synthesis_temperature: Option<f64>,
}

impl SamplingOverrides {
    fn resolve(&self, description: f64, synthesis: f64) -> StageTemperatures {
        StageTemperatures {
            description: self.description_temperature.unwrap_or(description),
            synthesis: self.synthesis_temperature.unwrap_or(synthesis),
        }
    }
}

/// Resolved sampling temperatures for both stages of one endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTemperatures {
    pub description: f64,
    pub synthesis: f64,
}

fn default_description_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_synthesis_model() -> String {
    "gemini-2.5-flash-image-preview".to_string()
}
