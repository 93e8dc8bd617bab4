use std::sync::Arc;

use fitroom_config::{Config, SingleImageTemplate, StageTemperatures};
use strum::Display;

use crate::{
    codec::decode_request,
    description::DescriptionStage,
    error::{Result, TryOnError},
    extract::{SynthesisOutcome, extract},
    model::{DescriptionModel, ImageSynthesisModel, ModelInput, SamplingConfig},
    prompts::{PromptLibrary, PromptMode},
    provider::{self, GoogleModelClient},
    synthesis::SynthesisStage,
    types::{GeneratedImage, TryOnPayload},
};

/// Public generation endpoint a request arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    SingleImage,
    MultiImage,
}

/// Prompt mode and sampling used for one endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointProfile {
    pub mode: PromptMode,
    pub temperatures: StageTemperatures,
}

impl EndpointProfile {
    fn from_config(endpoint: Endpoint, config: &fitroom_config::PipelineConfig) -> Self {
        match endpoint {
            Endpoint::SingleImage => Self {
                mode: match config.single_image_template {
                    SingleImageTemplate::Basic => PromptMode::SingleImageBasic,
                    SingleImageTemplate::DataGrounded => PromptMode::SingleImageDataGrounded,
                },
                temperatures: config.single_temperatures(),
            },
            Endpoint::MultiImage => Self {
                mode: PromptMode::MultiImage,
                temperatures: config.multi_temperatures(),
            },
        }
    }
}

/// The two-stage try-on pipeline
///
/// Holds only immutable state, so one instance serves all requests.
pub struct Pipeline {
    prompts: PromptLibrary,
    description: DescriptionStage,
    synthesis: SynthesisStage,
    single: EndpointProfile,
    multi: EndpointProfile,
}

impl Pipeline {
    /// Pipeline with default endpoint profiles
    pub fn new(
        prompts: PromptLibrary,
        description_model: Arc<dyn DescriptionModel>,
        synthesis_model: Arc<dyn ImageSynthesisModel>,
    ) -> Self {
        let defaults = fitroom_config::PipelineConfig::default();

        Self {
            prompts,
            description: DescriptionStage::new(description_model),
            synthesis: SynthesisStage::new(synthesis_model),
            single: EndpointProfile::from_config(Endpoint::SingleImage, &defaults),
            multi: EndpointProfile::from_config(Endpoint::MultiImage, &defaults),
        }
    }

    /// Override the profile of one endpoint
    #[must_use]
    pub fn with_profile(mut self, endpoint: Endpoint, profile: EndpointProfile) -> Self {
        match endpoint {
            Endpoint::SingleImage => self.single = profile,
            Endpoint::MultiImage => self.multi = profile,
        }
        self
    }

    pub const fn profile(&self, endpoint: Endpoint) -> &EndpointProfile {
        match endpoint {
            Endpoint::SingleImage => &self.single,
            Endpoint::MultiImage => &self.multi,
        }
    }

    /// Run a request through both stages
    ///
    /// # Errors
    ///
    /// Fails before any model call when an image is missing or undecodable.
    /// Afterwards only the synthesis stage can fail: with
    /// `ProviderCallFailure` when the call errors, or `SynthesisBlocked` when
    /// its response holds no image.
    pub async fn generate(&self, endpoint: Endpoint, payload: TryOnPayload) -> Result<GeneratedImage> {
        let request = decode_request(payload)?;
        let profile = self.profile(endpoint);

        tracing::debug!(
            endpoint = %endpoint,
            mode = %profile.mode,
            product_images = request.products.len(),
            product = %request.product.name,
            size = %request.product.size,
            tone = request.tone.as_deref(),
            style = request.style.as_deref(),
            "starting try-on generation"
        );

        let meta_prompt = self.prompts.render(profile.mode, &request.product.description);
        let brief = self
            .description
            .invoke(
                ModelInput {
                    prompt: &meta_prompt,
                    avatar: &request.avatar,
                    products: &request.products,
                },
                SamplingConfig {
                    temperature: profile.temperatures.description,
                    candidate_count: None,
                },
            )
            .await;

        let response = self
            .synthesis
            .invoke(&brief, &request, profile.temperatures.synthesis)
            .await?;

        match extract(response) {
            SynthesisOutcome::Image(image) => {
                tracing::debug!(endpoint = %endpoint, bytes = image.bytes.len(), "try-on image generated");
                Ok(image)
            }
            SynthesisOutcome::Blocked { reason } => Err(TryOnError::SynthesisBlocked(reason)),
        }
    }
}

/// Builder for constructing the pipeline from configuration
pub struct PipelineBuilder<'a> {
    config: &'a Config,
}

impl<'a> PipelineBuilder<'a> {
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Wire both stages to the Gemini API with the built-in templates
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn build(self) -> anyhow::Result<Pipeline> {
        let provider_config = &self.config.provider;
        let pipeline_config = &self.config.pipeline;

        let http = provider::http_client(provider_config)?;

        let description_model =
            GoogleModelClient::new(http.clone(), provider_config, &pipeline_config.description_model);
        let synthesis_model = GoogleModelClient::new(http, provider_config, &pipeline_config.synthesis_model);

        tracing::debug!(
            description_model = %pipeline_config.description_model,
            synthesis_model = %pipeline_config.synthesis_model,
            timeout = ?provider_config.timeout_duration(),
            "try-on pipeline initialized"
        );

        let pipeline = Pipeline::new(
            PromptLibrary::builtin(),
            Arc::new(description_model),
            Arc::new(synthesis_model),
        )
        .with_profile(
            Endpoint::SingleImage,
            EndpointProfile::from_config(Endpoint::SingleImage, pipeline_config),
        )
        .with_profile(
            Endpoint::MultiImage,
            EndpointProfile::from_config(Endpoint::MultiImage, pipeline_config),
        );

        Ok(pipeline)
    }
}
