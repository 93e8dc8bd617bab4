//! Second stage: execute the brief with the image model

use std::sync::Arc;

use indoc::formatdoc;

use crate::{
    description::GenerationBrief,
    error::Result,
    model::{ImageSynthesisModel, ModelInput, SamplingConfig, SynthesisResponse},
    types::TryOnRequest,
};

/// Wrap a brief in the fixed executor instructions
pub fn executor_prompt(brief: &str) -> String {
    formatdoc! {"
        You are a high-fidelity image synthesis engine. Your task is to execute the following technical instructions from an AI Specialist. Adhere to every rule with absolute precision.

        {brief}
    "}
}

/// Invokes the image model; failures propagate
#[derive(Clone)]
pub struct SynthesisStage {
    model: Arc<dyn ImageSynthesisModel>,
}

impl SynthesisStage {
    pub fn new(model: Arc<dyn ImageSynthesisModel>) -> Self {
        Self { model }
    }

    /// Run one synthesis call for `brief` over the request images
    ///
    /// Always requests a single candidate.
    pub async fn invoke(
        &self,
        brief: &GenerationBrief,
        request: &TryOnRequest,
        temperature: f64,
    ) -> Result<SynthesisResponse> {
        let prompt = executor_prompt(brief.as_str());
        let input = ModelInput {
            prompt: &prompt,
            avatar: &request.avatar,
            products: &request.products,
        };
        let sampling = SamplingConfig {
            temperature,
            candidate_count: Some(1),
        };

        self.model.synthesize(input, sampling).await.map_err(|e| {
            tracing::error!(model = self.model.name(), error = %e, "image synthesis call failed");
            e.into()
        })
    }
}
