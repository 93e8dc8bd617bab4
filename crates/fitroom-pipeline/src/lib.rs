#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod codec;
mod description;
mod error;
mod extract;
mod model;
mod pipeline;
mod prompts;
mod protocol;
pub mod provider;
mod synthesis;
#[cfg(test)]
mod testing;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use codec::{DecodedImage, decode_image, decode_request};
pub use description::{DescriptionStage, FALLBACK_BRIEF, GenerationBrief};
pub use error::{Result, TryOnError};
pub use extract::{SynthesisOutcome, UNKNOWN_REASON, extract};
pub use model::{
    DescriptionModel, ImageSynthesisModel, InlineData, InputPart, ModelError, ModelInput, ResponsePart,
    SamplingConfig, SynthesisResponse,
};
pub use pipeline::{Endpoint, EndpointProfile, Pipeline, PipelineBuilder};
pub use prompts::{MetaPromptTemplate, PromptLibrary, PromptMode};
pub use synthesis::{SynthesisStage, executor_prompt};
pub use types::{
    GENERATED_MEDIA_TYPE, GeneratedImage, MultiTryOnPayload, ProductDetails, SingleTryOnPayload, TryOnPayload,
    TryOnRequest,
};

/// Build the try-on pipeline from configuration
///
/// # Errors
///
/// Returns an error if the pipeline fails to initialize
pub fn build_server(config: &fitroom_config::Config) -> anyhow::Result<Arc<Pipeline>> {
    let pipeline = Arc::new(
        PipelineBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize try-on pipeline: {e}"))?,
    );
    Ok(pipeline)
}

/// Create the endpoint router for try-on generation
pub fn endpoint_router() -> Router<Arc<Pipeline>> {
    Router::new()
        .route("/generate", post(generate))
        .route("/generate_multi_image", post(generate_multi_image))
}

/// Handle single product image requests
async fn generate(
    State(pipeline): State<Arc<Pipeline>>,
    Json(payload): Json<SingleTryOnPayload>,
) -> Result<GeneratedImage> {
    tracing::debug!("Try-on handler called for product: {}", payload.product_name);

    pipeline.generate(Endpoint::SingleImage, payload.into()).await
}

/// Handle multi-angle product image requests
async fn generate_multi_image(
    State(pipeline): State<Arc<Pipeline>>,
    Json(payload): Json<MultiTryOnPayload>,
) -> Result<GeneratedImage> {
    tracing::debug!(
        "Multi-image try-on handler called for product: {} ({} images)",
        payload.product_name,
        payload.product_images.len()
    );

    pipeline.generate(Endpoint::MultiImage, payload.into()).await
}
