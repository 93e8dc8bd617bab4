//! Capability seams for the two external model calls

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::codec::DecodedImage;

/// Errors from a model invocation
#[derive(Debug, Error)]
pub enum ModelError {
    /// Network or connection failure (including timeouts)
    #[error("connection error: {0}")]
    Connection(String),

    /// Provider answered with a non-success status
    #[error("provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Provider answered with something we could not interpret
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Provider refused the prompt
    #[error("prompt blocked by provider: {0}")]
    Blocked(String),

    /// Provider answered without any usable text
    #[error("provider returned no text")]
    EmptyResponse,
}

/// Sampling parameters for one model call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f64,
    /// Number of candidates to request; provider default when `None`
    pub candidate_count: Option<u32>,
}

/// Multimodal input for one model call
///
/// The provider receives the parts in the order returned by [`ModelInput::parts`].
#[derive(Debug, Clone, Copy)]
pub struct ModelInput<'a> {
    pub prompt: &'a str,
    pub avatar: &'a DecodedImage,
    pub products: &'a [DecodedImage],
}

/// One element of the multimodal input sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPart<'a> {
    Text(&'a str),
    Image(&'a DecodedImage),
}

impl<'a> ModelInput<'a> {
    /// `[prompt, avatar, products...]`, products in submitted order
    pub fn parts(&self) -> Vec<InputPart<'a>> {
        let mut parts = Vec::with_capacity(self.products.len() + 2);
        parts.push(InputPart::Text(self.prompt));
        parts.push(InputPart::Image(self.avatar));
        parts.extend(self.products.iter().map(InputPart::Image));
        parts
    }
}

/// Provider-neutral view of an image synthesis response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisResponse {
    /// Content parts of the first candidate, in provider order
    pub parts: Vec<ResponsePart>,
    /// Prompt-level block reason, if the provider gave one
    pub block_reason: Option<String>,
    /// Why the candidate stopped, if reported
    pub finish_reason: Option<String>,
}

/// A single content part; any combination of fields may be present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

/// Binary payload carried inline in a response part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineData {
    pub mime_type: Option<String>,
    pub data: Bytes,
}

/// Text/vision model that writes the shot execution brief
#[async_trait]
pub trait DescriptionModel: Send + Sync {
    /// Generate free text for the given multimodal input
    async fn describe(&self, input: ModelInput<'_>, sampling: SamplingConfig) -> Result<String, ModelError>;

    /// Model identifier, for logging
    fn name(&self) -> &str;
}

/// Image model that executes the brief
#[async_trait]
pub trait ImageSynthesisModel: Send + Sync {
    /// Run synthesis and return the raw response structure
    async fn synthesize(&self, input: ModelInput<'_>, sampling: SamplingConfig)
    -> Result<SynthesisResponse, ModelError>;

    /// Model identifier, for logging
    fn name(&self) -> &str;
}
