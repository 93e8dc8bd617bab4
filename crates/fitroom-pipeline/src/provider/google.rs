//! Google Generative Language API model client

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::Bytes;
use fitroom_config::ProviderConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    model::{
        DescriptionModel, ImageSynthesisModel, InlineData, InputPart, ModelError, ModelInput, ResponsePart,
        SamplingConfig, SynthesisResponse,
    },
    protocol::{
        Blob, ErrorResponse, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
        RequestContent, RequestPart,
    },
};

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Output modalities requested from image models
const IMAGE_MODALITIES: [&str; 2] = ["TEXT", "IMAGE"];

/// `generateContent` client bound to one model
#[derive(Clone)]
pub struct GoogleModelClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl GoogleModelClient {
    pub fn new(client: Client, config: &ProviderConfig, model: impl Into<String>) -> Self {
        let base_url = config
            .base_url
            .as_ref()
            .map_or(DEFAULT_BASE_URL, url::Url::as_str)
            .trim_end_matches('/')
            .to_string();

        Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            model: model.into(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(
        &self,
        input: ModelInput<'_>,
        generation_config: GenerationConfig,
    ) -> Result<GenerateContentResponse, ModelError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: request_parts(input),
            }],
            generation_config: Some(generation_config),
        };

        tracing::debug!(
            model = %self.model,
            images = input.products.len() + 1,
            "calling generateContent"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(model = %self.model, error = %e, "upstream request failed");
                ModelError::Connection(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body).map_or(body, |e| e.error.message);

            tracing::warn!(model = %self.model, status = %status, "upstream returned error");

            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ModelError::MalformedResponse(format!("failed to parse response: {e}")))
    }
}

fn request_parts(input: ModelInput<'_>) -> Vec<RequestPart> {
    input
        .parts()
        .into_iter()
        .map(|part| match part {
            InputPart::Text(text) => RequestPart::Text(text.to_string()),
            InputPart::Image(image) => RequestPart::InlineData(Blob {
                mime_type: Some(image.mime_type().to_string()),
                data: STANDARD.encode(image.data()),
            }),
        })
        .collect()
}

/// Convert the first candidate into the provider-neutral shape
///
/// Thought parts are dropped. Only the first inline blob is decoded; later
/// blobs are discarded unread, so a malformed one cannot fail the response.
fn synthesis_response(response: GenerateContentResponse) -> Result<SynthesisResponse, ModelError> {
    let block_reason = response.block_reason().map(str::to_owned);
    let candidate = response.candidates.into_iter().next();
    let finish_reason = candidate.as_ref().and_then(|c| c.finish_reason.clone());

    let mut seen_inline = false;
    let mut parts = Vec::new();

    for part in candidate
        .and_then(|c| c.content)
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|part| !part.thought.unwrap_or(false))
    {
        let inline_data = match part.inline_data {
            Some(blob) if !seen_inline => {
                seen_inline = true;
                Some(decode_blob(blob)?)
            }
            _ => None,
        };

        parts.push(ResponsePart {
            text: part.text,
            inline_data,
        });
    }

    Ok(SynthesisResponse {
        parts,
        block_reason,
        finish_reason,
    })
}

fn decode_blob(blob: Blob) -> Result<InlineData, ModelError> {
    let data = STANDARD
        .decode(blob.data.as_bytes())
        .map_err(|e| ModelError::MalformedResponse(format!("inline data is not valid base64: {e}")))?;

    Ok(InlineData {
        mime_type: blob.mime_type,
        data: Bytes::from(data),
    })
}

#[async_trait]
impl DescriptionModel for GoogleModelClient {
    async fn describe(&self, input: ModelInput<'_>, sampling: SamplingConfig) -> Result<String, ModelError> {
        let response = self
            .generate(
                input,
                GenerationConfig {
                    temperature: sampling.temperature,
                    candidate_count: sampling.candidate_count,
                    response_modalities: None,
                },
            )
            .await?;

        if let Some(text) = response.text() {
            return Ok(text);
        }

        Err(response
            .block_reason()
            .map_or(ModelError::EmptyResponse, |reason| ModelError::Blocked(reason.to_string())))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ImageSynthesisModel for GoogleModelClient {
    async fn synthesize(
        &self,
        input: ModelInput<'_>,
        sampling: SamplingConfig,
    ) -> Result<SynthesisResponse, ModelError> {
        let response = self
            .generate(
                input,
                GenerationConfig {
                    temperature: sampling.temperature,
                    candidate_count: sampling.candidate_count,
                    response_modalities: Some(IMAGE_MODALITIES.to_vec()),
                },
            )
            .await?;

        synthesis_response(response)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
