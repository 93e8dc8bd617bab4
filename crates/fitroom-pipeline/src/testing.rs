//! Fixtures and deterministic model fakes shared by unit tests

use std::{io::Cursor, sync::Mutex};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::Bytes;
use image::{ImageFormat, Rgb, RgbImage};

use crate::{
    codec::{DecodedImage, decode_image},
    model::{
        DescriptionModel, ImageSynthesisModel, InlineData, InputPart, ModelError, ModelInput, ResponsePart,
        SamplingConfig, SynthesisResponse,
    },
    types::{ProductDetails, TryOnPayload},
};

pub fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::from_pixel(width, height, Rgb(rgb))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn encoded_png(width: u32, height: u32, rgb: [u8; 3]) -> String {
    STANDARD.encode(png_bytes(width, height, rgb))
}

pub fn decoded_png(width: u32, height: u32) -> DecodedImage {
    decode_image("fixture", &encoded_png(width, height, [128, 64, 32])).unwrap()
}

/// Payload with a 10x10 avatar and `products` product images of widths `1..=products`
pub fn payload(products: u32) -> TryOnPayload {
    TryOnPayload {
        avatar_image: Some(encoded_png(10, 10, [200, 180, 160])),
        product_images: (1..=products).map(|w| encoded_png(w, 1, [0, 0, 255])).collect(),
        product: ProductDetails {
            name: "Biker jacket".to_string(),
            size: "M".to_string(),
            description: "100% calfskin leather, regular fit".to_string(),
        },
        tone: None,
        style: None,
    }
}

/// One observed model invocation
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    /// Raw bytes of every image part, in input order
    pub images: Vec<Vec<u8>>,
    pub sampling: SamplingConfig,
}

fn record(input: ModelInput<'_>, sampling: SamplingConfig) -> RecordedCall {
    let mut prompt = String::new();
    let mut images = Vec::new();

    for part in input.parts() {
        match part {
            InputPart::Text(text) => prompt.push_str(text),
            InputPart::Image(image) => images.push(image.data().to_vec()),
        }
    }

    RecordedCall {
        prompt,
        images,
        sampling,
    }
}

/// Description model returning a fixed brief, or failing when none is set
pub struct FakeDescriber {
    reply: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeDescriber {
    pub fn replying(brief: &str) -> Self {
        Self {
            reply: Some(brief.to_string()),
            calls: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DescriptionModel for FakeDescriber {
    async fn describe(&self, input: ModelInput<'_>, sampling: SamplingConfig) -> Result<String, ModelError> {
        self.calls.lock().unwrap().push(record(input, sampling));

        self.reply
            .clone()
            .ok_or_else(|| ModelError::Connection("description model unavailable".to_string()))
    }

    fn name(&self) -> &'static str {
        "fake-describer"
    }
}

/// Image model returning a canned response, or an API error when none is set
pub struct FakeSynthesizer {
    response: Option<SynthesisResponse>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeSynthesizer {
    pub fn responding(response: SynthesisResponse) -> Self {
        Self {
            response: Some(response),
            calls: Mutex::default(),
        }
    }

    /// Responds with one inline-data part per payload, in order
    pub fn with_images(payloads: &[&'static [u8]]) -> Self {
        Self::responding(SynthesisResponse {
            parts: payloads.iter().copied().map(image_part).collect(),
            ..SynthesisResponse::default()
        })
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSynthesisModel for FakeSynthesizer {
    async fn synthesize(
        &self,
        input: ModelInput<'_>,
        sampling: SamplingConfig,
    ) -> Result<SynthesisResponse, ModelError> {
        self.calls.lock().unwrap().push(record(input, sampling));

        self.response.clone().ok_or_else(|| ModelError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "fake-synthesizer"
    }
}

pub fn image_part(data: &'static [u8]) -> ResponsePart {
    ResponsePart {
        text: None,
        inline_data: Some(InlineData {
            mime_type: Some("image/png".to_string()),
            data: Bytes::from_static(data),
        }),
    }
}

pub fn text_part(text: &str) -> ResponsePart {
    ResponsePart {
        text: Some(text.to_string()),
        inline_data: None,
    }
}
