//! Base64 image payload decoding
//!
//! Images are only sniffed and measured, never re-encoded: the bytes the
//! client sent are the bytes the models receive.

use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, ImageReader};

use crate::{
    error::{Result, TryOnError},
    types::{TryOnPayload, TryOnRequest},
};

/// Encodings the generative models accept as inline image input
const MODEL_FORMATS: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// A validated raster image held in its original encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    data: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl DecodedImage {
    /// Original encoded bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// MIME type of the detected format (e.g. `image/jpeg`)
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Decode one base64 payload into a validated image
///
/// `subject` names the image in error messages. ASCII whitespace inside
/// the payload is ignored, matching how line-wrapped base64 is usually
/// produced.
///
/// # Errors
///
/// Returns `InvalidImageData` when the payload is empty, is not base64, or
/// does not carry a readable raster image header.
pub fn decode_image(subject: &str, encoded: &str) -> Result<DecodedImage> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    if compact.is_empty() {
        return Err(TryOnError::invalid_image(subject, "image is missing"));
    }

    let data = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| TryOnError::invalid_image(subject, format!("not valid base64: {e}")))?;

    let reader = ImageReader::new(Cursor::new(data.as_slice()))
        .with_guessed_format()
        .map_err(|e| TryOnError::invalid_image(subject, e))?;

    let format = reader
        .format()
        .ok_or_else(|| TryOnError::invalid_image(subject, "unrecognized image format"))?;

    if !MODEL_FORMATS.contains(&format) {
        return Err(TryOnError::invalid_image(
            subject,
            format!("{} is not accepted by the image models", format.to_mime_type()),
        ));
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| TryOnError::invalid_image(subject, e))?;

    Ok(DecodedImage {
        data,
        format,
        width,
        height,
    })
}

/// Decode the avatar and every product image of a request
///
/// The avatar is checked first, then the product list must be non-empty,
/// then each product image is decoded in submitted order.
///
/// # Errors
///
/// Returns `InvalidImageData` for the first image that fails to decode, or
/// `MissingProductImage` when no product image was sent.
pub fn decode_request(payload: TryOnPayload) -> Result<TryOnRequest> {
    let avatar = decode_image("avatar image", payload.avatar_image.as_deref().unwrap_or_default())?;

    if payload.product_images.is_empty() {
        return Err(TryOnError::MissingProductImage);
    }

    let products = payload
        .product_images
        .iter()
        .enumerate()
        .map(|(i, encoded)| decode_image(&format!("product image {}", i + 1), encoded))
        .collect::<Result<Vec<_>>>()?;

    Ok(TryOnRequest {
        avatar,
        products,
        product: payload.product,
        tone: payload.tone,
        style: payload.style,
    })
}
