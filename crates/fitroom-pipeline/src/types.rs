use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;

use crate::codec::DecodedImage;

/// Media type of every generated image
pub const GENERATED_MEDIA_TYPE: &str = "image/png";

/// Body of `POST /generate`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleTryOnPayload {
    /// Base64 photo of the person
    #[serde(default, alias = "avatarImage")]
    pub person_image: Option<String>,
    /// Base64 photo of the product
    #[serde(default)]
    pub product_image: Option<String>,
    pub product_name: String,
    pub product_size: String,
    /// Free-text product data (material, fit, size notes)
    #[serde(alias = "productDescription")]
    pub product_desc: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

/// Body of `POST /generate_multi_image`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTryOnPayload {
    /// Base64 photo of the person
    #[serde(default, alias = "avatarImage")]
    pub person_image: Option<String>,
    /// Base64 product photos, e.g. front, back, detail
    #[serde(default)]
    pub product_images: Vec<String>,
    pub product_name: String,
    pub product_size: String,
    #[serde(alias = "productDescription")]
    pub product_desc: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

/// Endpoint-neutral request with images still base64-encoded
#[derive(Debug, Clone)]
pub struct TryOnPayload {
    pub avatar_image: Option<String>,
    pub product_images: Vec<String>,
    pub product: ProductDetails,
    pub tone: Option<String>,
    pub style: Option<String>,
}

impl From<SingleTryOnPayload> for TryOnPayload {
    fn from(payload: SingleTryOnPayload) -> Self {
        Self {
            avatar_image: payload.person_image,
            // An empty string counts as no product image
            product_images: payload.product_image.into_iter().filter(|p| !p.is_empty()).collect(),
            product: ProductDetails {
                name: payload.product_name,
                size: payload.product_size,
                description: payload.product_desc,
            },
            tone: payload.tone,
            style: payload.style,
        }
    }
}

impl From<MultiTryOnPayload> for TryOnPayload {
    fn from(payload: MultiTryOnPayload) -> Self {
        Self {
            avatar_image: payload.person_image,
            product_images: payload.product_images,
            product: ProductDetails {
                name: payload.product_name,
                size: payload.product_size,
                description: payload.product_desc,
            },
            tone: payload.tone,
            style: payload.style,
        }
    }
}

/// Textual product data supplied by the client
#[derive(Debug, Clone, Default)]
pub struct ProductDetails {
    pub name: String,
    pub size: String,
    pub description: String,
}

/// A request whose images all decoded successfully
///
/// `products` is never empty and keeps the submitted order.
#[derive(Debug, Clone)]
pub struct TryOnRequest {
    pub avatar: DecodedImage,
    pub products: Vec<DecodedImage>,
    pub product: ProductDetails,
    pub tone: Option<String>,
    pub style: Option<String>,
}

/// Final synthesized image, returned to the client as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Bytes,
    pub media_type: &'static str,
}

impl GeneratedImage {
    pub const fn png(bytes: Bytes) -> Self {
        Self {
            bytes,
            media_type: GENERATED_MEDIA_TYPE,
        }
    }
}

impl IntoResponse for GeneratedImage {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.media_type)], self.bytes).into_response()
    }
}
