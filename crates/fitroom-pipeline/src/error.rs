use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fitroom_core::{ErrorBody, HttpError};
use thiserror::Error;

use crate::model::ModelError;

pub type Result<T> = std::result::Result<T, TryOnError>;

/// Failures that end a try-on request
///
/// A failed description stage never shows up here: it is recovered with
/// the fallback brief before synthesis starts.
#[derive(Debug, Error)]
pub enum TryOnError {
    /// Avatar or product image is absent, not base64, or not a raster image
    #[error("invalid image data for {subject}: {reason}")]
    InvalidImageData { subject: String, reason: String },

    /// The request carried no product images at all
    #[error("at least one product image is required")]
    MissingProductImage,

    /// The synthesis model answered without any image part
    #[error("Image generation failed. Reason: {0}")]
    SynthesisBlocked(String),

    /// The synthesis call itself failed
    #[error(transparent)]
    ProviderCallFailure(#[from] ModelError),
}

impl TryOnError {
    pub(crate) fn invalid_image(subject: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidImageData {
            subject: subject.into(),
            reason: reason.to_string(),
        }
    }
}

impl HttpError for TryOnError {
    // Every pipeline failure is reported as one internal-error category
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidImageData { .. } => "invalid_image_data",
            Self::MissingProductImage => "missing_product_image",
            Self::SynthesisBlocked(_) => "synthesis_blocked",
            Self::ProviderCallFailure(_) => "provider_error",
        }
    }

    fn client_message(&self) -> String {
        format!("An internal server error occurred: {self}")
    }
}

impl IntoResponse for TryOnError {
    fn into_response(self) -> Response {
        tracing::debug!(error_type = self.error_type(), "try-on request failed");

        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
