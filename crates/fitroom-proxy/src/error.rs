use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fitroom_core::{ErrorBody, HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProxyError>;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Upstream answered with a non-success status, which is passed through
    #[error("Image server error: {}", .0.as_u16())]
    Upstream(StatusCode),

    #[error("URL is not a direct image link.")]
    NotAnImage,

    /// Bad URL, connection failure or timeout
    #[error("Failed to fetch image: {0}")]
    Fetch(String),
}

impl HttpError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(status) => *status,
            Self::NotAnImage | Self::Fetch(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Upstream(_) => "upstream_error",
            Self::NotAnImage => "not_an_image",
            Self::Fetch(_) => "fetch_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
