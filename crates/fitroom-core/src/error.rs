use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. Keeps the mapping from
/// domain failure to status code next to the error definition while the
/// response body shape stays uniform across endpoints.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `internal_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// JSON error body returned by every endpoint
///
/// Serializes as `{"detail": "..."}`, the shape browser clients read
/// when a request fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure detail
    pub detail: String,
}

impl ErrorBody {
    /// Build the body for a domain error
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            detail: error.client_message(),
        }
    }
}
