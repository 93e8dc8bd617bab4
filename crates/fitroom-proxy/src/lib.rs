#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Same-origin passthrough for product images hosted elsewhere

mod error;
mod http_client;

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use fitroom_config::ProxyConfig;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

pub use error::{ProxyError, Result};

/// Fetches remote images on behalf of the browser
pub struct ImageProxy {
    client: Client,
}

impl ImageProxy {
    /// Fetch `url` and return its bytes and content type
    pub async fn fetch(&self, url: &str) -> Result<(String, Bytes)> {
        let url = Url::parse(url).map_err(|e| ProxyError::Fetch(format!("invalid URL '{url}': {e}")))?;

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            tracing::debug!(url = %url, error = %e, "image fetch failed");
            ProxyError::Fetch(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = %status, "image server returned error");
            return Err(ProxyError::Upstream(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.starts_with("image/") {
            return Err(ProxyError::NotAnImage);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProxyError::Fetch(e.to_string()))?;

        Ok((content_type, body))
    }
}

/// Build the image proxy from configuration
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built
pub fn build_proxy(config: &ProxyConfig) -> anyhow::Result<Arc<ImageProxy>> {
    let client = http_client::http_client(config.timeout_duration())
        .map_err(|e| anyhow::anyhow!("Failed to initialize image proxy client: {e}"))?;

    Ok(Arc::new(ImageProxy { client }))
}

/// Create the proxy router mounted at `path`
pub fn endpoint_router(path: &str) -> Router<Arc<ImageProxy>> {
    Router::new().route(path, get(proxy_image))
}

#[derive(Debug, Deserialize)]
struct ProxyQuery {
    url: String,
}

async fn proxy_image(State(proxy): State<Arc<ImageProxy>>, Query(query): Query<ProxyQuery>) -> Result<Response> {
    let (content_type, body) = proxy.fetch(&query.url).await?;

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
