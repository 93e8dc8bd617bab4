use std::time::Duration;

use axum::http::{self, HeaderMap, HeaderValue};
use reqwest::{Client, redirect};

/// Some image hosts refuse requests that do not look like a browser
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT: &str = "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8";
const REFERER: &str = "https://www.google.com/";

const MAX_REDIRECTS: usize = 10;

/// HTTP client for upstream image fetches
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(http::header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(http::header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(http::header::REFERER, HeaderValue::from_static(REFERER));

    Client::builder()
        .timeout(timeout)
        .redirect(redirect::Policy::limited(MAX_REDIRECTS))
        .default_headers(headers)
        .build()
}
