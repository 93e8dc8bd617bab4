//! Mock Gemini backend for integration tests
//!
//! Serves `generateContent` for two model names: the describer answers
//! with text, the painter with inline image parts.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::config::{DESCRIBER_MODEL, PAINTER_MODEL};

/// What the describer model answers
#[derive(Clone)]
pub enum DescriptionReply {
    Brief(String),
    Error(u16),
}

/// What the painter model answers
#[derive(Clone)]
pub enum SynthesisReply {
    /// Inline image parts, in order, preceded by a text part
    Images(Vec<Vec<u8>>),
    /// No candidates, only prompt feedback
    Blocked(String),
    Error(u16, String),
}

/// One recorded `generateContent` call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub api_key: Option<String>,
    pub body: Value,
}

impl RecordedRequest {
    /// Parts of the single user content
    pub fn parts(&self) -> &Value {
        &self.body["contents"][0]["parts"]
    }

    /// Text of the leading prompt part
    pub fn prompt(&self) -> &str {
        self.parts()[0]["text"].as_str().unwrap_or_default()
    }

    pub fn temperature(&self) -> f64 {
        self.body["generationConfig"]["temperature"].as_f64().unwrap_or_default()
    }
}

struct MockState {
    description: DescriptionReply,
    synthesis: SynthesisReply,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock model server
pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockGemini {
    /// Start a mock answering with `brief` and one generated image
    pub async fn start(brief: &str, image: Vec<u8>) -> anyhow::Result<Self> {
        Self::start_with(DescriptionReply::Brief(brief.to_owned()), SynthesisReply::Images(vec![image])).await
    }

    /// Start a mock with explicit replies for both models
    pub async fn start_with(description: DescriptionReply, synthesis: SynthesisReply) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            description,
            synthesis,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1beta/models/{call}", routing::post(handle_generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider
    ///
    /// Includes `/v1beta` since the client appends `/models/{model}:generateContent`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    /// All calls received, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Calls received for one model
    pub fn requests_for(&self, model: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.model == model).collect()
    }

    pub fn description_requests(&self) -> Vec<RecordedRequest> {
        self.requests_for(DESCRIBER_MODEL)
    }

    pub fn synthesis_requests(&self) -> Vec<RecordedRequest> {
        self.requests_for(PAINTER_MODEL)
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(
    State(state): State<Arc<MockState>>,
    Path(call): Path<String>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let Some(model) = call.strip_suffix(":generateContent") else {
        return StatusCode::NOT_FOUND.into_response();
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        model: model.to_owned(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body,
    });

    match model {
        DESCRIBER_MODEL => description_response(&state.description),
        PAINTER_MODEL => synthesis_response(&state.synthesis),
        _ => error_response(404, &format!("models/{model} is not found")),
    }
}

fn description_response(reply: &DescriptionReply) -> Response {
    match reply {
        DescriptionReply::Brief(brief) => Json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": brief}]},
                "finishReason": "STOP"
            }]
        }))
        .into_response(),
        DescriptionReply::Error(status) => error_response(*status, "description model unavailable"),
    }
}

fn synthesis_response(reply: &SynthesisReply) -> Response {
    match reply {
        SynthesisReply::Images(images) => {
            let mut parts = vec![json!({"text": "Here is the generated photo."})];
            parts.extend(images.iter().map(|image| {
                json!({"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(image)}})
            }));

            Json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": parts},
                    "finishReason": "STOP"
                }]
            }))
            .into_response()
        }
        SynthesisReply::Blocked(reason) => Json(json!({
            "promptFeedback": {"blockReason": reason}
        }))
        .into_response(),
        SynthesisReply::Error(status, message) => error_response(*status, message),
    }
}

fn error_response(status: u16, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = json!({
        "error": {"code": status.as_u16(), "message": message, "status": "UNAVAILABLE"}
    });

    (status, Json(body)).into_response()
}
