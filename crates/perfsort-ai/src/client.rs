//! HTTP client for an Ollama-style `/api/generate` endpoint.

use std::time::Duration;

use perfsort_core::response::FALLBACK_RESPONSE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("inference server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("malformed inference response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Non-streaming client for a local inference service.
pub struct InferenceClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl InferenceClient {
    /// Create a client posting to `endpoint` (the full generate URL) with `model`.
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            model,
        }
    }

    /// Like [`InferenceClient::new`] with a per-request timeout.
    pub fn with_timeout(
        endpoint: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Submit `prompt` and return the trimmed `response` text.
    ///
    /// A reply without a `response` field yields [`FALLBACK_RESPONSE`].
    pub async fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(
            url = %self.endpoint,
            model = %self.model,
            prompt_len = prompt.len(),
            "sending generate request"
        );
        let resp = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InferenceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        let parsed: GenerateResponse = serde_json::from_slice(&body)?;
        let text = match parsed.response {
            Some(text) => text,
            None => {
                debug!("response field missing, using fallback sentinel");
                FALLBACK_RESPONSE.to_string()
            }
        };
        Ok(text.trim().to_string())
    }
}
