//! Generative text client
//!
//! One POST per call to `{base_url}/{model}:generateContent`. No retries, no
//! timeout override, no backoff. A missing API key short-circuits before any
//! network activity.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::DiscoveryConfig;
use crate::error::{ClientError, ClientResult, ErrorBody};

// Deterministic-leaning sampling
const TEMPERATURE: f32 = 0.1;
const TOP_P: f32 = 0.1;
const TOP_K: u32 = 1;
const MAX_OUTPUT_TOKENS: u32 = 1024;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Source of raw model text for a prompt
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send one prompt and return the first candidate's text
    async fn generate(&self, prompt: &str) -> ClientResult<String>;

    /// Model name for logging
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: GenerativeClient + ?Sized> GenerativeClient for std::sync::Arc<T> {
    async fn generate(&self, prompt: &str) -> ClientResult<String> {
        (**self).generate(prompt).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

// =============================================================================
// WIRE FORMAT
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

// Every level is optional so a missing level is reported as a shape error
// rather than a serde error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

/// Build the JSON request body for a prompt
pub fn request_body(prompt: &str) -> serde_json::Value {
    let request = GenerateRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: GenerationConfig::default(),
    };
    // Plain structs of strings and numbers always serialise
    serde_json::to_value(&request).unwrap_or_default()
}

/// Map a status and body to the first candidate's text or a client error
pub fn interpret_response(status: StatusCode, body: &str) -> ClientResult<String> {
    if !status.is_success() {
        return Err(ClientError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body: ErrorBody::from_raw(body),
        });
    }

    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::Shape(format!("response body is not JSON: {}", e)))?;

    if let Some(usage) = &response.usage_metadata {
        debug!(
            prompt_tokens = ?usage.prompt_token_count,
            response_tokens = ?usage.candidates_token_count,
            total_tokens = ?usage.total_token_count,
            "Generative API usage"
        );
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| ClientError::Shape("no candidates in response".to_string()))?;

    let part = candidate
        .content
        .and_then(|c| c.parts)
        .and_then(|p| p.into_iter().next())
        .ok_or_else(|| ClientError::Shape("no content parts in candidate".to_string()))?;

    part.text
        .ok_or_else(|| ClientError::Shape("no text in candidate part".to_string()))
}

// =============================================================================
// CLIENT
// =============================================================================

/// Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self::with_http_client(config, Client::new())
    }

    /// Use a preconfigured transport (proxy or TLS settings)
    pub fn with_http_client(config: &DiscoveryConfig, client: Client) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            client,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> ClientResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No API key configured, skipping generative request");
            return Err(ClientError::Configuration);
        };

        info!(model = %self.model, "Sending discovery prompt");

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(ClientError::from)
            .inspect_err(|e| error!(error = %e, "Generative request failed"))?;

        let status = response.status();
        let body = response.text().await?;

        debug!(status = %status, bytes = body.len(), "Generative API responded");

        let result = interpret_response(status, &body);
        match &result {
            Err(ClientError::Http { status, body, .. }) => {
                warn!(status, body = %body, "Generative API returned an error status")
            }
            Err(ClientError::Shape(detail)) => {
                warn!(detail = %detail, "Generative API response had unexpected shape")
            }
            _ => {}
        }
        result
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
