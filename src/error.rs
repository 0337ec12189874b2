//! Error types for the discovery pipeline
//!
//! None of these reach the caller of `find_places`: the orchestrator turns
//! every variant into a fallback envelope. Their `Display` output is the
//! diagnostic `error` string of that envelope, so it must never carry the
//! API key.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Failure of the single upstream request
#[derive(Error, Debug)]
pub enum ClientError {
    /// No API key configured; no request was attempted
    #[error("Generative API key is not configured")]
    Configuration,

    /// Transport failure (connect, TLS, body read)
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("API error: {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        body: ErrorBody,
    },

    /// 2xx response without `candidates[0].content.parts[0].text`
    #[error("Invalid response format from API: {0}")]
    Shape(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        // The URL is stripped so nothing request-specific ends up in the envelope
        ClientError::Network(error.without_url())
    }
}

/// Body of a non-2xx response, parsed as JSON when possible
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn from_raw(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Json(value) => write!(f, "{}", value),
            ErrorBody::Text(text) => f.write_str(text),
        }
    }
}

/// Pipeline failure the orchestrator degrades from
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Every extraction strategy failed
    #[error("Failed to parse places from AI response")]
    Parse,
}

pub type ClientResult<T> = Result<T, ClientError>;
