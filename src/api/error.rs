use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// A rejection from the generation endpoint: HTTP status plus whatever the
/// error body carried. Bodies that fail to parse degrade to status-only.
pub struct ApiError {
    status: StatusCode,
    message: Option<String>,
}

impl fmt::Debug for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status: {}, Message: {:?}", self.status, self.message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.status, msg),
            None => write!(f, "{}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(status: StatusCode, message: Option<String>) -> Self {
        ApiError { status, message }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Everything that can go wrong between submitting a request and getting
/// report text back. Terminal for the current action, never retried.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("bad service url: {0}")]
    BadUrl(#[from] url::ParseError),

    #[error("request to generation service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service rejected the request: {0}")]
    Api(#[from] ApiError),

    #[error("could not parse service response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("service response contained no generated text")]
    EmptyResponse,
}
