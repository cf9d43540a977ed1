//! Upstream payloads and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body sent to the create endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct NewPost<'a> {
    pub text: &'a str,
}

/// A post as returned by the create endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPost {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePostResponse {
    pub data: CreatedPost,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeletedFlag {
    pub deleted: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeletePostResponse {
    pub data: DeletedFlag,
}

/// Problem document the API returns alongside error statuses.
#[derive(Debug, Default, Deserialize)]
struct Problem {
    title: Option<String>,
    detail: Option<String>,
}

const MAX_DETAIL_CHARS: usize = 200;

/// Condense an error body into a single log-friendly line.
pub(crate) fn summarize_error_body(body: &str) -> String {
    if let Ok(problem) = serde_json::from_str::<Problem>(body) {
        match (problem.title, problem.detail) {
            (Some(title), Some(detail)) => return format!("{title}: {detail}"),
            (Some(msg), None) | (None, Some(msg)) => return msg,
            (None, None) => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_DETAIL_CHARS {
        let cut: String = trimmed.chars().take(MAX_DETAIL_CHARS).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    }
}

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Base URL or a derived endpoint URL is unusable.
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Signing or sending the request failed.
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest_oauth1::Error),

    /// The response body could not be read.
    #[error("Failed to read upstream response: {0}")]
    Body(#[from] reqwest::Error),

    /// The request payload could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The round trip exceeded the configured budget.
    #[error("Upstream timeout after {0} seconds")]
    Timeout(u64),

    /// The API answered with a status other than the expected one.
    #[error("Upstream {operation} returned {actual} (expected {expected}): {detail}")]
    Status {
        operation: &'static str,
        expected: u16,
        actual: u16,
        detail: String,
    },
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::InvalidUrl(_) => "invalid_url",
            UpstreamError::Client(_) => "client",
            UpstreamError::Request(_) => "transport",
            UpstreamError::Body(_) => "body",
            UpstreamError::Encode(_) => "encode",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Status { .. } => "status",
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
