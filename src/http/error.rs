//! Mapping of handler failures to HTTP responses.
//!
//! Upstream failures affect only the request that hit them: they become
//! 502 Bad Gateway, or 504 Gateway Timeout when the upstream was too slow.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors returned by the relay handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The inbound body was not a valid post document.
    #[error("Invalid request")]
    InvalidRequest,

    /// The upstream reported that nothing was removed.
    #[error("Tweet not found")]
    NotFound,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Upstream(UpstreamError::Timeout(_)) => "Upstream request timed out",
            ApiError::Upstream(_) => "Upstream request failed",
            ApiError::InvalidRequest => "Invalid request",
            ApiError::NotFound => "Tweet not found",
        };
        (self.status(), message).into_response()
    }
}
