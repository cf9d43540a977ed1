//! Relay endpoint handlers.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Inbound create-post document. Scoped to a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub text: String,
}

impl PostRequest {
    /// Decode the first JSON value in `body`; trailing bytes are ignored.
    ///
    /// Only a JSON object is accepted. Serde would otherwise read an array
    /// such as `["hello"]` positionally into the struct.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
        match values.next() {
            Some(Ok(value @ Value::Object(_))) => serde_json::from_value(value),
            Some(Ok(_)) => Err(serde::de::Error::custom("request body must be a JSON object")),
            Some(Err(e)) => Err(e),
            None => Err(serde::de::Error::custom("empty request body")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `POST /tweet`: publish the post upstream, then echo the decoded input.
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let response = match relay_create(&state, headers.request_id(), &body).await {
        Ok(post) => (StatusCode::OK, Json(post)).into_response(),
        Err(e) => e.into_response(),
    };
    metrics::record_request("create", response.status().as_u16(), start);
    response
}

async fn relay_create(
    state: &AppState,
    request_id: &str,
    body: &[u8],
) -> Result<PostRequest, ApiError> {
    let post = PostRequest::from_body(body).map_err(|e| {
        tracing::warn!(request_id, error = %e, "Rejected malformed post body");
        ApiError::InvalidRequest
    })?;

    let created = state.client.create_post(&post.text).await.map_err(|e| {
        tracing::error!(request_id, error = %e, "Create relay failed");
        e
    })?;

    tracing::info!(
        request_id,
        post_id = ?created.as_ref().map(|p| p.id.as_str()),
        "Create relayed"
    );
    Ok(post)
}

/// `DELETE /delete/{id}`: the identifier is the rest of the path.
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let start = Instant::now();
    let request_id = headers.request_id();

    let response = match state.client.delete_post(&id).await {
        Ok(true) => {
            tracing::info!(request_id, post_id = %id, "Delete relayed");
            (StatusCode::OK, format!("Tweet deleted: {id}")).into_response()
        }
        Ok(false) => {
            tracing::warn!(request_id, post_id = %id, "Delete relayed but upstream kept the post");
            ApiError::NotFound.into_response()
        }
        Err(e) => {
            tracing::error!(request_id, post_id = %id, error = %e, "Delete relay failed");
            ApiError::from(e).into_response()
        }
    };
    metrics::record_request("delete", response.status().as_u16(), start);
    response
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_well_formed_post() {
        let post = PostRequest::from_body(br#"{"text":"hello"}"#).unwrap();
        assert_eq!(post.text, "hello");
    }

    #[test]
    fn test_missing_text_and_unknown_fields() {
        let post = PostRequest::from_body(br#"{"lang":"en"}"#).unwrap();
        assert_eq!(post, PostRequest::default());
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let post = PostRequest::from_body(b"{\"text\":\"a\"}\n{garbage").unwrap();
        assert_eq!(post.text, "a");
    }

    #[test]
    fn test_malformed_bodies_rejected() {
        assert!(PostRequest::from_body(b"not-json").is_err());
        assert!(PostRequest::from_body(b"").is_err());
        assert!(PostRequest::from_body(br#"{"text": 5}"#).is_err());
        assert!(PostRequest::from_body(br#"["text"]"#).is_err());
        assert!(PostRequest::from_body(br#"["hello"]"#).is_err());
        assert!(PostRequest::from_body(b"[]").is_err());
        assert!(PostRequest::from_body(b"null").is_err());
        assert!(PostRequest::from_body(br#""hello""#).is_err());
    }

    #[test]
    fn test_echo_shape() {
        let post = PostRequest {
            text: "hello".into(),
        };
        assert_eq!(serde_json::to_string(&post).unwrap(), r#"{"text":"hello"}"#);
    }
}
