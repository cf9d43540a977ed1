//! Signed client for the upstream microblogging API.
//!
//! # Responsibilities
//! - Sign every request with the process-wide OAuth 1.0a credentials
//! - Bound each round trip, body included, with the configured timeout
//! - Map upstream status codes to success or a typed error

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use reqwest_oauth1::OAuthClientProvider;
use tokio::time::timeout;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::credentials::Credentials;
use crate::upstream::types::{
    summarize_error_body, CreatePostResponse, CreatedPost, DeletePostResponse, NewPost,
    UpstreamError, UpstreamResult,
};

/// Client for the create/delete post endpoints.
#[derive(Clone)]
pub struct PostClient {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
    base_url: Url,
    timeout_duration: Duration,
}

impl PostClient {
    /// Create a new client for the configured upstream.
    pub fn new(config: &UpstreamConfig, credentials: Credentials) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            UpstreamError::InvalidUrl(format!("'{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(format!(
                "'{}' cannot carry path segments",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(UpstreamError::Client)?;

        tracing::debug!(base_url = %base_url, "Upstream client initialized");

        Ok(Self {
            http,
            credentials: Arc::new(credentials),
            base_url,
            timeout_duration: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Publish a post. Succeeds only on `201 Created`.
    ///
    /// Returns the upstream's record of the new post when its body decodes.
    pub async fn create_post(&self, text: &str) -> UpstreamResult<Option<CreatedPost>> {
        let url = self.endpoint(&["2", "tweets"])?;
        let body = serde_json::to_vec(&NewPost { text })?;

        let request = self
            .http
            .clone()
            .oauth1(self.credentials.secrets())
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send();
        let bytes = self.round_trip("create", StatusCode::CREATED, request).await?;

        let created = serde_json::from_slice::<CreatePostResponse>(&bytes)
            .ok()
            .map(|r| r.data);

        match &created {
            Some(post) => tracing::info!(post_id = %post.id, "Post successfully created"),
            None => tracing::info!("Post successfully created (unreadable response body)"),
        }
        Ok(created)
    }

    /// Delete a post by id. Succeeds only on `200 OK`.
    ///
    /// Returns the upstream's `deleted` flag, or `true` when the body is
    /// not the expected document.
    pub async fn delete_post(&self, id: &str) -> UpstreamResult<bool> {
        let url = self.endpoint(&["2", "tweets", id])?;

        let request = self
            .http
            .clone()
            .oauth1(self.credentials.secrets())
            .delete(url)
            .send();
        let bytes = self.round_trip("delete", StatusCode::OK, request).await?;

        let deleted = serde_json::from_slice::<DeletePostResponse>(&bytes)
            .map(|r| r.data.deleted)
            .unwrap_or(true);

        if deleted {
            tracing::info!(post_id = %id, "Post successfully deleted");
        } else {
            tracing::warn!(post_id = %id, "Upstream reported post was not deleted");
        }
        Ok(deleted)
    }

    /// Build an endpoint URL by appending escaped path segments to the base.
    fn endpoint(&self, segments: &[&str]) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                UpstreamError::InvalidUrl(format!("'{}' cannot carry path segments", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Send `request` and read the whole response body within one timeout.
    ///
    /// Any status other than `expected` is an error carrying a summary of
    /// the upstream's body.
    async fn round_trip<F, E>(
        &self,
        operation: &'static str,
        expected: StatusCode,
        request: F,
    ) -> UpstreamResult<Vec<u8>>
    where
        F: Future<Output = Result<Response, E>>,
        UpstreamError: From<E>,
    {
        let start = Instant::now();
        let exchange = async {
            let response = request.await?;
            let status = response.status();
            if status != expected {
                let body = response.text().await.unwrap_or_default();
                return Err(UpstreamError::Status {
                    operation,
                    expected: expected.as_u16(),
                    actual: status.as_u16(),
                    detail: summarize_error_body(&body),
                });
            }
            Ok::<_, UpstreamError>(response.bytes().await?.to_vec())
        };

        let result = match timeout(self.timeout_duration, exchange).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.timeout_duration.as_secs())),
        };

        match &result {
            Ok(_) => metrics::record_upstream(operation, "success", start),
            Err(e) => {
                tracing::error!(operation, error = %e, "Upstream request failed");
                metrics::record_upstream(operation, e.kind(), start);
            }
        }
        result
    }
}

impl std::fmt::Debug for PostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
