use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::retry::{is_retryable_status, with_retry, RetryConfig, Retryable};

const DUMMYJSON_API_BASE: &str = "https://dummyjson.com";

#[derive(Error, Debug)]
pub enum DummyJsonError {
    #[error("API request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl Retryable for DummyJsonError {
    fn is_retryable(&self) -> bool {
        match self {
            DummyJsonError::RequestFailed { status, .. } => {
                reqwest::StatusCode::from_u16(*status)
                    .map(is_retryable_status)
                    .unwrap_or(false)
            }
            DummyJsonError::RateLimitExceeded => true,
            DummyJsonError::NetworkError(e) => e.is_timeout() || e.is_connect(),
            DummyJsonError::ParseError(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DummyJsonError>;

/// Client for the DummyJSON post search endpoint
pub struct PostsClient {
    client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl PostsClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DUMMYJSON_API_BASE.to_string())
    }

    /// Point the client at another host (mirrors, local test servers)
    pub fn with_base_url(base_url: String) -> Result<Self> {
        Self::build(base_url, None, RetryConfig::default())
    }

    /// Full constructor. `timeout` of `None` leaves reqwest's default in place.
    pub fn build(
        base_url: String,
        timeout: Option<Duration>,
        retry_config: RetryConfig,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("PostScout/0.1.0"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search posts. `skip` is the row offset, `limit` the page size.
    pub async fn search_posts(
        &self,
        query: &str,
        skip: u64,
        limit: u32,
    ) -> Result<PostSearchResponse> {
        let url = format!("{}/posts/search", self.base_url);
        let skip = skip.to_string();
        let limit = limit.to_string();

        with_retry(&self.retry_config, || async {
            debug!("GET {} q={:?} skip={} limit={}", url, query, skip, limit);

            let response = self
                .client
                .get(&url)
                .query(&[("q", query), ("skip", skip.as_str()), ("limit", limit.as_str())])
                .send()
                .await?;

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(DummyJsonError::RateLimitExceeded);
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(DummyJsonError::RequestFailed {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            let page: PostSearchResponse = serde_json::from_str(&body)?;
            Ok(page)
        })
        .await
    }
}

/// One post as the API returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPost {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Envelope of `/posts/search`
///
/// `total` counts every match, independent of the skip/limit window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSearchResponse {
    pub posts: Vec<ApiPost>,
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}
