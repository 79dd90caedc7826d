// DummyJSON provider - bridges the API client with the PostSource trait
use async_trait::async_trait;
use postscout_api::PostsClient;

use crate::{
    config::ApiConfig,
    error::FetchError,
    models::{PageRequest, PostPage},
    search::PostSource,
    Error, Result,
};

/// Wrapper around PostsClient that implements PostSource
pub struct DummyJsonProvider {
    client: PostsClient,
}

impl DummyJsonProvider {
    pub fn new(client: PostsClient) -> Self {
        Self { client }
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let client = PostsClient::build(api.base_url.clone(), api.timeout(), api.retry_config())
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl PostSource for DummyJsonProvider {
    async fn search(&self, request: &PageRequest) -> std::result::Result<PostPage, FetchError> {
        let response = self
            .client
            .search_posts(&request.query, request.skip, request.limit)
            .await?;

        Ok(PostPage::from(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> DummyJsonProvider {
        let api = ApiConfig {
            base_url: server.uri(),
            ..ApiConfig::default()
        };
        DummyJsonProvider::from_config(&api).unwrap()
    }

    #[tokio::test]
    async fn test_search_maps_response_into_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/search"))
            .and(query_param("q", "love"))
            .and(query_param("skip", "10"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "posts": [
                    { "id": 11, "title": "eleven", "body": "b11", "tags": ["love"] },
                    { "id": 12, "title": "twelve", "body": "b12", "tags": [] }
                ],
                "total": 12,
                "skip": 10,
                "limit": 10
            })))
            .mount(&server)
            .await;

        let request = PageRequest {
            query: "love".into(),
            skip: 10,
            limit: 10,
        };
        let page = provider_for(&server).search(&request).await.unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.posts[0].title, "eleven");
        assert_eq!(page.posts[1].id, 12);
    }

    #[tokio::test]
    async fn test_http_failure_becomes_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let request = PageRequest {
            query: String::new(),
            skip: 0,
            limit: 10,
        };
        let err = provider_for(&server).search(&request).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                status: 500,
                message: "boom".into()
            }
        );
    }
}
