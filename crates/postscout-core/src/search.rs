use crate::error::FetchError;
use crate::models::{PageRequest, PostPage};

/// Anything that can answer a paginated post search
///
/// The remote API is one implementation; tests swap in a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PostSource: Send + Sync {
    async fn search(&self, request: &PageRequest) -> Result<PostPage, FetchError>;
}
