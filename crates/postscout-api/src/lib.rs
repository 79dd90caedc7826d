// API client for the DummyJSON post search endpoint
pub mod dummyjson;
pub mod retry;

// Re-export common types
pub use dummyjson::{ApiPost, DummyJsonError, PostSearchResponse, PostsClient};
pub use retry::RetryConfig;
