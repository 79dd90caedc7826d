use serde::{Deserialize, Serialize};

/// A single search hit, read-only and replaced wholesale on every fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl Post {
    /// Tags as rendered in the table column
    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }
}

impl From<postscout_api::ApiPost> for Post {
    fn from(api: postscout_api::ApiPost) -> Self {
        Self {
            id: api.id,
            title: api.title,
            body: api.body,
            tags: api.tags,
        }
    }
}

/// One window of search results plus the count of all matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
}

impl From<postscout_api::PostSearchResponse> for PostPage {
    fn from(resp: postscout_api::PostSearchResponse) -> Self {
        Self {
            posts: resp.posts.into_iter().map(Post::from).collect(),
            total: resp.total,
        }
    }
}

/// Parameters of one search request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub query: String,
    pub skip: u64,
    pub limit: u32,
}
