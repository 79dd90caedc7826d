//! List state snapshot and its reducer.
//!
//! `reduce` is pure: it never talks to the network and never logs. The
//! [`Store`](crate::store::Store) decides when a transition needs a fetch.

use crate::error::FetchError;
use crate::models::{PageRequest, Post, PostPage};

/// Pagination window. `current_page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
}

impl PageState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    /// Entries in the page selector: `ceil(total_count / page_size)`
    pub fn page_count(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Row offset sent as `skip`
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    pub search_text: String,
}

/// What the table area should show besides the rows themselves
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(FetchError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub query: QueryState,
    pub page: PageState,
    pub posts: Vec<Post>,
    pub status: LoadStatus,
    /// Sequence number of the most recently issued fetch, 0 before the first
    pub latest_request: u64,
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: QueryState::default(),
            page: PageState::new(page_size),
            posts: Vec::new(),
            status: LoadStatus::Idle,
            latest_request: 0,
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.query.search_text = text.into();
        self.page.current_page = 1;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page.current_page = page.max(1);
        self
    }

    /// The request the current query and window translate to
    pub fn request(&self) -> PageRequest {
        PageRequest {
            query: self.query.search_text.clone(),
            skip: self.page.offset(),
            limit: self.page.page_size,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            LoadStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Search box contents changed
    SearchChanged(String),
    /// Page selector moved (1-based)
    PageChanged(u32),
    PageSizeChanged(u32),
    /// A fetch with this sequence number went out
    FetchIssued { seq: u64 },
    /// A fetch came back
    FetchFinished {
        seq: u64,
        result: Result<PostPage, FetchError>,
    },
}

pub fn reduce(state: &ListState, action: Action) -> ListState {
    let mut next = state.clone();

    match action {
        Action::SearchChanged(text) => {
            next.query.search_text = text;
            next.page.current_page = 1;
        }
        Action::PageChanged(page) => {
            if page > 0 {
                next.page.current_page = page;
            }
        }
        Action::PageSizeChanged(size) => {
            if size > 0 && size != state.page.page_size {
                next.page.page_size = size;
                next.page.current_page = 1;
            }
        }
        Action::FetchIssued { seq } => {
            next.latest_request = seq;
            next.status = LoadStatus::Loading;
        }
        Action::FetchFinished { seq, result } => {
            // Only the latest issued fetch may touch the rows
            if seq != state.latest_request {
                return next;
            }
            match result {
                Ok(page) => {
                    next.posts = page.posts;
                    next.page.total_count = page.total;
                    next.status = LoadStatus::Loaded;
                }
                Err(err) => {
                    next.status = LoadStatus::Failed(err);
                }
            }
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(ids: std::ops::RangeInclusive<u64>) -> Vec<Post> {
        ids.map(|id| Post {
            id,
            title: format!("title {}", id),
            body: format!("body {}", id),
            tags: vec!["tag".into()],
        })
        .collect()
    }

    fn loaded(total: u64, rows: Vec<Post>) -> ListState {
        let state = reduce(&ListState::new(10), Action::FetchIssued { seq: 1 });
        reduce(
            &state,
            Action::FetchFinished {
                seq: 1,
                result: Ok(PostPage { posts: rows, total }),
            },
        )
    }

    #[test]
    fn test_page_count_is_ceiling() {
        let cases = [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (37, 10, 4), (150, 7, 22)];
        for (total, size, expected) in cases {
            let page = PageState {
                current_page: 1,
                page_size: size,
                total_count: total,
            };
            assert_eq!(page.page_count(), expected, "total={} size={}", total, size);
        }
    }

    #[test]
    fn test_offset_uses_one_based_page() {
        let page = PageState {
            current_page: 3,
            page_size: 10,
            total_count: 100,
        };
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn test_search_change_resets_page() {
        let state = ListState::new(10).with_page(3);
        let next = reduce(&state, Action::SearchChanged("rust".into()));

        assert_eq!(next.page.current_page, 1);
        assert_eq!(
            next.request(),
            PageRequest {
                query: "rust".into(),
                skip: 0,
                limit: 10
            }
        );
    }

    #[test]
    fn test_zero_page_is_ignored() {
        let state = ListState::new(10).with_page(2);
        assert_eq!(reduce(&state, Action::PageChanged(0)), state);
    }

    #[test]
    fn test_page_size_change_restarts_at_first_page() {
        let state = ListState::new(10).with_page(4);
        let next = reduce(&state, Action::PageSizeChanged(20));
        assert_eq!(next.page.page_size, 20);
        assert_eq!(next.page.current_page, 1);

        assert_eq!(reduce(&next, Action::PageSizeChanged(0)), next);
    }

    #[test]
    fn test_successful_fetch_replaces_rows_in_order() {
        let state = loaded(37, posts(1..=10));

        assert_eq!(state.status, LoadStatus::Loaded);
        assert_eq!(state.page.total_count, 37);
        assert_eq!(state.page.page_count(), 4);
        assert_eq!(state.posts.len(), 10);
        assert_eq!(state.posts.first().map(|p| p.id), Some(1));
        assert_eq!(state.posts.last().map(|p| p.id), Some(10));
    }

    #[test]
    fn test_failed_fetch_keeps_previous_rows() {
        let state = loaded(37, posts(1..=10));
        let state = reduce(&state, Action::PageChanged(2));
        let state = reduce(&state, Action::FetchIssued { seq: 2 });
        assert!(state.is_loading());

        let failed = reduce(
            &state,
            Action::FetchFinished {
                seq: 2,
                result: Err(FetchError::Network("connection refused".into())),
            },
        );

        assert!(!failed.is_loading());
        assert_eq!(failed.posts, posts(1..=10));
        assert_eq!(
            failed.error(),
            Some(&FetchError::Network("connection refused".into()))
        );
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let state = reduce(&ListState::new(10), Action::FetchIssued { seq: 1 });
        let state = reduce(&state, Action::PageChanged(2));
        let state = reduce(&state, Action::FetchIssued { seq: 2 });

        let state = reduce(
            &state,
            Action::FetchFinished {
                seq: 2,
                result: Ok(PostPage {
                    posts: posts(11..=20),
                    total: 37,
                }),
            },
        );
        let after_stale = reduce(
            &state,
            Action::FetchFinished {
                seq: 1,
                result: Ok(PostPage {
                    posts: posts(1..=10),
                    total: 37,
                }),
            },
        );

        assert_eq!(after_stale, state);
        assert_eq!(after_stale.page.current_page, 2);
        assert_eq!(after_stale.posts.first().map(|p| p.id), Some(11));
    }

    #[test]
    fn test_short_last_page_renders_returned_rows() {
        let state = loaded(37, posts(31..=37));
        assert_eq!(state.posts.len(), 7);
    }
}
