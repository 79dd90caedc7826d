//! Shareable location state.
//!
//! Mirrors what a browser address bar would show for the post list: a
//! search pushes `?page=1&search=<text>`, a page change pushes
//! `?page=<n>` and drops the search term. Entries are written for linking
//! only; the list never restores its state from them on start-up.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub page: Option<u32>,
    pub search: Option<String>,
}

impl Location {
    /// Entry pushed by a search change
    pub fn for_search(text: &str) -> Self {
        Self {
            page: Some(1),
            search: Some(text.to_string()),
        }
    }

    /// Entry pushed by a page change
    pub fn for_page(page: u32) -> Self {
        Self {
            page: Some(page),
            search: None,
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(page) = self.page {
            parts.push(format!("page={}", page));
        }
        if let Some(search) = &self.search {
            parts.push(format!("search={}", urlencoding::encode(search)));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.to_query_string();
        if query.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "{}", query)
        }
    }
}

/// Append-only list of pushed locations
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Location>,
}

impl History {
    pub fn push(&mut self, location: Location) {
        tracing::debug!("navigate {}", location);
        self.entries.push(location);
    }

    pub fn current(&self) -> Option<&Location> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_entry_resets_page() {
        let location = Location::for_search("rust lang");
        assert_eq!(location.to_query_string(), "?page=1&search=rust%20lang");
    }

    #[test]
    fn test_page_entry_drops_search() {
        assert_eq!(Location::for_page(3).to_query_string(), "?page=3");
    }

    #[test]
    fn test_empty_search_is_still_reflected() {
        assert_eq!(Location::for_search("").to_query_string(), "?page=1&search=");
    }

    #[test]
    fn test_history_tracks_current_entry() {
        let mut history = History::default();
        assert!(history.current().is_none());

        history.push(Location::for_search("a"));
        assert_eq!(history.current(), Some(&Location::for_search("a")));

        history.push(Location::for_page(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&Location::for_page(2)));
    }
}
