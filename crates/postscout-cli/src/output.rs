// Plain-text and JSON rendering for one-shot searches
use postscout_core::{ListState, Post};
use serde::Serialize;

const TITLE_WIDTH: usize = 36;
const BODY_WIDTH: usize = 56;

#[derive(Debug, Serialize)]
pub struct SearchOutput<'a> {
    pub query: &'a str,
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
    pub posts: &'a [Post],
}

impl<'a> SearchOutput<'a> {
    pub fn from_state(state: &'a ListState) -> Self {
        Self {
            query: &state.query.search_text,
            page: state.page.current_page,
            page_size: state.page.page_size,
            page_count: state.page.page_count(),
            total: state.page.total_count,
            posts: &state.posts,
        }
    }
}

/// Title | Body | Tags table followed by the page summary
pub fn format_table(state: &ListState) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<tw$}  {:<bw$}  {}\n",
        "Title",
        "Body",
        "Tags",
        tw = TITLE_WIDTH,
        bw = BODY_WIDTH
    ));
    out.push_str(&format!(
        "{}  {}  {}\n",
        "-".repeat(TITLE_WIDTH),
        "-".repeat(BODY_WIDTH),
        "-".repeat(4)
    ));

    if state.posts.is_empty() {
        out.push_str("(no posts)\n");
    }

    for post in &state.posts {
        out.push_str(&format!(
            "{:<tw$}  {:<bw$}  {}\n",
            truncate(&post.title, TITLE_WIDTH),
            truncate(post.body.lines().next().unwrap_or(""), BODY_WIDTH),
            post.tags_display(),
            tw = TITLE_WIDTH,
            bw = BODY_WIDTH
        ));
    }

    out.push_str(&format!(
        "\nPage {} of {} ({} total)\n",
        state.page.current_page,
        state.page.page_count(),
        state.page.total_count
    ));
    out
}

/// Cut at a char boundary, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
