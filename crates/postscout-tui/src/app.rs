// TUI application state
use postscout_core::{Action, FetchCommand, ListState, Location, Post, Store};
use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;

/// Page sizes the `+`/`-` keys cycle through
pub const PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Paging through results
    Searching, // Typing in search box
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub store: Store,
    pub table_state: TableState,
    pub throbber_state: ThrobberState,
}

impl App {
    pub fn new(page_size: u32) -> Self {
        Self::with_store(Store::new(page_size))
    }

    pub fn with_store(store: Store) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Searching,
            store,
            table_state: TableState::default(),
            throbber_state: ThrobberState::default(),
        }
    }

    pub fn state(&self) -> &ListState {
        self.store.state()
    }

    pub fn search_input(&self) -> &str {
        &self.store.state().query.search_text
    }

    /// Current shareable link, `/` before any navigation
    pub fn current_location(&self) -> Location {
        self.store.history().current().cloned().unwrap_or_default()
    }

    pub fn mount(&mut self) -> FetchCommand {
        self.store.mount()
    }

    pub fn refresh(&mut self) -> FetchCommand {
        self.store.refresh()
    }

    /// Apply a finished fetch
    pub fn apply(&mut self, action: Action) {
        if let Action::FetchFinished { seq, result } = action {
            let was_latest = seq == self.store.state().latest_request;
            let succeeded = result.is_ok();
            self.store.complete(seq, result);
            if was_latest && succeeded {
                self.reset_selection();
            }
        }
    }

    pub fn push_search_char(&mut self, c: char) -> Option<FetchCommand> {
        let mut text = self.search_input().to_string();
        text.push(c);
        self.store.on_search_change(text)
    }

    pub fn pop_search_char(&mut self) -> Option<FetchCommand> {
        let mut text = self.search_input().to_string();
        text.pop()?;
        self.store.on_search_change(text)
    }

    pub fn clear_search(&mut self) -> Option<FetchCommand> {
        if self.search_input().is_empty() {
            return None;
        }
        self.store.on_search_change(String::new())
    }

    // Page moves stay inside what the page selector offers

    pub fn next_page(&mut self) -> Option<FetchCommand> {
        let page = &self.state().page;
        if !page.has_next() {
            return None;
        }
        let target = page.current_page + 1;
        self.store.on_page_change(target)
    }

    pub fn previous_page(&mut self) -> Option<FetchCommand> {
        let page = &self.state().page;
        if !page.has_previous() {
            return None;
        }
        let target = page.current_page - 1;
        self.store.on_page_change(target)
    }

    pub fn first_page(&mut self) -> Option<FetchCommand> {
        self.store.on_page_change(1)
    }

    pub fn last_page(&mut self) -> Option<FetchCommand> {
        let count = self.state().page.page_count();
        if count == 0 {
            return None;
        }
        self.store.on_page_change(count)
    }

    pub fn grow_page_size(&mut self) -> Option<FetchCommand> {
        let current = self.state().page.page_size;
        let next = PAGE_SIZES.iter().copied().find(|size| *size > current)?;
        self.store.on_page_size_change(next)
    }

    pub fn shrink_page_size(&mut self) -> Option<FetchCommand> {
        let current = self.state().page.page_size;
        let next = PAGE_SIZES.iter().rev().copied().find(|size| *size < current)?;
        self.store.on_page_size_change(next)
    }

    pub fn next_row(&mut self) {
        let len = self.state().posts.len();
        if len == 0 {
            return;
        }
        let next = self.table_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.table_state.select(Some(next));
    }

    pub fn previous_row(&mut self) {
        if self.state().posts.is_empty() {
            return;
        }
        let prev = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.table_state
            .selected()
            .and_then(|i| self.state().posts.get(i))
    }

    fn reset_selection(&mut self) {
        if self.state().posts.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(0));
        }
    }

    pub fn tick(&mut self) {
        if self.state().is_loading() {
            self.throbber_state.calc_next();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postscout_core::PostPage;

    fn page_of(ids: std::ops::RangeInclusive<u64>, total: u64) -> PostPage {
        PostPage {
            posts: ids
                .map(|id| Post {
                    id,
                    title: format!("title {}", id),
                    body: format!("body {}", id),
                    tags: vec!["a".into(), "b".into()],
                })
                .collect(),
            total,
        }
    }

    fn loaded_app(total: u64) -> App {
        let mut app = App::new(10);
        let command = app.mount();
        app.apply(Action::FetchFinished {
            seq: command.seq,
            result: Ok(page_of(1..=10, total)),
        });
        app
    }

    #[test]
    fn test_each_keystroke_issues_a_search() {
        let mut app = loaded_app(37);
        let first = app.push_search_char('r').unwrap();
        let second = app.push_search_char('u').unwrap();

        assert_eq!(first.request.query, "r");
        assert_eq!(second.request.query, "ru");
        assert!(second.seq > first.seq);
        assert_eq!(app.search_input(), "ru");
    }

    #[test]
    fn test_backspace_on_empty_input_is_noop() {
        let mut app = loaded_app(37);
        assert!(app.pop_search_char().is_none());
        assert!(app.clear_search().is_none());
    }

    #[test]
    fn test_paging_is_bounded_by_page_count() {
        let mut app = loaded_app(37);
        assert!(app.previous_page().is_none());

        let last = app.last_page().unwrap();
        assert_eq!(last.request.skip, 30);
        assert!(app.next_page().is_none());

        let prev = app.previous_page().unwrap();
        assert_eq!(prev.request.skip, 20);
    }

    #[test]
    fn test_last_page_without_results_does_nothing() {
        let mut app = loaded_app(0);
        assert!(app.last_page().is_none());
        assert!(app.next_page().is_none());
    }

    #[test]
    fn test_page_size_cycles_and_resets_page() {
        let mut app = loaded_app(37);
        app.next_page().unwrap();

        let bigger = app.grow_page_size().unwrap();
        assert_eq!(bigger.request.limit, 20);
        assert_eq!(bigger.request.skip, 0);

        app.grow_page_size().unwrap();
        assert!(app.grow_page_size().is_none());

        let smaller = app.shrink_page_size().unwrap();
        assert_eq!(smaller.request.limit, 20);
    }

    #[test]
    fn test_row_selection_stays_in_bounds() {
        let mut app = loaded_app(37);
        assert_eq!(app.selected_post().map(|p| p.id), Some(1));

        for _ in 0..20 {
            app.next_row();
        }
        assert_eq!(app.selected_post().map(|p| p.id), Some(10));

        app.previous_row();
        assert_eq!(app.selected_post().map(|p| p.id), Some(9));
    }

    #[test]
    fn test_location_follows_navigation() {
        let mut app = loaded_app(37);
        assert_eq!(app.current_location().to_string(), "/");

        app.push_search_char('x');
        assert_eq!(app.current_location().to_string(), "?page=1&search=x");
    }
}
