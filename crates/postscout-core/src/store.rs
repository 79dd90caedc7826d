// Driver around the reducer: owns the snapshot, hands out fetches
use tracing::{debug, warn};

use crate::location::{History, Location};
use crate::models::{PageRequest, PostPage};
use crate::search::PostSource;
use crate::state::{reduce, Action, ListState};
use crate::error::FetchError;

/// A fetch the caller should run and feed back through [`Store::complete`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    pub seq: u64,
    pub request: PageRequest,
}

/// Owns the list state and the navigation history
///
/// Every user action goes through the reducer. When the resulting request
/// differs from the previous one a new fetch is issued with the next
/// sequence number; responses carrying an older number are dropped.
pub struct Store {
    state: ListState,
    history: History,
    next_seq: u64,
}

impl Store {
    pub fn new(page_size: u32) -> Self {
        Self::from_state(ListState::new(page_size))
    }

    pub fn from_state(state: ListState) -> Self {
        Self {
            state,
            history: History::default(),
            next_seq: 0,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Initial load. Any pre-existing location is ignored.
    pub fn mount(&mut self) -> FetchCommand {
        self.issue()
    }

    /// Re-run the current request
    pub fn refresh(&mut self) -> FetchCommand {
        self.issue()
    }

    pub fn on_search_change(&mut self, text: impl Into<String>) -> Option<FetchCommand> {
        let text = text.into();
        let location = Location::for_search(&text);
        self.dispatch(Action::SearchChanged(text), location)
    }

    pub fn on_page_change(&mut self, page: u32) -> Option<FetchCommand> {
        self.dispatch(Action::PageChanged(page), Location::for_page(page))
    }

    pub fn on_page_size_change(&mut self, page_size: u32) -> Option<FetchCommand> {
        let previous = self.state.request();
        self.state = reduce(&self.state, Action::PageSizeChanged(page_size));
        if self.state.request() == previous {
            return None;
        }
        Some(self.issue())
    }

    /// Feed a finished fetch back in
    pub fn complete(&mut self, seq: u64, result: Result<PostPage, FetchError>) {
        if seq != self.state.latest_request {
            debug!(
                "Discarding stale response #{} (latest is #{})",
                seq, self.state.latest_request
            );
            return;
        }

        match &result {
            Ok(page) => debug!(
                "Fetch #{} returned {} posts of {}",
                seq,
                page.posts.len(),
                page.total
            ),
            Err(err) => warn!("Fetch #{} failed: {}", seq, err),
        }

        self.state = reduce(&self.state, Action::FetchFinished { seq, result });
    }

    fn dispatch(&mut self, action: Action, location: Location) -> Option<FetchCommand> {
        let previous = self.state.request();
        self.state = reduce(&self.state, action);

        if self.state.request() == previous {
            return None;
        }

        self.history.push(location);
        Some(self.issue())
    }

    fn issue(&mut self) -> FetchCommand {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.state = reduce(&self.state, Action::FetchIssued { seq });

        let request = self.state.request();
        debug!(
            "Issuing fetch #{} q={:?} skip={} limit={}",
            seq, request.query, request.skip, request.limit
        );
        FetchCommand { seq, request }
    }
}

/// Run one fetch against a source and package the outcome for the store
pub async fn execute(source: &dyn PostSource, command: FetchCommand) -> Action {
    let result = source.search(&command.request).await;
    Action::FetchFinished {
        seq: command.seq,
        result,
    }
}
