// Core logic: models, config, the list reducer and its driver
pub mod config;
pub mod error;
pub mod location;
pub mod models;
pub mod providers;
pub mod search;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{Error, FetchError};
pub use location::{History, Location};
pub use models::{PageRequest, Post, PostPage};
pub use search::PostSource;
pub use state::{reduce, Action, ListState, LoadStatus, PageState, QueryState};
pub use store::{execute, FetchCommand, Store};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
