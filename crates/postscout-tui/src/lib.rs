// Terminal UI implementation using ratatui

pub mod app;
pub mod runner;
pub mod ui;

pub use app::{App, InputMode, PAGE_SIZES};
pub use runner::{handle_key, run_tui};
