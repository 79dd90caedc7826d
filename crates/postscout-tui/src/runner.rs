// TUI event loop and terminal management
use crate::{App, InputMode};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use postscout_core::{execute as execute_fetch, Action, FetchCommand, PostSource};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub async fn run_tui(
    mut app: App,
    source: Arc<dyn PostSource>,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, source, tick_rate).await;

    // Restore terminal even when the loop bailed out
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Spawns fetches and aborts the one they supersede
struct Fetcher {
    source: Arc<dyn PostSource>,
    results: mpsc::UnboundedSender<Action>,
    in_flight: Option<JoinHandle<()>>,
}

impl Fetcher {
    fn spawn(&mut self, command: FetchCommand) {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!("Aborting superseded fetch before #{}", command.seq);
                previous.abort();
            }
        }

        let source = Arc::clone(&self.source);
        let results = self.results.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let action = execute_fetch(source.as_ref(), command).await;
            // Receiver gone means the UI already shut down
            let _ = results.send(action);
        }));
    }
}

async fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: Arc<dyn PostSource>,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetcher = Fetcher {
        source,
        results: tx,
        in_flight: None,
    };

    info!("Starting post browser");
    fetcher.spawn(app.mount());

    loop {
        while let Ok(action) = rx.try_recv() {
            app.apply(action);
        }

        terminal.draw(|f| crate::ui::render(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = handle_key(app, key) {
                        fetcher.spawn(command);
                    }
                }
            }
        } else {
            app.tick();
        }

        if app.should_quit {
            break;
        }
    }

    if let Some(handle) = fetcher.in_flight.take() {
        handle.abort();
    }

    Ok(())
}

/// Map a key press onto the app. Returns the fetch it triggered, if any.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<FetchCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return None;
    }

    match app.input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Char(c) => app.push_search_char(c),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
                app.enter_normal_mode();
                None
            }
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                app.quit();
                None
            }
            KeyCode::Char('/') => {
                app.enter_search_mode();
                None
            }
            KeyCode::Char('x') => app.clear_search(),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => app.next_page(),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => app.previous_page(),
            KeyCode::Char('g') | KeyCode::Home => app.first_page(),
            KeyCode::Char('G') | KeyCode::End => app.last_page(),
            KeyCode::Char('+') | KeyCode::Char('=') => app.grow_page_size(),
            KeyCode::Char('-') => app.shrink_page_size(),
            KeyCode::Char('r') => Some(app.refresh()),
            KeyCode::Char('j') | KeyCode::Down => {
                app.next_row();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.previous_row();
                None
            }
            _ => None,
        },
    }
}
