// UI rendering logic
use crate::{App, InputMode};
use postscout_core::{LoadStatus, PageState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use throbber_widgets_tui::Throbber;

/// How many numbered buttons the page selector shows before eliding
const PAGE_WINDOW: u32 = 7;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Min(5),    // Posts table
            Constraint::Length(3), // Page selector
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_search_input(frame, app, chunks[1]);
    render_posts_table(frame, app, chunks[2]);
    render_page_selector(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![Span::styled(
        "Explore Awesome Posts",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, header_chunks[0]);

    let link = Paragraph::new(Line::from(vec![
        Span::styled("link ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.current_location().to_string(),
            Style::default().fg(Color::Magenta),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Right);
    frame.render_widget(link, header_chunks[1]);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default(),
    };

    let input = Paragraph::new(app.search_input()).style(input_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search posts")
            .border_style(input_style),
    );

    frame.render_widget(input, area);

    if app.input_mode == InputMode::Searching {
        let cursor_x = area.x + app.search_input().chars().count() as u16 + 1;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_posts_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let header = Row::new(["Title", "Body", "Tags"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(50),
        Constraint::Percentage(20),
    ];
    let block = Block::default().borders(Borders::ALL).title(" Posts ");

    if app.state().is_loading() {
        // Spinner row replaces the body while a fetch is outstanding
        let spinner = Throbber::default()
            .style(Style::default().fg(Color::Cyan))
            .throbber_style(Style::default().fg(Color::Cyan));
        let line = Line::from(vec![
            spinner.to_symbol_span(&app.throbber_state),
            Span::styled(" Loading posts...", Style::default().fg(Color::DarkGray)),
        ]);
        let rows = vec![Row::new(vec![Cell::from(""), Cell::from(line), Cell::from("")])];
        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
        return;
    }

    let rows: Vec<Row> = app
        .state()
        .posts
        .iter()
        .map(|post| {
            Row::new(vec![
                Cell::from(Span::styled(
                    post.title.clone(),
                    Style::default()
                        .fg(Color::LightBlue)
                        .add_modifier(Modifier::BOLD),
                )),
                Cell::from(first_line(&post.body).to_string()),
                Cell::from(Span::styled(
                    post.tags_display(),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// One slot in the page selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Gap,
}

/// Numbered entries for the selector. All `page_count` pages are listed
/// when they fit in the window, otherwise first/last plus a run around the
/// current page with gaps between.
pub fn page_items(page: &PageState, window: u32) -> Vec<PageItem> {
    let count = page.page_count();
    if count <= window {
        return (1..=count).map(PageItem::Page).collect();
    }

    let current = page.current_page.clamp(1, count);
    let side = window.saturating_sub(3) / 2;
    let start = current.saturating_sub(side).max(2);
    let end = (current + side).min(count - 1);

    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Gap);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < count - 1 {
        items.push(PageItem::Gap);
    }
    items.push(PageItem::Page(count));
    items
}

fn render_page_selector(frame: &mut Frame, app: &App, area: Rect) {
    let page = &app.state().page;
    let enabled = Style::default().fg(Color::Blue);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "‹ ",
        if page.has_previous() { enabled } else { disabled },
    )];

    for item in page_items(page, PAGE_WINDOW) {
        match item {
            PageItem::Page(n) if n == page.current_page => spans.push(Span::styled(
                format!("[{}]", n),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )),
            PageItem::Page(n) => spans.push(Span::styled(format!(" {} ", n), enabled)),
            PageItem::Gap => spans.push(Span::styled(" … ", disabled)),
        }
    }

    spans.push(Span::styled(
        " ›",
        if page.has_next() { enabled } else { disabled },
    ));

    let title = format!(
        " Page {} of {} · {} per page ",
        page.current_page,
        page.page_count(),
        page.page_size
    );
    let selector = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(selector, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();
    let status = if let LoadStatus::Failed(error) = &state.status {
        vec![Span::styled(error.to_string(), Style::default().fg(Color::Red))]
    } else {
        let help = match app.input_mode {
            InputMode::Searching => Span::styled(
                "SEARCH | type to filter | ESC/ENTER: browse",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Normal => Span::raw(
                "h/l: page | g/G: first/last | +/-: page size | j/k: row | /: search | x: clear | r: refresh | q: quit",
            ),
        };
        vec![
            help,
            Span::styled(
                format!("  {} total", state.page.total_count),
                Style::default().fg(Color::Green),
            ),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use postscout_core::{Action, FetchError, Post, PostPage};
    use ratatui::{backend::TestBackend, Terminal};

    fn page_state(current: u32, size: u32, total: u64) -> PageState {
        PageState {
            current_page: current,
            page_size: size,
            total_count: total,
        }
    }

    fn sample_posts(count: u64) -> Vec<Post> {
        (1..=count)
            .map(|id| Post {
                id,
                title: format!("Post number {}", id),
                body: format!("Body of post {}", id),
                tags: vec!["history".into(), "crime".into()],
            })
            .collect()
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().to_string()
    }

    #[test]
    fn test_page_items_list_every_page_when_they_fit() {
        let items = page_items(&page_state(1, 10, 37), PAGE_WINDOW);
        assert_eq!(
            items,
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Page(3),
                PageItem::Page(4)
            ]
        );
        assert!(page_items(&page_state(1, 10, 0), PAGE_WINDOW).is_empty());
    }

    #[test]
    fn test_page_items_elide_long_ranges() {
        let items = page_items(&page_state(10, 10, 250), PAGE_WINDOW);
        assert_eq!(items.first(), Some(&PageItem::Page(1)));
        assert_eq!(items.last(), Some(&PageItem::Page(25)));
        assert!(items.contains(&PageItem::Page(10)));
        assert_eq!(items.iter().filter(|i| **i == PageItem::Gap).count(), 2);
    }

    #[test]
    fn test_loaded_table_renders_rows_and_page_count() {
        let mut app = App::new(10);
        let command = app.mount();
        app.apply(Action::FetchFinished {
            seq: command.seq,
            result: Ok(PostPage {
                posts: sample_posts(10),
                total: 37,
            }),
        });

        let view = draw(&mut app);
        assert!(view.contains("Title"));
        assert!(view.contains("Tags"));
        assert!(view.contains("Post number 1 "));
        assert!(view.contains("history, crime"));
        assert!(view.contains("Page 1 of 4"));
        assert!(view.contains("37 total"));
    }

    #[test]
    fn test_loading_shows_spinner_row() {
        let mut app = App::new(10);
        app.mount();

        let view = draw(&mut app);
        assert!(view.contains("Loading posts..."));
    }

    #[test]
    fn test_failure_keeps_rows_and_shows_error() {
        let mut app = App::new(10);
        let first = app.mount();
        app.apply(Action::FetchFinished {
            seq: first.seq,
            result: Ok(PostPage {
                posts: sample_posts(3),
                total: 3,
            }),
        });
        let second = app.refresh();
        app.apply(Action::FetchFinished {
            seq: second.seq,
            result: Err(FetchError::Network("connection refused".into())),
        });

        let view = draw(&mut app);
        assert!(!view.contains("Loading posts..."));
        assert!(view.contains("Post number 3"));
        assert!(view.contains("connection refused"));
    }
}
