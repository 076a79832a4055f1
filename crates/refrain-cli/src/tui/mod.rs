use std::io;
use std::thread;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use refrain_search::{Config, SearchClient, SearchController};
use tokio::sync::mpsc;

pub mod search_view;

/// Application state for the search TUI.
#[derive(Debug)]
pub struct App {
    pub controller: SearchController<SearchClient>,
    /// Index of the first result shown.
    pub scroll: usize,
    pub backend_url: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: SearchController<SearchClient>, backend_url: impl Into<String>) -> Self {
        Self {
            controller,
            scroll: 0,
            backend_url: backend_url.into(),
            should_quit: false,
        }
    }

    /// Whether results are on their way: still debouncing or in flight.
    pub fn is_searching(&self) -> bool {
        self.controller.is_debouncing() || self.controller.state().status.is_loading()
    }

    /// Apply one item from the terminal input channel. `None` means the
    /// reader thread is gone and no more keys can arrive, so the app quits.
    fn handle_input(&mut self, key: Option<KeyEvent>) {
        match key {
            Some(key) => self.handle_key(key),
            None => self.should_quit = true,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('u') if ctrl => self.set_query(String::new()),
            KeyCode::Char(c) if !ctrl => {
                let mut query = self.controller.state().query.clone();
                query.push(c);
                self.set_query(query);
            }
            KeyCode::Backspace => {
                let mut query = self.controller.state().query.clone();
                if query.pop().is_some() {
                    self.set_query(query);
                }
            }
            KeyCode::Tab => {
                self.controller.cycle_album();
                self.scroll = 0;
            }
            KeyCode::BackTab => {
                self.controller.cycle_album_back();
                self.scroll = 0;
            }
            KeyCode::Down => {
                if self.scroll + 1 < self.controller.view().filtered.len() {
                    self.scroll += 1;
                }
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn set_query(&mut self, query: String) {
        self.controller.on_query_change(query);
        self.scroll = 0;
    }
}

/// Run the search TUI.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub async fn run_tui(config: Config) -> Result<()> {
    let client = SearchClient::from_config(&config)?;
    let controller = SearchController::from_config(client, &config);
    let app = App::new(controller, config.backend_base_url.as_str());

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app).await;

    // Restore terminal regardless of success or failure
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    // Terminal reads block, so they live on their own thread and are
    // forwarded into the async loop.
    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if key_tx.send(key).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Failed to read terminal event: {}", e);
                break;
            }
        }
    });

    loop {
        terminal.draw(|frame| search_view::render(frame, &app))?;

        tokio::select! {
            key = key_rx.recv() => app.handle_input(key),
            Some(event) = app.controller.next_event() => app.controller.handle_event(event),
        }

        if app.should_quit {
            app.controller.shutdown();
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn new_app() -> App {
        let client = SearchClient::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        let controller = SearchController::new(
            client,
            vec!["Freudian".to_string(), "NEVER ENOUGH".to_string()],
            Duration::from_millis(300),
        );
        App::new(controller, "http://127.0.0.1:9")
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn test_typing_edits_query() {
        let mut app = new_app();
        for c in "love".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.controller.state().query, "love");
        assert!(app.is_searching());

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.state().query, "lov");
    }

    #[tokio::test]
    async fn test_ctrl_u_clears_query() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('x'));
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(app.controller.state().query.is_empty());
    }

    #[tokio::test]
    async fn test_tab_cycles_album_filter() {
        let mut app = new_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.controller.state().album.to_string(), "Freudian");
        press(&mut app, KeyCode::BackTab);
        assert!(app.controller.state().album.is_all());
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let mut app = new_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(app.controller.state().query.is_empty());
    }

    #[tokio::test]
    async fn test_closed_input_channel_quits() {
        let mut app = new_app();
        app.handle_input(Some(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)));
        assert_eq!(app.controller.state().query, "a");
        assert!(!app.should_quit);

        app.handle_input(None);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_scroll_stays_in_bounds() {
        let mut app = new_app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.scroll, 0);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.scroll, 0);
    }
}
