//! SHELF TUI
//!
//! Terminal user interface for browsing the book catalog.
//!
//! ## Layout
//!
//! Two-pane layout:
//! - Left: Revealed books (title and author)
//! - Right: Detail view (open book, genres, description, reviews)
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection up/down
//! - gg / G: Jump to first / last book
//! - m: Show more
//! - Enter: Open details
//! - Esc: Close details
//! - q: Quit
//!
//! ## Commands
//!
//! - s: Search form (title, author, genre)
//! - /: Quick search by title or author
//! - t: Toggle day/night theme
//! - r: Review the open book (`<rating> <text>`)
//! - o: Open cover image
//! - ?: Help

mod app;
mod ui;

use std::fs::File;
use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use shelf_core::{Catalog, Config};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use app::{App, InputMode};

/// Raw mode and alternate screen for the lifetime of the guard
///
/// Dropping the guard restores the terminal, including on early return
/// and panic unwinding.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the TUI application
///
/// Call [`init_logging`] before loading the catalog so its warnings are kept.
pub fn run(config: &Config, catalog: &Catalog) -> Result<()> {
    let mut app = App::new(catalog, config.theme);
    info!(
        "Browsing {} books, theme {}",
        catalog.len(),
        app.browser.theme()
    );

    let mut guard = TerminalGuard::enter()?;
    run_app(&mut guard.terminal, &mut app)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Check for status message timeout
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // If help is showing, any key dismisses it
            if app.show_help {
                app.show_help = false;
                continue;
            }

            match app.input_mode {
                InputMode::Normal => handle_normal_mode(app, key.code, key.modifiers),
                InputMode::SearchForm => handle_search_form(app, key.code),
                InputMode::QuickSearch => handle_quick_search(app, key.code),
                InputMode::Review => handle_review_mode(app, key.code),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Clear status message on navigation keys
    if matches!(
        code,
        KeyCode::Char('j')
            | KeyCode::Char('k')
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Char('g')
            | KeyCode::Char('G')
    ) {
        app.status_message = None;
    }

    // Clear pending 'g' if timeout expired (500ms)
    if let Some(time) = app.pending_g {
        if time.elapsed() > Duration::from_millis(500) {
            app.pending_g = None;
        }
    }

    match code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),

        KeyCode::Char('m') => app.show_more(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Esc => app.close_detail(),

        KeyCode::Char('s') => app.enter_search_form(),
        KeyCode::Char('/') => app.enter_quick_search(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('r') => app.enter_review_mode(),
        KeyCode::Char('o') => open_cover(app),
        KeyCode::Char('?') => app.toggle_help(),

        // Vim navigation: G (go to last)
        KeyCode::Char('G') => {
            app.pending_g = None;
            app.move_to_last();
        }

        // Vim navigation: g (start of gg sequence)
        KeyCode::Char('g') => {
            if app.pending_g.is_some() {
                app.pending_g = None;
                app.move_to_first();
            } else {
                app.pending_g = Some(std::time::Instant::now());
            }
        }

        _ => {
            app.pending_g = None;
        }
    }
}

/// Handle key events in the search form
fn handle_search_form(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.exit_input_mode(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.form.field = app.form.field.next(),
        KeyCode::BackTab | KeyCode::Up => app.form.field = app.form.field.prev(),
        KeyCode::Left => app.cycle_form_choice(false),
        KeyCode::Right => app.cycle_form_choice(true),
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        _ => {}
    }
}

/// Handle key events in quick search mode
fn handle_quick_search(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_quick_search(),
        // Confirm (stay in searched view)
        KeyCode::Enter => app.exit_input_mode(),
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        _ => {}
    }
}

/// Handle key events while typing a review
fn handle_review_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.exit_input_mode(),
        KeyCode::Enter => app.submit_review(),
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        _ => {}
    }
}

/// Open the focused book's cover image with the system viewer
fn open_cover(app: &mut App) {
    let Some(book) = app.focused_book() else {
        return;
    };
    match open::that_detached(&book.image) {
        Ok(()) => app.set_status(format!("Opened cover for '{}'", book.title)),
        Err(e) => {
            warn!("Failed to open {}: {}", book.image, e);
            app.set_status(format!("Could not open cover: {}", e));
        }
    }
}

/// Initialize logging for TUI mode
///
/// Logs to file (config.log_file or default {data_dir}/debug.log), since
/// stderr belongs to the terminal UI.
pub fn init_logging(config: &Config, log_level: &str) {
    if let Err(e) = config.ensure_data_dir() {
        eprintln!("Warning: {}", e);
    }

    let log_path = config.log_path();
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("shelf_core={},shelf_cli={}", log_level, log_level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
