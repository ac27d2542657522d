use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use ratatui::prelude::*;
use std::io::stdout;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::catalog::Catalog;
use crate::gallery::{GalleryEvent, Key};

use super::mouse;
use super::state::AppState;
use super::ui::render;

/// Run the TUI application
#[instrument(skip_all, fields(library = %library_path.display()))]
pub fn run_tui(library_path: &Path, manifest: Option<&Path>) -> Result<()> {
    info!("starting TUI");

    let catalog = Catalog::load(library_path, manifest)?;
    info!(cards = catalog.cards.len(), "loaded catalog");

    let mut state = AppState::new(library_path.to_path_buf(), &catalog);
    if catalog.cards.is_empty() {
        state.status_message = Some("No images found".to_string());
    }

    // Setup terminal
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Main loop
    let result = run_app(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting TUI");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    loop {
        // Image protocol content (kitty/sixel) is destroyed by overlays and
        // ratatui's diff alone can't restore it.
        if state.force_redraw {
            state.force_redraw = false;
            terminal.clear()?;
        }

        terminal.draw(|frame| render(frame, state))?;

        if event::poll(Duration::from_secs(1))? && handle_event(event::read()?, state) == KeyAction::Quit {
            return Ok(());
        }

        // Drain all pending events to avoid lag during rapid navigation
        while event::poll(Duration::ZERO)? {
            if handle_event(event::read()?, state) == KeyAction::Quit {
                return Ok(());
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Continue,
}

fn handle_event(event: Event, state: &mut AppState) -> KeyAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key.code, state),
        Event::Mouse(mouse_event) => {
            mouse::handle_mouse(mouse_event, state);
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

/// Handle a key press. Returns KeyAction indicating what to do next.
fn handle_key(code: KeyCode, state: &mut AppState) -> KeyAction {
    // Lightbox is modal: only navigation and closing reach the gallery
    if state.lightbox_open() {
        let key = match code {
            KeyCode::Left | KeyCode::Char('h') => Key::ArrowLeft,
            KeyCode::Right | KeyCode::Char('l') => Key::ArrowRight,
            KeyCode::Esc | KeyCode::Char('q') => Key::Escape,
            KeyCode::Char(c) => Key::Other(c.to_string()),
            _ => return KeyAction::Continue,
        };
        state.dispatch(GalleryEvent::Key(key));
        return KeyAction::Continue;
    }

    // Help overlay eats all keys except ? and Esc which close it
    if state.show_help {
        if matches!(code, KeyCode::Char('?') | KeyCode::Esc) {
            state.toggle_help();
        }
        return KeyAction::Continue;
    }

    if state.search_active {
        match code {
            KeyCode::Enter | KeyCode::Esc => state.stop_search(),
            KeyCode::Backspace => state.search_pop_char(),
            KeyCode::Char(c) => state.search_push_char(c),
            _ => {}
        }
        return KeyAction::Continue;
    }

    // Clear status message on any key
    state.clear_status_message();

    match code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('h') | KeyCode::Left => state.move_left(),
        KeyCode::Char('l') | KeyCode::Right => state.move_right(),
        KeyCode::Char('k') | KeyCode::Up => state.move_up(),
        KeyCode::Char('j') | KeyCode::Down => state.move_down(),
        KeyCode::Enter => state.activate_selected(),
        KeyCode::Tab => state.next_filter(),
        KeyCode::BackTab => state.previous_filter(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            state.activate_filter_at(index);
        }
        KeyCode::Char('/') => state.start_search(),
        KeyCode::Backspace => state.clear_search(),
        KeyCode::Char('?') => state.toggle_help(),
        _ => {}
    }
    KeyAction::Continue
}
