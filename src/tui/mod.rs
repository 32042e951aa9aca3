mod app;
pub mod content;
mod help_text;
pub mod terminal_compat;
pub mod theme;
pub mod tty; // Public module for TTY handling
mod ui;

pub use app::{App, AppMode, Focus};
pub use content::{BrowserView, ContentPane};
pub use terminal_compat::{ColorMode, TerminalCapabilities};
pub use theme::{Theme, ThemeName};

use color_eyre::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::trace;

/// Run the TUI application.
///
/// Draws, waits up to 100ms for input, and feeds key presses through the
/// keybinding table until the user quits.
pub fn run(terminal: &mut DefaultTerminal, app: App) -> Result<()> {
    let mut app = app;

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        if !tty::poll_event(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = tty::read_event()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(&mut app, key);
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Route one key press: bound keys become actions, unbound printable keys
/// extend the search query while the search bar is open.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Any key dismisses the previous status message
    app.status_message = None;

    let mode = app.keybinding_mode();
    if let Some(action) = app.keybindings.dispatch(mode, key) {
        trace!(?action, "key dispatched");
        app.handle_action(action);
        return;
    }

    if app.mode == AppMode::Search
        && let KeyCode::Char(c) = key.code
        && !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        app.search_input(c);
    }
}
