//! Default keybindings for headnav
//!
//! This module defines the default keybindings that are used when no
//! user configuration is provided. Uses keybinds-rs key string syntax.

use super::{Action, KeybindingMode, Keybindings};

/// Create the default keybindings configuration
pub fn default_keybindings() -> Keybindings {
    let mut kb = Keybindings::empty();

    add_normal_mode(&mut kb);
    add_search_mode(&mut kb);
    add_help_mode(&mut kb);

    kb
}

/// Bind a key, panicking on invalid key syntax (only used for built-in defaults)
fn bind(kb: &mut Keybindings, mode: KeybindingMode, key: &str, action: Action) {
    kb.bind(mode, key, action)
        .unwrap_or_else(|e| panic!("Invalid default keybinding '{}': {}", key, e));
}

fn add_normal_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Normal;

    // Navigation
    bind(kb, Normal, "j", Next);
    bind(kb, Normal, "Down", Next);
    bind(kb, Normal, "k", Previous);
    bind(kb, Normal, "Up", Previous);
    bind(kb, Normal, "g", First);
    bind(kb, Normal, "Home", First);
    bind(kb, Normal, "G", Last);
    bind(kb, Normal, "End", Last);
    bind(kb, Normal, "d", PageDown);
    bind(kb, Normal, "PageDown", PageDown);
    bind(kb, Normal, "u", PageUp);
    bind(kb, Normal, "PageUp", PageUp);
    bind(kb, Normal, "p", JumpToParent);

    // Outline
    bind(kb, Normal, "Enter", Activate);
    bind(kb, Normal, "Space", Activate);
    bind(kb, Normal, "Tab", ToggleFocus);
    bind(kb, Normal, "w", ToggleOutline);
    bind(kb, Normal, "[", OutlineWidthDecrease);
    bind(kb, Normal, "]", OutlineWidthIncrease);
    bind(kb, Normal, "#", ToggleLevels);

    // Search
    bind(kb, Normal, "/", EnterSearchMode);
    bind(kb, Normal, "s", EnterSearchMode);
    bind(kb, Normal, "Ctrl+u", ClearSearch);

    // View
    bind(kb, Normal, "?", ToggleHelp);

    // Application
    bind(kb, Normal, "q", Quit);
    bind(kb, Normal, "Escape", Quit);
    bind(kb, Normal, "Ctrl+c", Quit);
}

fn add_search_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Search;

    // Close the bar; the filter stays applied
    bind(kb, Search, "Escape", ExitMode);
    bind(kb, Search, "Enter", ExitMode);

    // Editing
    bind(kb, Search, "Backspace", SearchBackspace);
    bind(kb, Search, "Ctrl+u", ClearSearch);

    // Move through results while typing
    bind(kb, Search, "Down", Next);
    bind(kb, Search, "Up", Previous);

    bind(kb, Search, "Ctrl+c", Quit);
}

fn add_help_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Help;

    // Navigation
    bind(kb, Help, "j", HelpScrollDown);
    bind(kb, Help, "Down", HelpScrollDown);
    bind(kb, Help, "k", HelpScrollUp);
    bind(kb, Help, "Up", HelpScrollUp);

    // Close help
    bind(kb, Help, "?", ToggleHelp);
    bind(kb, Help, "Escape", ToggleHelp);

    // Quit
    bind(kb, Help, "q", Quit);
}
