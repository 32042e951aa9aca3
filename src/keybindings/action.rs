//! Action definitions for keybindings
//!
//! This module defines all bindable actions in headnav.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// All bindable actions in headnav
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum Action {
    // === Navigation ===
    /// Move to next visible heading
    Next,
    /// Move to previous visible heading
    Previous,
    /// Jump to first heading
    First,
    /// Jump to last visible heading
    Last,
    /// Scroll content down by page
    PageDown,
    /// Scroll content up by page
    PageUp,
    /// Jump to parent heading in outline
    JumpToParent,

    // === Outline ===
    /// Toggle the selected heading and navigate to its anchor
    Activate,
    /// Toggle focus between outline and content
    ToggleFocus,
    /// Toggle outline visibility
    ToggleOutline,
    /// Increase outline width
    OutlineWidthIncrease,
    /// Decrease outline width
    OutlineWidthDecrease,
    /// Show or hide `#` level markers
    ToggleLevels,

    // === Search ===
    /// Open the search bar
    EnterSearchMode,
    /// Close the search bar, keeping the filter
    ExitMode,
    /// Clear the query and restore the full tree
    ClearSearch,
    /// Delete last character in search
    SearchBackspace,

    // === Scroll (Content pane) ===
    /// Scroll content down one line
    ScrollDown,
    /// Scroll content up one line
    ScrollUp,

    // === Help ===
    /// Toggle help popup
    ToggleHelp,
    /// Scroll help popup down
    HelpScrollDown,
    /// Scroll help popup up
    HelpScrollUp,

    // === Application ===
    /// Quit the application
    Quit,
}

impl Action {
    /// Get a human-readable description of the action
    pub fn description(&self) -> &'static str {
        match self {
            Action::Next => "Move to next heading",
            Action::Previous => "Move to previous heading",
            Action::First => "Jump to first heading",
            Action::Last => "Jump to last heading",
            Action::PageDown => "Page content down",
            Action::PageUp => "Page content up",
            Action::JumpToParent => "Jump to parent heading",

            Action::Activate => "Expand/collapse and go to heading",
            Action::ToggleFocus => "Switch focus (outline/content)",
            Action::ToggleOutline => "Toggle outline visibility",
            Action::OutlineWidthIncrease => "Increase outline width",
            Action::OutlineWidthDecrease => "Decrease outline width",
            Action::ToggleLevels => "Toggle level markers",

            Action::EnterSearchMode => "Search/filter headings",
            Action::ExitMode => "Close search bar",
            Action::ClearSearch => "Clear search",
            Action::SearchBackspace => "Delete character",

            Action::ScrollDown => "Scroll down",
            Action::ScrollUp => "Scroll up",

            Action::ToggleHelp => "Toggle help",
            Action::HelpScrollDown => "Scroll help down",
            Action::HelpScrollUp => "Scroll help up",

            Action::Quit => "Quit",
        }
    }

    /// Get the category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::Next
            | Action::Previous
            | Action::First
            | Action::Last
            | Action::PageDown
            | Action::PageUp
            | Action::JumpToParent => "Navigation",

            Action::Activate
            | Action::ToggleFocus
            | Action::ToggleOutline
            | Action::OutlineWidthIncrease
            | Action::OutlineWidthDecrease
            | Action::ToggleLevels => "Outline",

            Action::EnterSearchMode
            | Action::ExitMode
            | Action::ClearSearch
            | Action::SearchBackspace => "Search",

            Action::ScrollDown | Action::ScrollUp => "Scroll",

            Action::ToggleHelp | Action::HelpScrollDown | Action::HelpScrollUp => "Help",

            Action::Quit => "Application",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_round_trip_through_strum() {
        for action in Action::iter() {
            let name = action.to_string();
            assert_eq!(name.parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_every_action_is_described() {
        for action in Action::iter() {
            assert!(!action.description().is_empty());
            assert!(!action.category().is_empty());
        }
    }
}
