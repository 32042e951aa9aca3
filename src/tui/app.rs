use crate::config::Config;
use crate::keybindings::{Action, KeybindingMode, Keybindings};
use crate::parser::Document;
use crate::tree::{
    Activation, ContentView, HighlightState, NavigationError, RenderedNode, RenderedTree,
    TreeModel, ViewOrigin, activate, build_tree, count_matches, filter_tree, render,
};
use crate::tui::content::{BrowserView, ContentPane};
use crate::tui::help_text;
use crate::tui::terminal_compat::ColorMode;
use crate::tui::theme::Theme;
use indextree::NodeId;
use ratatui::widgets::{ListState, ScrollbarState};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Outline,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Search,
    Help,
}

impl AppMode {
    fn keybinding_mode(self) -> KeybindingMode {
        match self {
            AppMode::Normal => KeybindingMode::Normal,
            AppMode::Search => KeybindingMode::Search,
            AppMode::Help => KeybindingMode::Help,
        }
    }
}

/// Interactive state: the canonical tree, the current visual projection and
/// the single highlight, plus the panes they drive.
pub struct App {
    pub document: Document,
    pub title: String,
    model: TreeModel,
    rendered: RenderedTree,
    /// Rows of `rendered` currently on screen, in order
    visible: Vec<usize>,
    highlight: HighlightState,
    pub content: ContentPane,
    browser: Option<BrowserView>,
    pub outline_state: ListState,
    pub outline_scroll_state: ScrollbarState,
    pub focus: Focus,
    pub mode: AppMode,
    pub search_query: String,
    pub help_scroll: u16,
    pub show_outline: bool,
    pub outline_width: u16, // Percentage: 20, 30, or 40
    pub show_levels: bool,
    pub theme: Theme,
    pub keybindings: Keybindings,
    pub status_message: Option<String>,
    config: Config,
    should_quit: bool,
}

impl App {
    pub fn new(
        document: Document,
        title: String,
        config: Config,
        color_mode: ColorMode,
        browser: Option<BrowserView>,
    ) -> Self {
        let model = build_tree(&document.records());
        info!(nodes = model.len(), roots = model.roots().len(), "heading tree ready");

        let highlight = HighlightState::default();
        let rendered = render(&model.forest(), false, ViewOrigin::Canonical, &highlight);
        let content = ContentPane::new(&document);
        let theme = Theme::from_name(config.theme_name()).with_color_mode(color_mode);

        let mut app = Self {
            document,
            title,
            model,
            rendered,
            visible: Vec::new(),
            highlight,
            content,
            browser,
            outline_state: ListState::default(),
            outline_scroll_state: ScrollbarState::default(),
            focus: Focus::Outline,
            mode: AppMode::Normal,
            search_query: String::new(),
            help_scroll: 0,
            show_outline: true,
            outline_width: config.ui.outline_width,
            show_levels: config.ui.show_levels,
            theme,
            keybindings: config.keybindings(),
            status_message: None,
            config,
            should_quit: false,
        };
        app.refresh_visible(None);
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn model(&self) -> &TreeModel {
        &self.model
    }

    pub fn rendered(&self) -> &RenderedTree {
        &self.rendered
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    /// Rendered rows currently on screen, in display order.
    pub fn visible_nodes(&self) -> impl Iterator<Item = &RenderedNode> {
        self.visible.iter().filter_map(|&row| self.rendered.get(row))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    fn selected_row(&self) -> Option<usize> {
        self.outline_state
            .selected()
            .and_then(|i| self.visible.get(i).copied())
    }

    pub fn selected_node(&self) -> Option<&RenderedNode> {
        self.selected_row().and_then(|row| self.rendered.get(row))
    }

    fn select(&mut self, position: usize) {
        self.outline_state.select(Some(position));
        self.outline_scroll_state = self.outline_scroll_state.position(position);
    }

    /// Recompute the visible rows and keep the selection on `keep` if it is
    /// still on screen.
    fn refresh_visible(&mut self, keep: Option<NodeId>) {
        let previous = self.outline_state.selected();
        self.visible = self.rendered.visible_rows();
        self.outline_scroll_state = ScrollbarState::new(self.visible.len());

        if self.visible.is_empty() {
            self.outline_state.select(None);
            return;
        }

        let restored = keep.and_then(|key| {
            self.visible
                .iter()
                .position(|&row| self.rendered.get(row).is_some_and(|n| n.key == key))
        });
        let position =
            restored.unwrap_or_else(|| previous.unwrap_or(0).min(self.visible.len() - 1));
        self.select(position);
    }

    /// Rebuild the visual tree from the current query.
    ///
    /// A non-empty query renders a fresh filter result; an empty one resets to
    /// the canonical tree with the user's expand/collapse state.
    pub fn apply_filter(&mut self) {
        let keep = self.selected_node().map(|n| n.key);

        self.rendered = match filter_tree(&self.model, &self.search_query) {
            Some(forest) => {
                info!(
                    query = %self.search_query,
                    matches = count_matches(&forest, &self.search_query),
                    "filter applied"
                );
                render(&forest, false, ViewOrigin::Filtered, &self.highlight)
            }
            None => {
                debug!("filter cleared");
                render(
                    &self.model.forest(),
                    true,
                    ViewOrigin::Canonical,
                    &self.highlight,
                )
            }
        };
        self.refresh_visible(keep);
    }

    pub fn enter_search(&mut self) {
        self.mode = AppMode::Search;
        self.focus = Focus::Outline;
        self.show_outline = true;
        self.keybindings.reset_sequences();
    }

    /// Close the search bar; the current filter stays applied.
    pub fn exit_search(&mut self) {
        self.mode = AppMode::Normal;
        self.keybindings.reset_sequences();
    }

    /// Append `c` to the query and re-filter. Control characters are ignored.
    pub fn search_input(&mut self, c: char) {
        if c.is_control() {
            return;
        }

        self.search_query.push(c);
        self.apply_filter();
    }

    pub fn search_backspace(&mut self) {
        if self.search_query.pop().is_some() {
            self.apply_filter();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.search_query.is_empty() {
            self.search_query.clear();
            self.apply_filter();
        }
    }

    /// Toggle, navigate and highlight the selected heading.
    pub fn activate_selected(&mut self) -> Option<Activation> {
        let row = self.selected_row()?;
        let key = self.rendered.get(row).map(|n| n.key);

        let view: &mut dyn ContentView = match self.browser.as_mut() {
            Some(browser) => browser,
            None => &mut self.content,
        };
        let outcome = activate(
            &mut self.rendered,
            row,
            &mut self.model,
            &mut self.highlight,
            Some(view),
        )?;

        if let Some(id) = &outcome.navigated
            && self.browser.is_some()
            && let Err(e) = self.content.set_fragment(id)
        {
            debug!(anchor = %id, error = %e, "content pane did not follow");
        }

        self.status_message = outcome.navigation_error.as_ref().map(|e| match e {
            NavigationError::TargetNotFound(id) => format!("✗ No anchor #{} in content", id),
            NavigationError::Unavailable(reason) => format!("✗ {}", reason),
        });

        self.refresh_visible(key);
        Some(outcome)
    }

    pub fn next(&mut self) {
        if self.focus == Focus::Outline {
            if let Some(i) = self.outline_state.selected() {
                let last = self.visible.len().saturating_sub(1);
                self.select((i + 1).min(last));
            } else if !self.visible.is_empty() {
                self.select(0);
            }
        } else {
            self.content.scroll_down(1);
        }
    }

    pub fn previous(&mut self) {
        if self.focus == Focus::Outline {
            if let Some(i) = self.outline_state.selected() {
                self.select(i.saturating_sub(1));
            }
        } else {
            self.content.scroll_up(1);
        }
    }

    pub fn first(&mut self) {
        if self.focus == Focus::Outline {
            if !self.visible.is_empty() {
                self.select(0);
            }
        } else {
            self.content.scroll_to(0);
        }
    }

    pub fn last(&mut self) {
        if self.focus == Focus::Outline {
            if !self.visible.is_empty() {
                self.select(self.visible.len() - 1);
            }
        } else {
            self.content.scroll_to(u16::MAX);
        }
    }

    pub fn jump_to_parent(&mut self) {
        if self.focus != Focus::Outline {
            return;
        }
        let Some(parent) = self
            .selected_row()
            .and_then(|row| self.rendered.get(row))
            .and_then(|node| node.parent)
        else {
            return;
        };
        // A parent of a visible row is always visible
        if let Some(position) = self.visible.iter().position(|&row| row == parent) {
            self.select(position);
        }
    }

    pub fn scroll_page_down(&mut self) {
        let page = self.content.page_size();
        self.content.scroll_down(page);
    }

    pub fn scroll_page_up(&mut self) {
        let page = self.content.page_size();
        self.content.scroll_up(page);
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Help => AppMode::Normal,
            _ => {
                self.help_scroll = 0; // Reset scroll when opening help
                AppMode::Help
            }
        };
        self.keybindings.reset_sequences();
    }

    pub fn scroll_help_down(&mut self) {
        let new_scroll = self.help_scroll.saturating_add(1);
        let max_scroll = help_text::help_lines(&self.keybindings).len() as u16;
        if new_scroll < max_scroll {
            self.help_scroll = new_scroll;
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn toggle_focus(&mut self) {
        if self.show_outline {
            self.focus = match self.focus {
                Focus::Outline => Focus::Content,
                Focus::Content => Focus::Outline,
            };
        }
    }

    pub fn toggle_outline(&mut self) {
        self.show_outline = !self.show_outline;
        self.focus = if self.show_outline {
            Focus::Outline
        } else {
            Focus::Content
        };
    }

    pub fn toggle_levels(&mut self) {
        self.show_levels = !self.show_levels;
    }

    pub fn cycle_outline_width(&mut self, increase: bool) {
        self.outline_width = next_outline_width(self.outline_width, increase);

        if let Err(e) = self.config.set_outline_width(self.outline_width) {
            warn!(error = %e, "could not save outline width");
        }
    }

    /// Perform a bound action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Next => self.next(),
            Action::Previous => self.previous(),
            Action::First => self.first(),
            Action::Last => self.last(),
            Action::PageDown => self.scroll_page_down(),
            Action::PageUp => self.scroll_page_up(),
            Action::JumpToParent => self.jump_to_parent(),
            Action::Activate => {
                self.activate_selected();
            }
            Action::ToggleFocus => self.toggle_focus(),
            Action::ToggleOutline => self.toggle_outline(),
            Action::OutlineWidthIncrease => self.cycle_outline_width(true),
            Action::OutlineWidthDecrease => self.cycle_outline_width(false),
            Action::ToggleLevels => self.toggle_levels(),
            Action::EnterSearchMode => self.enter_search(),
            Action::ExitMode => self.exit_search(),
            Action::ClearSearch => self.clear_search(),
            Action::SearchBackspace => self.search_backspace(),
            Action::ScrollDown => self.content.scroll_down(1),
            Action::ScrollUp => self.content.scroll_up(1),
            Action::ToggleHelp => self.toggle_help(),
            Action::HelpScrollDown => self.scroll_help_down(),
            Action::HelpScrollUp => self.scroll_help_up(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Keybinding mode for the current app mode.
    pub fn keybinding_mode(&self) -> KeybindingMode {
        self.mode.keybinding_mode()
    }

    /// First key bound to `action` in normal mode, for status bar hints.
    pub fn key_hint(&self, action: Action) -> Option<String> {
        self.keybindings
            .keys_for_action(KeybindingMode::Normal, action)
            .into_iter()
            .next()
    }
}

fn next_outline_width(current: u16, increase: bool) -> u16 {
    if increase {
        match current {
            20 => 30,
            _ => 40,
        }
    } else {
        match current {
            40 => 30,
            _ => 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_html;

    const HTML: &str = "\
        <h1>Guide</h1><p>intro</p>\
        <h2>Install</h2><h3>From source</h3>\
        <h2>Usage</h2><h3>Flags</h3><h4>Verbose</h4>\
        <h1>Changelog</h1>";

    fn app() -> App {
        App::new(
            parse_html(HTML),
            "guide.html".to_string(),
            Config::default(),
            ColorMode::Rgb,
            None,
        )
    }

    fn visible_texts(app: &App) -> Vec<String> {
        app.visible_nodes().map(|n| n.text.clone()).collect()
    }

    fn select_text(app: &mut App, text: &str) {
        let position = app
            .visible_nodes()
            .position(|n| n.text == text)
            .unwrap();
        app.select(position);
    }

    #[test]
    fn test_starts_collapsed_with_first_row_selected() {
        let app = app();
        assert_eq!(visible_texts(&app), vec!["Guide", "Changelog"]);
        assert_eq!(app.outline_state.selected(), Some(0));
    }

    #[test]
    fn test_activate_expands_and_navigates_content() {
        let mut app = app();
        let outcome = app.activate_selected().unwrap();

        assert!(outcome.expanded && outcome.persisted);
        assert_eq!(visible_texts(&app), vec!["Guide", "Install", "Usage", "Changelog"]);
        assert_eq!(app.content.current_anchor(), Some("header-1-1"));
        assert_eq!(app.highlight().current(), Some("header-1-1"));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_search_filters_and_keeps_ancestors() {
        let mut app = app();
        app.enter_search();
        for c in "verb".chars() {
            app.search_input(c);
        }

        assert_eq!(app.rendered().origin(), ViewOrigin::Filtered);
        assert_eq!(visible_texts(&app), vec!["Guide", "Usage", "Flags", "Verbose"]);
    }

    #[test]
    fn test_empty_query_restores_user_state() {
        let mut app = app();
        app.activate_selected(); // expand Guide
        select_text(&mut app, "Usage");
        app.activate_selected(); // expand Usage

        app.enter_search();
        app.search_input('x');
        app.search_input('y');
        assert!(app.visible_nodes().next().is_none());

        app.clear_search();
        assert_eq!(app.rendered().origin(), ViewOrigin::Canonical);
        assert_eq!(
            visible_texts(&app),
            vec!["Guide", "Install", "Usage", "Flags", "Changelog"]
        );
    }

    #[test]
    fn test_toggle_in_filtered_view_is_not_persisted() {
        let mut app = app();
        app.enter_search();
        app.search_input('f');
        select_text(&mut app, "Usage");

        let outcome = app.activate_selected().unwrap();
        assert!(!outcome.persisted);
        assert!(!visible_texts(&app).contains(&"Flags".to_string()));

        app.search_backspace();
        // Usage was never expanded on the canonical tree
        assert_eq!(visible_texts(&app), vec!["Guide", "Changelog"]);
    }

    #[test]
    fn test_highlight_survives_filtering() {
        let mut app = app();
        app.activate_selected();
        select_text(&mut app, "Install");
        app.activate_selected();

        app.enter_search();
        app.search_input('s');
        let highlighted: Vec<_> = app
            .rendered()
            .nodes()
            .iter()
            .filter(|n| n.highlighted)
            .map(|n| n.text.clone())
            .collect();
        assert_eq!(highlighted, vec!["Install"]);
    }

    #[test]
    fn test_selection_follows_node_across_filter() {
        let mut app = app();
        app.activate_selected();
        select_text(&mut app, "Usage");

        app.enter_search();
        app.search_input('u');
        assert_eq!(app.selected_node().unwrap().text, "Usage");
    }

    #[test]
    fn test_jump_to_parent() {
        let mut app = app();
        app.activate_selected();
        select_text(&mut app, "Usage");
        app.activate_selected();
        select_text(&mut app, "Flags");

        app.jump_to_parent();
        assert_eq!(app.selected_node().unwrap().text, "Usage");
        app.jump_to_parent();
        assert_eq!(app.selected_node().unwrap().text, "Guide");
    }

    #[test]
    fn test_navigation_bounds() {
        let mut app = app();
        app.previous();
        assert_eq!(app.outline_state.selected(), Some(0));
        app.last();
        app.next();
        assert_eq!(app.selected_node().unwrap().text, "Changelog");
    }

    #[test]
    fn test_search_input_rejects_control_chars() {
        let mut app = app();
        app.search_input('\n');
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn test_long_query_is_kept_whole() {
        let mut app = app();
        for _ in 0..300 {
            app.search_input('x');
        }
        assert_eq!(app.search_query.len(), 300);

        app.search_backspace();
        assert_eq!(app.search_query.len(), 299);
        assert_eq!(app.visible_len(), 0);
    }

    #[test]
    fn test_modes_and_quit() {
        let mut app = app();
        app.handle_action(Action::EnterSearchMode);
        assert_eq!(app.keybinding_mode(), KeybindingMode::Search);
        app.handle_action(Action::ExitMode);
        assert_eq!(app.mode, AppMode::Normal);

        app.handle_action(Action::ToggleHelp);
        assert_eq!(app.mode, AppMode::Help);
        app.handle_action(Action::ToggleHelp);
        assert_eq!(app.mode, AppMode::Normal);

        assert!(!app.should_quit());
        app.handle_action(Action::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_empty_document() {
        let mut app = App::new(
            Document::default(),
            "empty".to_string(),
            Config::default(),
            ColorMode::Indexed256,
            None,
        );
        assert_eq!(app.visible_len(), 0);
        assert!(app.activate_selected().is_none());
        app.next();
        assert_eq!(app.outline_state.selected(), None);
    }

    #[test]
    fn test_outline_width_steps() {
        assert_eq!(next_outline_width(20, true), 30);
        assert_eq!(next_outline_width(30, true), 40);
        assert_eq!(next_outline_width(40, true), 40);
        assert_eq!(next_outline_width(40, false), 30);
        assert_eq!(next_outline_width(20, false), 20);
    }

    #[test]
    fn test_key_hint() {
        let app = app();
        assert_eq!(app.key_hint(Action::ToggleHelp).as_deref(), Some("?"));
    }
}
