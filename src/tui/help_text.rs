use crate::keybindings::{KeybindingMode, Keybindings};
use crate::tui::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Key column width for keybindings
const KEY_COLUMN_WIDTH: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpLine {
    Title(&'static str),
    Description(&'static str),
    SectionHeader(String),
    KeyBinding { key: String, desc: &'static str },
    Note(&'static str),
    Blank,
}

impl HelpLine {
    /// Convert this help line to a styled ratatui Line
    pub fn to_line(&self, theme: &Theme) -> Line<'static> {
        match self {
            HelpLine::Title(text) => Line::from(vec![Span::styled(
                text.to_string(),
                Style::default()
                    .fg(theme.modal_title())
                    .add_modifier(Modifier::BOLD),
            )]),
            HelpLine::Description(text) => Line::from(vec![Span::styled(
                text.to_string(),
                Style::default()
                    .fg(theme.modal_description())
                    .add_modifier(Modifier::ITALIC),
            )]),
            HelpLine::SectionHeader(text) => Line::from(vec![Span::styled(
                text.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            HelpLine::KeyBinding { key, desc } => {
                let formatted_key = format!("  {:<width$}", key, width = KEY_COLUMN_WIDTH);
                Line::from(vec![
                    Span::styled(formatted_key, Style::default().fg(theme.modal_key_fg())),
                    Span::raw(desc.to_string()),
                ])
            }
            HelpLine::Note(text) => Line::from(vec![
                Span::styled(
                    "Note: ".to_string(),
                    Style::default()
                        .fg(theme.modal_key_fg())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    text.to_string(),
                    Style::default().fg(theme.modal_description()),
                ),
            ]),
            HelpLine::Blank => Line::from(""),
        }
    }
}

const FOOTER: &str = "Use j/k or ↓/↑ to scroll | Press Esc or ? to close";

/// Help content generated from the active keybindings, so user overrides
/// show up as bound.
pub fn help_lines(keybindings: &Keybindings) -> Vec<HelpLine> {
    let mut lines = vec![
        HelpLine::Title("headnav - Keyboard Shortcuts"),
        HelpLine::Description(FOOTER),
        HelpLine::Blank,
    ];

    // Normal mode grouped by category, other modes as one section each
    let mut category = None;
    for (action, keys) in keybindings.help_entries(KeybindingMode::Normal) {
        if category != Some(action.category()) {
            if category.is_some() {
                lines.push(HelpLine::Blank);
            }
            category = Some(action.category());
            lines.push(HelpLine::SectionHeader(action.category().to_string()));
        }
        lines.push(HelpLine::KeyBinding {
            key: keys.join("/"),
            desc: action.description(),
        });
    }

    for mode in [KeybindingMode::Search, KeybindingMode::Help] {
        lines.push(HelpLine::Blank);
        lines.push(HelpLine::SectionHeader(format!(
            "{} Mode",
            mode.display_name()
        )));
        for (action, keys) in keybindings.help_entries(mode) {
            lines.push(HelpLine::KeyBinding {
                key: keys.join("/"),
                desc: action.description(),
            });
        }
    }

    lines.extend([
        HelpLine::Blank,
        HelpLine::Note("Typing in search mode filters the outline as you type"),
        HelpLine::Note("Filtered views open every match; expand/collapse there is not kept"),
        HelpLine::Blank,
        HelpLine::Description(FOOTER),
    ]);
    lines
}

/// Build the help text with theme colors applied
pub fn build_help_text(theme: &Theme, keybindings: &Keybindings) -> Vec<Line<'static>> {
    help_lines(keybindings)
        .iter()
        .map(|line| line.to_line(theme))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_default_bindings() {
        let lines = help_lines(&Keybindings::default());

        assert_eq!(lines[0], HelpLine::Title("headnav - Keyboard Shortcuts"));
        assert!(lines.contains(&HelpLine::SectionHeader("Navigation".to_string())));
        assert!(lines.contains(&HelpLine::SectionHeader("Search Mode".to_string())));
        assert!(lines.iter().any(|line| matches!(
            line,
            HelpLine::KeyBinding { desc, .. } if *desc == "Expand/collapse and go to heading"
        )));
    }

    #[test]
    fn test_built_text_matches_line_count() {
        let keybindings = Keybindings::default();
        let text = build_help_text(&Theme::default(), &keybindings);
        assert_eq!(text.len(), help_lines(&keybindings).len());
    }
}
