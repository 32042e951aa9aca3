mod layout;
mod popups;
mod util;

use layout::{DynamicLayout, Section};

use crate::keybindings::Action;
use crate::tree::{RenderedNode, ViewOrigin};
use crate::tui::app::{App, AppMode, Focus};
use crate::tui::theme::Theme;
use popups::render_help_popup;
use ratatui::Frame;
use ratatui::layout::{Constraint, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation};
use unicode_width::UnicodeWidthStr;
use util::{position_percent, truncate_to_width};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let main_layout = DynamicLayout::vertical(area)
        .section(Section::Title, Constraint::Length(2))
        .section_if(app.mode == AppMode::Search, Section::Search, Constraint::Length(3))
        .section(Section::Body, Constraint::Min(0))
        .section(Section::Status, Constraint::Length(1))
        .build();

    render_title_bar(frame, app, main_layout.area(Section::Title));

    if let Some(search_area) = main_layout.get(Section::Search) {
        render_search_bar(frame, app, search_area);
    }

    let body = DynamicLayout::horizontal(main_layout.area(Section::Body))
        .section_if(
            app.show_outline,
            Section::Outline,
            Constraint::Percentage(app.outline_width),
        )
        .section(Section::Content, Constraint::Min(0))
        .build();

    if let Some(outline_area) = body.get(Section::Outline) {
        render_outline(frame, app, outline_area);
    }
    render_content(frame, app, body.area(Section::Content));

    render_status_bar(frame, app, main_layout.area(Section::Status));

    if app.mode == AppMode::Help {
        render_help_popup(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let heading_count = app.document.headings.len();
    let title_text = match &app.document.title {
        Some(doc_title) => format!(
            "headnav - {} ({}) - {} headings",
            doc_title, app.title, heading_count
        ),
        None => format!("headnav - {} - {} headings", app.title, heading_count),
    };

    let title = Paragraph::new(truncate_to_width(&title_text, area.width as usize))
        .style(
            Style::default()
                .fg(app.theme.title_bar_fg)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::raw("Search: "),
        Span::styled(
            format!("{}_", app.search_query),
            Style::default()
                .fg(theme.search_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  (Esc: close, Ctrl+U: clear)",
            Style::default().fg(theme.muted_fg),
        ),
    ]);

    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.search_fg))
                .title(" Filter Headings ")
                .style(Style::default().bg(theme.modal_bg())),
        )
        .style(Style::default().fg(theme.foreground));

    frame.render_widget(paragraph, area);
}

/// One outline row: indent, expand affordance, optional level marker, text.
fn outline_line(node: &RenderedNode, show_levels: bool, width: usize, theme: &Theme) -> Line<'static> {
    let indent = "  ".repeat(node.depth);
    let indicator = match (node.has_children, node.expanded) {
        (true, true) => "▼ ",
        (true, false) => "▶ ",
        (false, true) => "• ",
        (false, false) => "  ",
    };
    let marker = if show_levels {
        format!("{} ", "#".repeat(node.level))
    } else {
        String::new()
    };

    let prefix = format!("{}{}{}", indent, indicator, marker);
    let text = truncate_to_width(&node.text, width.saturating_sub(prefix.width()));

    let style = if node.highlighted {
        theme.anchor_style()
    } else {
        Style::default().fg(theme.heading_color(node.level))
    };
    Line::from(vec![
        Span::styled(prefix, Style::default().fg(theme.heading_color(node.level))),
        Span::styled(text, style),
    ])
}

fn render_outline(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(app.focus == Focus::Outline))
        .title(match app.rendered().origin() {
            ViewOrigin::Canonical => " Outline ",
            ViewOrigin::Filtered => " Outline (filtered) ",
        });

    if app.visible_len() == 0 {
        let message = if app.search_query.is_empty() {
            "No headings found"
        } else {
            "No headings match"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(theme.muted_fg))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Borders plus the highlight symbol
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .visible_nodes()
        .map(|node| ListItem::new(outline_line(node, app.show_levels, width, theme)))
        .collect();

    let list = List::new(items)
        .block(block)
        .style(theme.content_style())
        .highlight_style(theme.selection_style())
        .highlight_symbol("► ");

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(theme.scrollbar_fg));

    frame.render_stateful_widget(list, area, &mut app.outline_state);
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app.outline_scroll_state,
    );
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    app.content.viewport_height = area.height.saturating_sub(2);

    let theme = &app.theme;
    let anchor_line = app.content.anchor_line();
    let lines: Vec<Line> = app
        .content
        .lines()
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let style = if Some(index) == anchor_line {
                theme.anchor_style()
            } else if let Some(level) = app.content.heading_level(index) {
                Style::default()
                    .fg(theme.heading_color(level))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::styled(text.as_str(), style)
        })
        .collect();

    let title = match app.content.current_anchor() {
        Some(anchor) => format!(" Content #{} ", anchor),
        None => " Content ".to_string(),
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(app.focus == Focus::Content))
                .title(title),
        )
        .style(theme.content_style())
        .scroll((app.content.scroll, 0));
    frame.render_widget(paragraph, area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(theme.scrollbar_fg));
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app.content.scroll_state,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref msg) = app.status_message {
        let status = Paragraph::new(msg.clone()).style(
            app.theme
                .status_bar_style()
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status, area);
        return;
    }

    let focus_indicator = match app.focus {
        Focus::Outline => "Outline",
        Focus::Content => "Content",
    };

    let selected_idx = app.outline_state.selected().unwrap_or(0);
    let total = app.visible_len();

    let filter_status = if app.search_query.is_empty() {
        String::new()
    } else {
        format!(" • Filter:\"{}\"", app.search_query)
    };

    let outline_status = if app.show_outline {
        format!("Outline:{}%", app.outline_width)
    } else {
        "Outline:Hidden".to_string()
    };

    let hint = |action: Action, label: &str| {
        app.key_hint(action)
            .map(|key| format!(" • {}:{}", key, label))
            .unwrap_or_default()
    };

    let status_text = format!(
        " [{}] {}/{} ({}%){} • {}{}{}{} • Theme:{} ",
        focus_indicator,
        if total == 0 { 0 } else { selected_idx + 1 },
        total,
        position_percent(selected_idx, total),
        filter_status,
        outline_status,
        hint(Action::EnterSearchMode, "Search"),
        hint(Action::Activate, "Open"),
        hint(Action::ToggleHelp, "Help"),
        app.theme.name,
    );

    let status = Paragraph::new(status_text).style(app.theme.status_bar_style());
    frame.render_widget(status, area);
}
