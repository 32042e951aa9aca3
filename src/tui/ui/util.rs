//! Utility functions for UI rendering
//!
//! Pure functions for layout calculations and text fitting.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Calculate a centered rectangular area within a parent area.
///
/// Returns a `Rect` that is centered both horizontally and vertically,
/// sized as a percentage of the parent area.
pub fn centered_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// A centered popup that never shrinks below `min_width` x `min_height`
/// (bounded by the parent area).
pub fn popup_area(
    area: Rect,
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
) -> Rect {
    let popup = centered_area(area, percent_x, percent_y);
    let width = popup.width.max(min_width).min(area.width);
    let height = popup.height.max(min_height).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Truncate `text` to at most `max_width` display columns, marking the cut
/// with an ellipsis. Wide characters are never split.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Percentage position of `index` within `total` items, for the status bar.
pub fn position_percent(index: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (index + 1) * 100 / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_area_respects_minimum() {
        let area = Rect::new(0, 0, 50, 20);
        let popup = popup_area(area, 10, 10, 40, 10);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.x, 5);
        assert_eq!(popup.y, 5);
    }

    #[test]
    fn test_popup_area_bounded_by_parent() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = popup_area(area, 70, 80, 40, 10);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Installation", 20), "Installation");
        assert_eq!(truncate_to_width("Installation", 6), "Insta…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK character is two columns wide
        let truncated = truncate_to_width("設定ガイド", 5);
        assert_eq!(truncated, "設定…");
        assert!(truncated.width() <= 5);
    }

    #[test]
    fn test_position_percent() {
        assert_eq!(position_percent(0, 0), 0);
        assert_eq!(position_percent(0, 4), 25);
        assert_eq!(position_percent(3, 4), 100);
    }
}
