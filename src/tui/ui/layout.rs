//! Dynamic layout builder for flexible UI composition
//!
//! Provides a builder pattern for creating layouts that can show/hide sections
//! dynamically based on application state.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::collections::HashMap;

/// Section identifiers for layout areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Title,
    Search,
    Body,
    Status,
    Outline,
    Content,
}

/// A dynamic layout that maps section IDs to their rendered areas
pub struct DynamicLayout {
    areas: HashMap<Section, Rect>,
}

impl DynamicLayout {
    /// Start building a vertical layout
    pub fn vertical(area: Rect) -> DynamicLayoutBuilder {
        DynamicLayoutBuilder::new(area, Direction::Vertical)
    }

    /// Start building a horizontal layout
    pub fn horizontal(area: Rect) -> DynamicLayoutBuilder {
        DynamicLayoutBuilder::new(area, Direction::Horizontal)
    }

    /// Get the area for a section by ID
    pub fn get(&self, id: Section) -> Option<Rect> {
        self.areas.get(&id).copied()
    }

    /// Area of an always-visible section; an unknown section gets an empty rect
    pub fn area(&self, id: Section) -> Rect {
        self.get(id).unwrap_or_default()
    }
}

/// Builder for creating dynamic layouts
pub struct DynamicLayoutBuilder {
    area: Rect,
    direction: Direction,
    sections: Vec<LayoutSection>,
}

struct LayoutSection {
    id: Section,
    constraint: Constraint,
    visible: bool,
}

impl DynamicLayoutBuilder {
    fn new(area: Rect, direction: Direction) -> Self {
        Self {
            area,
            direction,
            sections: Vec::new(),
        }
    }

    /// Add a section that is always visible
    pub fn section(self, id: Section, constraint: Constraint) -> Self {
        self.section_if(true, id, constraint)
    }

    /// Add a section that is conditionally visible
    pub fn section_if(mut self, visible: bool, id: Section, constraint: Constraint) -> Self {
        self.sections.push(LayoutSection {
            id,
            constraint,
            visible,
        });
        self
    }

    /// Build the final layout
    pub fn build(self) -> DynamicLayout {
        let visible: Vec<&LayoutSection> = self.sections.iter().filter(|s| s.visible).collect();

        let chunks = Layout::default()
            .direction(self.direction)
            .constraints(visible.iter().map(|s| s.constraint))
            .split(self.area);

        let areas = visible
            .iter()
            .zip(chunks.iter())
            .map(|(section, rect)| (section.id, *rect))
            .collect();

        DynamicLayout { areas }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections_visible() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = DynamicLayout::vertical(area)
            .section(Section::Title, Constraint::Length(2))
            .section(Section::Body, Constraint::Min(0))
            .section(Section::Status, Constraint::Length(1))
            .build();

        assert_eq!(layout.area(Section::Title).height, 2);
        assert_eq!(layout.area(Section::Body).height, 47);
        assert_eq!(layout.area(Section::Status).y, 49);
    }

    #[test]
    fn test_conditional_section_hidden() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = DynamicLayout::vertical(area)
            .section(Section::Title, Constraint::Length(2))
            .section_if(false, Section::Search, Constraint::Length(3))
            .section(Section::Body, Constraint::Min(0))
            .build();

        assert!(layout.get(Section::Search).is_none());
        assert_eq!(layout.area(Section::Search), Rect::default());
        assert_eq!(layout.area(Section::Body).y, 2);
    }

    #[test]
    fn test_conditional_section_visible() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = DynamicLayout::vertical(area)
            .section(Section::Title, Constraint::Length(2))
            .section_if(true, Section::Search, Constraint::Length(3))
            .section(Section::Body, Constraint::Min(0))
            .build();

        assert_eq!(layout.area(Section::Search).height, 3);
        assert_eq!(layout.area(Section::Body).y, 5);
    }

    #[test]
    fn test_horizontal_split_without_outline() {
        let area = Rect::new(0, 0, 100, 20);
        let layout = DynamicLayout::horizontal(area)
            .section_if(false, Section::Outline, Constraint::Percentage(30))
            .section(Section::Content, Constraint::Min(0))
            .build();

        assert!(layout.get(Section::Outline).is_none());
        assert_eq!(layout.area(Section::Content).width, 100);
    }

    #[test]
    fn test_horizontal_split_with_outline() {
        let area = Rect::new(0, 0, 100, 20);
        let layout = DynamicLayout::horizontal(area)
            .section_if(true, Section::Outline, Constraint::Percentage(30))
            .section(Section::Content, Constraint::Min(0))
            .build();

        assert_eq!(layout.area(Section::Outline).width, 30);
        assert_eq!(layout.area(Section::Content).x, 30);
    }
}
