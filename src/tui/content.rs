//! Content views that follow outline navigation.

use std::collections::HashMap;

use ratatui::widgets::ScrollbarState;
use tracing::debug;
use url::Url;

use crate::parser::Document;
use crate::tree::{ContentView, NavigationError};

/// The right-hand pane: the document flattened to lines, scrolled by anchor.
#[derive(Debug, Default)]
pub struct ContentPane {
    lines: Vec<String>,
    anchors: HashMap<String, usize>,
    /// Line index -> heading level, for styling heading lines
    heading_levels: HashMap<usize, usize>,
    pub scroll: u16,
    pub scroll_state: ScrollbarState,
    /// Rows available for text in the last frame
    pub viewport_height: u16,
    current_anchor: Option<String>,
}

impl ContentPane {
    pub fn new(document: &Document) -> Self {
        Self {
            lines: document.lines.clone(),
            anchors: document.anchor_lines(),
            heading_levels: document.heading_lines(),
            scroll: 0,
            scroll_state: ScrollbarState::new(document.lines.len()),
            viewport_height: 0,
            current_anchor: None,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn heading_level(&self, line: usize) -> Option<usize> {
        self.heading_levels.get(&line).copied()
    }

    pub fn current_anchor(&self) -> Option<&str> {
        self.current_anchor.as_deref()
    }

    /// Line the current anchor points at.
    pub fn anchor_line(&self) -> Option<usize> {
        self.current_anchor
            .as_ref()
            .and_then(|id| self.anchors.get(id).copied())
    }

    fn max_scroll(&self) -> u16 {
        let len = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        len.saturating_sub(1)
    }

    pub fn scroll_to(&mut self, line: u16) {
        self.scroll = line.min(self.max_scroll());
        self.scroll_state = self.scroll_state.position(self.scroll as usize);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_to(self.scroll.saturating_add(amount));
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_to(self.scroll.saturating_sub(amount));
    }

    pub fn page_size(&self) -> u16 {
        self.viewport_height.max(1)
    }
}

impl ContentView for ContentPane {
    fn set_fragment(&mut self, id: &str) -> Result<(), NavigationError> {
        let line = *self
            .anchors
            .get(id)
            .ok_or_else(|| NavigationError::TargetNotFound(id.to_string()))?;

        self.current_anchor = Some(id.to_string());
        self.scroll_to(u16::try_from(line).unwrap_or(u16::MAX));
        debug!(anchor = id, line, "content scrolled to anchor");
        Ok(())
    }
}

/// Points the system browser at `<base>#<id>`.
#[derive(Debug, Clone)]
pub struct BrowserView {
    base: Url,
}

impl BrowserView {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn fragment_url(&self, id: &str) -> Url {
        let mut url = self.base.clone();
        url.set_fragment(Some(id));
        url
    }
}

impl ContentView for BrowserView {
    fn set_fragment(&mut self, id: &str) -> Result<(), NavigationError> {
        let url = self.fragment_url(id);
        open::that(url.as_str())
            .map_err(|e| NavigationError::Unavailable(format!("cannot open {}: {}", url, e)))
    }
}
