//! HTML parsing and heading extraction.
//!
//! This module turns an HTML document into the two things the navigator
//! needs: the ordered list of headings (`h1`..`h7`) and a plain-text rendition
//! of the body, with each heading mapped to the line it starts on.
//!
//! Parsing is delegated to `scraper` (html5ever), so malformed markup is
//! recovered the same way a browser would.

mod document;
pub mod utils;

pub use document::{Document, Heading, HeadingError, HeadingRecord, MAX_HEADING_LEVEL};

use scraper::{ElementRef, Html, Node, Selector};
use std::path::Path;
use std::sync::OnceLock;

/// Parse an HTML file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path) -> std::io::Result<Document> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_html(&content))
}

/// Parse HTML content and extract headings plus the flattened body text.
///
/// Only heading tag names and heading text are significant for the tree;
/// attributes and surrounding structure are ignored.
pub fn parse_html(html: &str) -> Document {
    let page = Html::parse_document(html);

    let title = page
        .select(title_selector())
        .next()
        .map(|t| utils::normalize_whitespace(&t.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let mut collector = TextCollector::default();
    collector.walk(page.root_element());
    collector.break_line();

    Document::new(title, collector.lines, collector.headings)
}

fn title_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("title").unwrap())
}

/// Text of `element` minus any nested heading or skipped element.
fn own_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let tag = child_element.value().name();
            if utils::heading_level(tag).is_none() && !utils::is_skipped(tag) {
                own_text(child_element, out);
            }
        } else if let Node::Text(text) = child.value() {
            out.push_str(text);
        }
    }
}

/// Accumulates body text line by line while walking the element tree.
#[derive(Default)]
struct TextCollector {
    lines: Vec<String>,
    current: String,
    pending_space: bool,
    headings: Vec<Heading>,
}

impl TextCollector {
    fn walk(&mut self, element: ElementRef<'_>) {
        let tag = element.value().name();

        if utils::is_skipped(tag) {
            return;
        }

        if let Some(level) = utils::heading_level(tag) {
            self.visit_heading(level, element);
            return;
        }

        if tag == "pre" {
            let mut buffer = String::new();
            self.walk_preformatted(element, &mut buffer);
            self.push_preformatted(&buffer);
            return;
        }

        let block = utils::is_block(tag);
        if block {
            self.break_line();
        }

        for child in element.children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                self.walk(child_element);
            } else if let Node::Text(text) = child.value() {
                self.push_text(text);
            }
        }

        if block {
            self.break_line();
        }
    }

    fn push_text(&mut self, text: &str) {
        let mut words = text.split_whitespace().peekable();
        if words.peek().is_none() {
            // Whitespace-only text still separates inline neighbours
            if !text.is_empty() {
                self.pending_space = true;
            }
            return;
        }

        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        for word in words {
            if self.pending_space && !self.current.is_empty() {
                self.current.push(' ');
            }
            self.current.push_str(word);
            self.pending_space = true;
        }
        self.pending_space = text.ends_with(char::is_whitespace);
    }

    /// Push a heading, then any headings the parser nested inside it (html5ever
    /// keeps e.g. an `h2` inside the non-standard `h7`). Nested headings do not
    /// contribute to the outer heading's text.
    fn visit_heading(&mut self, level: usize, element: ElementRef<'_>) {
        let mut text = String::new();
        own_text(element, &mut text);
        self.push_heading(level, &text);
        self.visit_nested_headings(element);
    }

    fn visit_nested_headings(&mut self, element: ElementRef<'_>) {
        for child in element.children().filter_map(ElementRef::wrap) {
            let tag = child.value().name();
            if let Some(level) = utils::heading_level(tag) {
                self.visit_heading(level, child);
            } else if !utils::is_skipped(tag) {
                self.visit_nested_headings(child);
            }
        }
    }

    /// Gather `pre` text verbatim; a heading inside it ends the text so far
    /// and becomes a heading line of its own.
    fn walk_preformatted(&mut self, element: ElementRef<'_>, buffer: &mut String) {
        for child in element.children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                let tag = child_element.value().name();
                if let Some(level) = utils::heading_level(tag) {
                    self.push_preformatted(buffer);
                    buffer.clear();
                    self.visit_heading(level, child_element);
                } else if !utils::is_skipped(tag) {
                    self.walk_preformatted(child_element, buffer);
                }
            } else if let Node::Text(text) = child.value() {
                buffer.push_str(text);
            }
        }
    }

    fn push_heading(&mut self, level: usize, raw_text: &str) {
        self.break_line();
        let text = utils::normalize_whitespace(raw_text);
        self.headings.push(Heading {
            level,
            text: text.clone(),
            line: self.lines.len(),
        });
        // Pushed even when empty so the anchor still has a line to land on
        self.lines.push(text);
    }

    fn push_preformatted(&mut self, raw_text: &str) {
        self.break_line();
        for line in raw_text.trim_matches('\n').lines() {
            self.lines.push(line.trim_end().to_string());
        }
    }

    fn break_line(&mut self) {
        let line = self.current.trim_end();
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
        self.current.clear();
        self.pending_space = false;
    }
}
