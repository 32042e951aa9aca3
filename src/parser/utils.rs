//! Utility functions for HTML heading extraction.
//!
//! Shared helper functions used across the parser module.

use crate::parser::MAX_HEADING_LEVEL;

/// Elements whose text never reaches the content view.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "head", "iframe",
];

/// Elements that start and end a line of content.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "br",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "section",
    "summary",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// Collapse every run of whitespace into a single space and trim the ends.
///
/// # Examples
///
/// ```
/// # use headnav::parser::utils::normalize_whitespace;
/// assert_eq!(normalize_whitespace("  Getting\n   started "), "Getting started");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the level out of a heading tag name (`h1`..`h7`).
///
/// Returns `None` for anything else, including `h0` and `h8`.
///
/// # Examples
///
/// ```
/// # use headnav::parser::utils::heading_level;
/// assert_eq!(heading_level("h3"), Some(3));
/// assert_eq!(heading_level("H7"), Some(7));
/// assert_eq!(heading_level("header"), None);
/// ```
pub fn heading_level(tag: &str) -> Option<usize> {
    use regex::Regex;
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"^(?i)h([0-9])$").unwrap());

    pattern
        .captures(tag)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .filter(|level| (1..=MAX_HEADING_LEVEL).contains(level))
}

pub fn is_skipped(tag: &str) -> bool {
    SKIPPED_TAGS.contains(&tag)
}

pub fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}
