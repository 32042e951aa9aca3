use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::tree::anchor_id;

/// Deepest heading tag recognised (`<h7>` is accepted alongside h1-h6).
pub const MAX_HEADING_LEVEL: usize = 7;

/// A `(level, text)` pair in document order, the input to the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub level: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeadingError {
    #[error("heading level {0} is outside 1..={max}", max = MAX_HEADING_LEVEL)]
    InvalidLevel(usize),
}

impl HeadingRecord {
    /// Create a record, rejecting levels outside `1..=MAX_HEADING_LEVEL`.
    pub fn new(level: usize, text: impl Into<String>) -> Result<Self, HeadingError> {
        if !(1..=MAX_HEADING_LEVEL).contains(&level) {
            return Err(HeadingError::InvalidLevel(level));
        }
        Ok(Self {
            level,
            text: text.into(),
        })
    }
}

/// A heading found in the document, with the content line it starts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: usize,
    pub text: String,
    /// Index into [`Document::lines`]
    pub line: usize,
}

/// A parsed HTML document: its headings and a flattened text rendition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Contents of `<title>`, if present
    pub title: Option<String>,
    /// Body text, one block element per line
    pub lines: Vec<String>,
    pub headings: Vec<Heading>,
}

impl Document {
    pub fn new(title: Option<String>, lines: Vec<String>, headings: Vec<Heading>) -> Self {
        Self {
            title,
            lines,
            headings,
        }
    }

    /// Heading records in document order, ready for [`crate::tree::build_tree`].
    pub fn records(&self) -> Vec<HeadingRecord> {
        self.headings
            .iter()
            .map(|h| HeadingRecord {
                level: h.level,
                text: h.text.clone(),
            })
            .collect()
    }

    /// Map each heading's anchor id to the content line it starts on.
    ///
    /// Ids are generated the same way the tree builder generates them, so a
    /// node's `id` can be looked up here directly.
    pub fn anchor_lines(&self) -> HashMap<String, usize> {
        self.headings
            .iter()
            .enumerate()
            .map(|(position, h)| (anchor_id(h.level, position), h.line))
            .collect()
    }

    /// Map content line index to heading level, for styling heading lines.
    pub fn heading_lines(&self) -> HashMap<usize, usize> {
        self.headings.iter().map(|h| (h.line, h.level)).collect()
    }

    /// Count headings per level, indexed `1..=MAX_HEADING_LEVEL`.
    pub fn level_counts(&self) -> [usize; MAX_HEADING_LEVEL + 1] {
        let mut counts = [0; MAX_HEADING_LEVEL + 1];
        for heading in &self.headings {
            if let Some(slot) = counts.get_mut(heading.level) {
                *slot += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rejects_out_of_range_levels() {
        assert_eq!(
            HeadingRecord::new(0, "zero"),
            Err(HeadingError::InvalidLevel(0))
        );
        assert_eq!(
            HeadingRecord::new(MAX_HEADING_LEVEL + 1, "deep"),
            Err(HeadingError::InvalidLevel(MAX_HEADING_LEVEL + 1))
        );
        assert!(HeadingRecord::new(7, "h7").is_ok());
    }

    #[test]
    fn test_anchor_lines_follow_builder_ids() {
        let doc = Document::new(
            None,
            vec!["Intro".into(), "text".into(), "Usage".into()],
            vec![
                Heading {
                    level: 1,
                    text: "Intro".into(),
                    line: 0,
                },
                Heading {
                    level: 2,
                    text: "Usage".into(),
                    line: 2,
                },
            ],
        );

        let anchors = doc.anchor_lines();
        assert_eq!(anchors.get("header-1-1"), Some(&0));
        assert_eq!(anchors.get("header-2-2"), Some(&2));
    }

    #[test]
    fn test_level_counts() {
        let doc = Document::new(
            None,
            Vec::new(),
            vec![
                Heading {
                    level: 1,
                    text: "a".into(),
                    line: 0,
                },
                Heading {
                    level: 2,
                    text: "b".into(),
                    line: 1,
                },
                Heading {
                    level: 2,
                    text: "c".into(),
                    line: 2,
                },
            ],
        );

        let counts = doc.level_counts();
        assert_eq!(counts[1], 1);
        assert_eq!(counts[2], 2);
        assert_eq!(counts[3], 0);
    }
}
