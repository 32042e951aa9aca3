//! Flat heading levels to nested hierarchy.

use indextree::NodeId;
use tracing::debug;

use super::model::{TreeEntry, TreeModel};
use crate::parser::HeadingRecord;

/// Anchor id for the heading at `position` (0-based) in the input.
///
/// Depends only on level and position so duplicate heading texts still get
/// distinct ids.
pub fn anchor_id(level: usize, position: usize) -> String {
    format!("header-{}-{}", level, position + 1)
}

/// Build the canonical tree from headings in document order.
///
/// A heading at level `L` nests under the nearest preceding heading with a
/// level below `L`; headings with no such ancestor become roots. Level jumps
/// (h1 straight to h4) nest directly under the shallower ancestor.
pub fn build_tree(records: &[HeadingRecord]) -> TreeModel {
    let mut model = TreeModel::new();

    // (level, node) frames; the level-0 sentinel stands for the root list
    let mut stack: Vec<(usize, Option<NodeId>)> = vec![(0, None)];

    for (position, record) in records.iter().enumerate() {
        while stack
            .last()
            .is_some_and(|(level, node)| node.is_some() && *level >= record.level)
        {
            stack.pop();
        }

        let parent = stack.last().and_then(|(_, node)| *node);
        let node = model.insert(
            TreeEntry {
                text: record.text.clone(),
                id: Some(anchor_id(record.level, position)),
                level: record.level,
                expanded: false,
            },
            parent,
        );
        stack.push((record.level, Some(node)));
    }

    debug!(
        headings = records.len(),
        roots = model.roots().len(),
        "built heading tree"
    );
    model
}
