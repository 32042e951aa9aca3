//! Text and JSON renditions of the heading tree for CLI mode.

use headnav::Document;
use headnav::tree::TreeNode;

/// Flat `#`-prefixed list in document order.
pub fn format_list(forest: &[TreeNode]) -> String {
    forest
        .iter()
        .flat_map(TreeNode::walk)
        .map(|node| format!("{} {}\n", "#".repeat(node.level), node.text))
        .collect()
}

pub fn format_tree(forest: &[TreeNode]) -> String {
    forest
        .iter()
        .enumerate()
        .map(|(i, node)| node.render_box_tree("", i == forest.len() - 1))
        .collect()
}

/// Nested tree with anchor ids and children.
pub fn format_json(forest: &[TreeNode]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(forest)
}

pub fn format_counts(doc: &Document) -> String {
    let mut out = String::from("Heading counts:\n");
    for (level, count) in doc.level_counts().iter().enumerate().skip(1) {
        if *count > 0 {
            out.push_str(&format!("  {}: {}\n", "#".repeat(level), count));
        }
    }
    out.push_str(&format!("\nTotal: {}\n", doc.headings.len()));
    out
}
