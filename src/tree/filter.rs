//! Query filtering over the canonical tree.

use indextree::NodeId;
use tracing::debug;

use super::model::{TreeModel, TreeNode};

/// Build a pruned copy of the tree containing only matches and their ancestors.
///
/// A node survives iff its own text contains `query` (case-insensitive) or at
/// least one of its children survives; survivors are marked `force_expanded`.
/// The canonical model is only read.
///
/// An empty query returns `None`: callers reset to the canonical tree rendered
/// with preserved expand/collapse state instead.
pub fn filter_tree(model: &TreeModel, query: &str) -> Option<Vec<TreeNode>> {
    if query.is_empty() {
        return None;
    }

    let query = query.to_lowercase();
    let forest: Vec<TreeNode> = model
        .roots()
        .iter()
        .filter_map(|&root| filter_node(model, root, &query))
        .collect();

    debug!(
        query = %query,
        roots = forest.len(),
        matches = count_matches(&forest, &query),
        "filtered heading tree"
    );
    Some(forest)
}

fn filter_node(model: &TreeModel, key: NodeId, query: &str) -> Option<TreeNode> {
    let entry = model.get(key)?;

    // Bottom-up: children decide before the parent does
    let children: Vec<TreeNode> = model
        .children(key)
        .filter_map(|child| filter_node(model, child, query))
        .collect();
    let matches = entry.text.to_lowercase().contains(query);

    if !matches && children.is_empty() {
        return None;
    }

    Some(TreeNode {
        key,
        text: entry.text.clone(),
        id: entry.id.clone(),
        level: entry.level,
        children,
        expanded: entry.expanded,
        force_expanded: true,
    })
}

/// Number of nodes in `forest` whose own text matches `query`.
pub fn count_matches(forest: &[TreeNode], query: &str) -> usize {
    let query = query.to_lowercase();
    forest
        .iter()
        .flat_map(|root| root.walk())
        .filter(|node| node.text.to_lowercase().contains(&query))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::HeadingRecord;
    use crate::tree::build_tree;

    /// A > [B, C > [D]]
    fn sample() -> TreeModel {
        build_tree(&[
            HeadingRecord::new(1, "A").unwrap(),
            HeadingRecord::new(2, "B").unwrap(),
            HeadingRecord::new(2, "C").unwrap(),
            HeadingRecord::new(3, "D").unwrap(),
        ])
    }

    #[test]
    fn test_match_keeps_ancestor_chain_only() {
        let model = sample();
        let forest = filter_tree(&model, "d").unwrap();

        assert_eq!(forest.len(), 1);
        let a = &forest[0];
        assert_eq!(a.text, "A");
        assert!(a.force_expanded);
        assert_eq!(a.children.len(), 1);

        let c = &a.children[0];
        assert_eq!(c.text, "C");
        assert!(c.force_expanded);
        assert_eq!(c.children.len(), 1);
        assert_eq!(c.children[0].text, "D");
    }

    #[test]
    fn test_case_insensitive() {
        let model = build_tree(&[
            HeadingRecord::new(1, "Installation").unwrap(),
            HeadingRecord::new(1, "Usage").unwrap(),
        ]);

        let forest = filter_tree(&model, "INSTALL").unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].text, "Installation");
    }

    #[test]
    fn test_matching_parent_drops_non_matching_children() {
        let model = build_tree(&[
            HeadingRecord::new(1, "Config").unwrap(),
            HeadingRecord::new(2, "Files").unwrap(),
            HeadingRecord::new(2, "Config keys").unwrap(),
        ]);

        let forest = filter_tree(&model, "config").unwrap();
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].text, "Config keys");
    }

    #[test]
    fn test_no_match_yields_empty_forest() {
        let model = sample();
        let forest = filter_tree(&model, "zzz").unwrap();
        assert!(forest.is_empty());
    }

    #[test]
    fn test_empty_query_is_reset() {
        let model = sample();
        assert!(filter_tree(&model, "").is_none());
    }

    #[test]
    fn test_filter_does_not_touch_model() {
        let mut model = sample();
        let b = model.find_by_id("header-2-2").unwrap();
        model.set_expanded(b, true);

        let forest = filter_tree(&model, "a").unwrap();
        assert_eq!(forest.len(), 1);
        assert!(model.is_expanded(b));
        assert!(model.iter().filter(|&k| k != b).all(|k| !model.is_expanded(k)));
    }

    #[test]
    fn test_survival_matches_definition() {
        let model = build_tree(&[
            HeadingRecord::new(1, "alpha").unwrap(),
            HeadingRecord::new(2, "beta").unwrap(),
            HeadingRecord::new(3, "gamma").unwrap(),
            HeadingRecord::new(2, "delta").unwrap(),
            HeadingRecord::new(1, "epsilon").unwrap(),
            HeadingRecord::new(2, "zeta").unwrap(),
        ]);

        for query in ["a", "ta", "gam", "eps", "x"] {
            let forest = filter_tree(&model, query).unwrap();
            let kept: Vec<NodeId> = forest
                .iter()
                .flat_map(|root| root.walk())
                .map(|n| n.key)
                .collect();

            for key in model.iter() {
                let self_match = model.get(key).unwrap().text.contains(query);
                let descendant_match = key_descendants(&model, key)
                    .iter()
                    .any(|&d| model.get(d).unwrap().text.contains(query));
                assert_eq!(
                    kept.contains(&key),
                    self_match || descendant_match,
                    "query {:?}, node {:?}",
                    query,
                    model.get(key).unwrap().text
                );
            }
        }
    }

    fn key_descendants(model: &TreeModel, key: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in model.children(key) {
            out.push(child);
            out.extend(key_descendants(model, child));
        }
        out
    }

    #[test]
    fn test_count_matches() {
        let model = sample();
        let forest = filter_tree(&model, "c").unwrap();
        assert_eq!(count_matches(&forest, "c"), 1);
    }
}
