//! Projection of a forest into the flat visual structure the outline draws.

use indextree::NodeId;

use super::model::TreeNode;
use super::navigation::HighlightState;

/// Which tree a [`RenderedTree`] was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewOrigin {
    /// The canonical model; toggles persist back into it
    #[default]
    Canonical,
    /// A transient filter result; toggles stay visual
    Filtered,
}

/// One visual row. Collapsed descendants are still present, only hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNode {
    pub key: NodeId,
    pub id: Option<String>,
    pub text: String,
    pub level: usize,
    /// Nesting depth in the rendered forest (roots are 0)
    pub depth: usize,
    /// Index of the parent row, if any
    pub parent: Option<usize>,
    pub has_children: bool,
    pub expanded: bool,
    pub highlighted: bool,
}

/// The rebuilt-per-render visual structure, in depth-first order.
#[derive(Debug, Clone, Default)]
pub struct RenderedTree {
    nodes: Vec<RenderedNode>,
    origin: ViewOrigin,
    highlighted: Option<usize>,
}

/// Render a forest into a fresh visual structure.
///
/// A node with children is shown expanded iff
/// `(preserve_state && node.expanded) || node.force_expanded`; leaves start
/// collapsed. The node whose id is the current highlight is marked. The input
/// forest is not modified.
pub fn render(
    forest: &[TreeNode],
    preserve_state: bool,
    origin: ViewOrigin,
    highlight: &HighlightState,
) -> RenderedTree {
    let mut tree = RenderedTree {
        nodes: Vec::new(),
        origin,
        highlighted: None,
    };
    for node in forest {
        tree.push(node, None, 0, preserve_state, highlight.current());
    }
    tree
}

impl RenderedTree {
    fn push(
        &mut self,
        node: &TreeNode,
        parent: Option<usize>,
        depth: usize,
        preserve_state: bool,
        highlight: Option<&str>,
    ) {
        let index = self.nodes.len();
        let has_children = !node.children.is_empty();
        let highlighted = highlight.is_some() && node.id.as_deref() == highlight;
        if highlighted {
            self.highlighted = Some(index);
        }

        self.nodes.push(RenderedNode {
            key: node.key,
            id: node.id.clone(),
            text: node.text.clone(),
            level: node.level,
            depth,
            parent,
            has_children,
            expanded: has_children && ((preserve_state && node.expanded) || node.force_expanded),
            highlighted,
        });

        // Children before the next sibling
        for child in &node.children {
            self.push(child, Some(index), depth + 1, preserve_state, highlight);
        }
    }

    pub fn origin(&self) -> ViewOrigin {
        self.origin
    }

    pub fn nodes(&self) -> &[RenderedNode] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&RenderedNode> {
        self.nodes.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut RenderedNode> {
        self.nodes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Strict ancestor rows of `index`, nearest first.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.nodes.get(index).and_then(|n| n.parent), |&i| {
            self.nodes[i].parent
        })
    }

    /// A row is visible when every ancestor is expanded.
    pub fn is_visible(&self, index: usize) -> bool {
        index < self.nodes.len() && self.ancestors(index).all(|i| self.nodes[i].expanded)
    }

    /// Indices of the rows currently visible, in display order.
    pub fn visible_rows(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.is_visible(i))
            .collect()
    }

    pub fn position_of_key(&self, key: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.key == key)
    }

    pub fn position_of_id(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id.as_deref() == Some(id))
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Move the highlight to `index`, un-highlighting the previous row first.
    /// Returns the previously highlighted row.
    pub(crate) fn set_highlight(&mut self, index: usize) -> Option<usize> {
        let previous = self.highlighted.take();
        if let Some(prev) = previous.and_then(|p| self.nodes.get_mut(p)) {
            prev.highlighted = false;
        }
        if let Some(node) = self.nodes.get_mut(index) {
            node.highlighted = true;
            self.highlighted = Some(index);
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::HeadingRecord;
    use crate::tree::{TreeModel, build_tree, filter_tree};

    fn sample() -> TreeModel {
        build_tree(&[
            HeadingRecord::new(1, "A").unwrap(),
            HeadingRecord::new(2, "B").unwrap(),
            HeadingRecord::new(3, "B1").unwrap(),
            HeadingRecord::new(2, "C").unwrap(),
            HeadingRecord::new(1, "D").unwrap(),
        ])
    }

    fn texts(tree: &RenderedTree, rows: &[usize]) -> Vec<String> {
        rows.iter().map(|&i| tree.nodes()[i].text.clone()).collect()
    }

    #[test]
    fn test_depth_first_order_and_parents() {
        let model = sample();
        let tree = render(
            &model.forest(),
            false,
            ViewOrigin::Canonical,
            &HighlightState::default(),
        );

        assert_eq!(
            texts(&tree, &(0..tree.len()).collect::<Vec<_>>()),
            vec!["A", "B", "B1", "C", "D"]
        );
        assert_eq!(tree.nodes()[2].parent, Some(1));
        assert_eq!(tree.nodes()[2].depth, 2);
        assert_eq!(tree.ancestors(2).collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn test_initial_render_is_collapsed() {
        let model = sample();
        let tree = render(
            &model.forest(),
            false,
            ViewOrigin::Canonical,
            &HighlightState::default(),
        );

        assert_eq!(texts(&tree, &tree.visible_rows()), vec!["A", "D"]);
        assert!(tree.nodes().iter().all(|n| !n.expanded));
    }

    #[test]
    fn test_preserve_state_reads_model_expanded() {
        let mut model = sample();
        let a = model.roots()[0];
        model.set_expanded(a, true);

        let preserved = render(
            &model.forest(),
            true,
            ViewOrigin::Canonical,
            &HighlightState::default(),
        );
        assert_eq!(texts(&preserved, &preserved.visible_rows()), vec!["A", "B", "C", "D"]);

        let fresh = render(
            &model.forest(),
            false,
            ViewOrigin::Canonical,
            &HighlightState::default(),
        );
        assert_eq!(texts(&fresh, &fresh.visible_rows()), vec!["A", "D"]);
    }

    #[test]
    fn test_force_expanded_shows_filter_results() {
        let model = sample();
        let forest = filter_tree(&model, "b1").unwrap();
        let tree = render(&forest, false, ViewOrigin::Filtered, &HighlightState::default());

        assert_eq!(tree.origin(), ViewOrigin::Filtered);
        assert_eq!(texts(&tree, &tree.visible_rows()), vec!["A", "B", "B1"]);
    }

    #[test]
    fn test_leaves_are_never_marked_expanded_by_render() {
        let model = sample();
        let forest = filter_tree(&model, "d").unwrap();
        let tree = render(&forest, true, ViewOrigin::Filtered, &HighlightState::default());

        // D is a matching leaf: forced, but it has nothing to expand
        assert_eq!(tree.len(), 1);
        assert!(!tree.nodes()[0].expanded);
    }

    #[test]
    fn test_render_does_not_mutate_input() {
        let model = sample();
        let forest = filter_tree(&model, "c").unwrap();
        let before = forest.clone();

        let _ = render(&forest, true, ViewOrigin::Filtered, &HighlightState::default());
        assert_eq!(forest, before);
    }

    #[test]
    fn test_highlight_carried_by_id() {
        let model = sample();
        let mut highlight = HighlightState::default();
        highlight.replace("header-2-4".to_string());

        let tree = render(&model.forest(), false, ViewOrigin::Canonical, &highlight);
        assert_eq!(tree.highlighted(), Some(3));
        assert_eq!(tree.nodes().iter().filter(|n| n.highlighted).count(), 1);
    }

    #[test]
    fn test_set_highlight_moves_single_marker() {
        let model = sample();
        let mut tree = render(
            &model.forest(),
            false,
            ViewOrigin::Canonical,
            &HighlightState::default(),
        );

        assert_eq!(tree.set_highlight(1), None);
        assert_eq!(tree.set_highlight(4), Some(1));
        assert_eq!(tree.nodes().iter().filter(|n| n.highlighted).count(), 1);
        assert!(tree.nodes()[4].highlighted);
    }

    #[test]
    fn test_lookup_by_key_and_id() {
        let model = sample();
        let tree = render(
            &model.forest(),
            false,
            ViewOrigin::Canonical,
            &HighlightState::default(),
        );

        assert_eq!(tree.position_of_id("header-1-5"), Some(4));
        assert_eq!(tree.position_of_key(model.roots()[1]), Some(4));
        assert_eq!(tree.position_of_id("missing"), None);
    }
}
