use indextree::{Arena, NodeId};
use serde::Serialize;

/// Canonical per-heading data held in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub text: String,
    /// Anchor id; every heading-derived node has one
    pub id: Option<String>,
    pub level: usize,
    /// The user's last expand/collapse choice on the canonical view
    pub expanded: bool,
}

/// The canonical heading tree plus persistent expand/collapse state.
///
/// Built once per document load. Nodes live in an `indextree` arena so each
/// node knows its parent; `expanded` is only changed through
/// [`TreeModel::set_expanded`].
#[derive(Debug, Clone, Default)]
pub struct TreeModel {
    arena: Arena<TreeEntry>,
    roots: Vec<NodeId>,
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` as the last child of `parent`, or as a new root.
    pub(crate) fn insert(&mut self, entry: TreeEntry, parent: Option<NodeId>) -> NodeId {
        let node = self.arena.new_node(entry);
        match parent {
            Some(parent) => parent.append(node, &mut self.arena),
            None => self.roots.push(node),
        }
        node
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of headings in the tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn get(&self, key: NodeId) -> Option<&TreeEntry> {
        self.arena.get(key).map(|node| node.get())
    }

    pub fn children(&self, key: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        key.children(&self.arena)
    }

    pub fn parent(&self, key: NodeId) -> Option<NodeId> {
        self.arena.get(key).and_then(|node| node.parent())
    }

    /// Strict ancestors of `key`, nearest first.
    pub fn ancestors(&self, key: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        key.ancestors(&self.arena).skip(1)
    }

    /// Every node in document (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots
            .iter()
            .flat_map(move |root| root.descendants(&self.arena))
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.iter()
            .find(|&key| self.get(key).and_then(|e| e.id.as_deref()) == Some(id))
    }

    pub fn is_expanded(&self, key: NodeId) -> bool {
        self.get(key).is_some_and(|e| e.expanded)
    }

    /// Persist an expand/collapse choice. Returns false for unknown keys.
    pub fn set_expanded(&mut self, key: NodeId, expanded: bool) -> bool {
        match self.arena.get_mut(key) {
            Some(node) => {
                node.get_mut().expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Project the canonical tree into plain nested nodes for rendering.
    pub fn forest(&self) -> Vec<TreeNode> {
        self.roots.iter().map(|&root| self.project(root)).collect()
    }

    fn project(&self, key: NodeId) -> TreeNode {
        let entry = self.arena[key].get();
        TreeNode {
            key,
            text: entry.text.clone(),
            id: entry.id.clone(),
            level: entry.level,
            children: key.children(&self.arena).map(|c| self.project(c)).collect(),
            expanded: entry.expanded,
            force_expanded: false,
        }
    }
}

/// A node of a render-ready forest, either the canonical projection or a
/// transient filter result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Canonical arena node this was projected from
    #[serde(skip)]
    pub key: NodeId,
    pub text: String,
    pub id: Option<String>,
    pub level: usize,
    pub children: Vec<TreeNode>,
    pub expanded: bool,
    /// Set on filter results only, never written back to the model
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_expanded: bool,
}

impl TreeNode {
    /// Render this node and its descendants with box-drawing characters.
    pub fn render_box_tree(&self, prefix: &str, is_last: bool) -> String {
        let connector = if is_last { "└── " } else { "├── " };
        let mut out = format!("{}{}{}\n", prefix, connector, self.text);

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (i, child) in self.children.iter().enumerate() {
            let last = i == self.children.len() - 1;
            out.push_str(&child.render_box_tree(&child_prefix, last));
        }
        out
    }

    /// Pre-order walk over this node and its descendants.
    pub fn walk(&self) -> Vec<&TreeNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.walk());
        }
        nodes
    }
}
