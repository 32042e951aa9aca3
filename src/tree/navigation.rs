//! Activation handling: toggling, ancestor reveal, navigation and highlight.

use thiserror::Error;
use tracing::{debug, warn};

use super::model::TreeModel;
use super::render::{RenderedTree, ViewOrigin};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no anchor named '{0}' in the content view")]
    TargetNotFound(String),
    #[error("content view unavailable: {0}")]
    Unavailable(String),
}

/// The sibling content surface, addressed only by anchor id.
pub trait ContentView {
    /// Set the view's current location to the fragment `#id`.
    fn set_fragment(&mut self, id: &str) -> Result<(), NavigationError>;
}

/// The single highlighted anchor, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    current: Option<String>,
}

impl HighlightState {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Replace the highlighted anchor, returning the previous one.
    pub fn replace(&mut self, id: String) -> Option<String> {
        self.current.replace(id)
    }
}

/// What a single activation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub index: usize,
    /// Visual expanded state of the activated row afterwards
    pub expanded: bool,
    /// Whether the new state was written to the canonical model
    pub persisted: bool,
    /// Anchor navigated to, if the node had one
    pub navigated: Option<String>,
    /// Set when the content view could not follow the navigation
    pub navigation_error: Option<NavigationError>,
}

/// Activate rendered row `index`.
///
/// - A leaf becomes expanded and stays that way on repeat activation.
/// - A node with children toggles; on a canonical view the new value is
///   persisted with [`TreeModel::set_expanded`].
/// - Every strict ancestor row is expanded visually (never persisted).
/// - If the node has an id, the content view is pointed at it and the
///   highlight moves to this row. A missing or failing content view is
///   logged and otherwise ignored.
///
/// Only the activated row is toggled. Returns `None` for an out-of-range row.
pub fn activate(
    rendered: &mut RenderedTree,
    index: usize,
    model: &mut TreeModel,
    highlight: &mut HighlightState,
    view: Option<&mut dyn ContentView>,
) -> Option<Activation> {
    let origin = rendered.origin();
    let node = rendered.get_mut(index)?;

    let mut persisted = false;
    if node.has_children {
        node.expanded = !node.expanded;
        if origin == ViewOrigin::Canonical {
            persisted = model.set_expanded(node.key, node.expanded);
        }
    } else {
        node.expanded = true;
    }
    let expanded = node.expanded;
    let id = node.id.clone();

    let ancestors: Vec<usize> = rendered.ancestors(index).collect();
    for ancestor in ancestors {
        if let Some(row) = rendered.get_mut(ancestor) {
            row.expanded = true;
        }
    }

    let mut navigation_error = None;
    if let Some(id) = &id {
        let result = match view {
            Some(view) => view.set_fragment(id),
            None => Err(NavigationError::Unavailable("no content view attached".into())),
        };
        if let Err(e) = result {
            warn!(anchor = %id, error = %e, "navigation skipped");
            navigation_error = Some(e);
        }

        rendered.set_highlight(index);
        highlight.replace(id.clone());
        debug!(anchor = %id, row = index, "activated heading");
    }

    Some(Activation {
        index,
        expanded,
        persisted,
        navigated: id,
        navigation_error,
    })
}
