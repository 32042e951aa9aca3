//! Heading hierarchy, filtering and the render/activate cycle.
//!
//! Everything in here is plain data: no terminal, no I/O. The TUI only draws
//! a [`RenderedTree`] and forwards key presses to [`activate`].
//!
//! ```
//! use headnav::parser::HeadingRecord;
//! use headnav::tree::{build_tree, filter_tree, render, HighlightState, ViewOrigin};
//!
//! let records = vec![
//!     HeadingRecord::new(1, "Install").unwrap(),
//!     HeadingRecord::new(2, "From source").unwrap(),
//!     HeadingRecord::new(1, "Usage").unwrap(),
//! ];
//! let model = build_tree(&records);
//! assert_eq!(model.roots().len(), 2);
//!
//! let filtered = filter_tree(&model, "source").unwrap();
//! let view = render(&filtered, false, ViewOrigin::Filtered, &HighlightState::default());
//! assert_eq!(view.visible_rows().len(), 2);
//! ```

pub mod builder;
pub mod filter;
pub mod model;
pub mod navigation;
pub mod render;

pub use builder::{anchor_id, build_tree};
pub use filter::{count_matches, filter_tree};
pub use model::{TreeEntry, TreeModel, TreeNode};
pub use navigation::{Activation, ContentView, HighlightState, NavigationError, activate};
pub use render::{RenderedNode, RenderedTree, ViewOrigin, render};
