//! # headnav
//!
//! A heading navigator library: it turns the `h1`..`h7` headings of an HTML
//! document into a hierarchical tree that can be filtered, expanded and
//! collapsed, and used to drive a content view to the matching anchor.
//!
//! It powers the `headnav` terminal app, but the tree layer has no terminal
//! or I/O dependencies and can be used on its own.
//!
//! ## Features
//!
//! - Extract headings and a plain-text body from HTML
//! - Build a parent/child tree from the flat heading sequence
//! - Case-insensitive filtering that keeps the path to each match
//! - Expand/collapse state that survives filtering
//! - Activation that toggles, navigates and highlights in one step
//! - Interactive TUI with an outline pane and a content pane
//!
//! ## Example
//!
//! ```rust
//! use headnav::{parse_html, build_tree, filter_tree};
//!
//! let html = r#"
//! <h1>Introduction</h1>
//! <p>Some content here.</p>
//! <h2>Background</h2>
//! <h2>Methodology</h2>
//! "#;
//!
//! let doc = parse_html(html);
//! assert_eq!(doc.headings.len(), 3);
//!
//! let model = build_tree(&doc.records());
//! assert_eq!(model.roots().len(), 1);
//!
//! // Matches keep their ancestors
//! let filtered = filter_tree(&model, "method").unwrap();
//! assert_eq!(filtered[0].text, "Introduction");
//! assert_eq!(filtered[0].children[0].id.as_deref(), Some("header-2-3"));
//! ```

/// Configuration module for persisting user preferences.
///
/// Provides configuration management for theme choices, UI settings, fetch
/// options and keybindings.
pub mod config;

/// Input handling for files, URLs and stdin.
pub mod input;

/// HTML parsing and heading extraction.
pub mod parser;

/// Heading tree: build, filter, render and activate.
pub mod tree;

/// TUI module for the interactive terminal interface.
pub mod tui;

/// Keybindings module for customizable keyboard shortcuts.
///
/// Provides a flexible keybinding system that allows users to customize
/// keyboard shortcuts via configuration files.
pub mod keybindings;

// Re-export commonly used types for convenience
pub use config::Config;
pub use parser::{Document, Heading, HeadingRecord, parse_file, parse_html};
pub use tree::{TreeModel, activate, build_tree, filter_tree, render};
pub use tui::App;
