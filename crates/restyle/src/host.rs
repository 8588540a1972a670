//! The capabilities the engine needs from the hosting editor.
//!
//! The engine is written against [`EditorHost`] rather than a concrete
//! editor, so it can run against a browser editor bridge, a native editor
//! widget, or the in-memory [`Document`](crate::document::Document) used in
//! tests.
//!
//! Every method is infallible: a host that cannot honour a request should
//! ignore it. Nothing the engine does may bring the editor down.

use std::fmt::Debug;

use crate::catalogue::ClassList;
use crate::format::FormatRule;
use crate::menu::{MenuButton, ToolbarButton};

/// Tag used when blocks are reset to the default representation.
pub const PARAGRAPH_TAG: &str = "p";

/// The hosting editor as seen by the engine.
pub trait EditorHost {
    /// Handle to a node of the host document.
    type Node: Clone + PartialEq + Debug;

    // --- named formats -------------------------------------------------

    /// Whether a rule is registered under `name`.
    fn has_format(&self, name: &str) -> bool;

    /// Registers (or re-registers) a rule under `name`.
    fn register_format(&mut self, name: &str, rule: &FormatRule);

    /// Applies the rule if it does not already cover the selection, removes
    /// it otherwise.
    fn toggle_format(&mut self, name: &str);

    /// Whether the rule matches anywhere in the selection or at the caret.
    fn match_format(&self, name: &str) -> bool;

    /// Removes the rule from the selection.
    fn remove_format(&mut self, name: &str);

    // --- commands ------------------------------------------------------

    /// Converts every selected block to `tag`, the editor's `FormatBlock`
    /// command.
    fn format_block(&mut self, tag: &str);

    // --- selection -----------------------------------------------------

    /// Blocks touched by the current selection, in document order.
    fn selected_blocks(&self) -> Vec<Self::Node>;

    /// The element holding the caret (or the start of the selection).
    fn selection_node(&self) -> Self::Node;

    /// Collapses the selection to `offset` inside `node`.
    fn set_cursor_location(&mut self, node: &Self::Node, offset: usize);

    // --- document ------------------------------------------------------

    /// `node` followed by its ancestors, nearest first, stopping before the
    /// editor body.
    fn ancestors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Lowercase tag name of an element.
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Classes carried by an element.
    fn classes(&self, node: &Self::Node) -> ClassList;

    /// Whether the node has no visible content.
    fn is_empty(&self, node: &Self::Node) -> bool;

    /// Removes one class from an element.
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Inserts a detached node right after `reference`.
    fn insert_after(&mut self, node: &Self::Node, reference: &Self::Node);

    /// Removes a node and everything in it.
    fn remove_node(&mut self, node: &Self::Node);

    // --- rendering surface ---------------------------------------------

    /// Adds inline CSS to the editing surface.
    fn push_content_style(&mut self, css: &str);

    /// Adds a stylesheet URL to the editing surface's content CSS list.
    fn push_content_css(&mut self, url: &str);

    /// URLs of the stylesheets linked into the editing surface.
    fn linked_stylesheets(&self) -> Vec<String>;

    /// Links an additional stylesheet into the editing surface.
    fn link_stylesheet(&mut self, href: &str);

    // --- user interface ------------------------------------------------

    /// Registers the dropdown menu button.
    fn add_menu_button(&mut self, name: &str, button: &MenuButton);

    /// Registers a plain toolbar button.
    fn add_button(&mut self, name: &str, button: &ToolbarButton);
}
