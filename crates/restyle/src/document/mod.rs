//! An in-memory rich-text document implementing [`EditorHost`].
//!
//! [`Document`] is a small arena tree (`body` at the root, elements and text
//! below) with a selection and the named-format registry a real editor
//! keeps. It exists so the engine can be exercised end to end without a
//! browser, and doubles as the reference for how hosts are expected to
//! behave.
//!
//! Documents are written as markup fixtures with selection markers:
//!
//! - `[` and `]` mark the start and end of a range;
//! - `|` marks a collapsed caret.
//!
//! ```rust
//! use restyle::document::Document;
//!
//! let doc = Document::parse(r#"<div class="note"><p>Hel[lo</p><p>wor]ld</p></div>"#).unwrap();
//! assert_eq!(doc.to_html(), r#"<div class="note"><p>Hello</p><p>world</p></div>"#);
//! assert_eq!(
//!     doc.to_marked_html(),
//!     r#"<div class="note"><p>Hel[lo</p><p>wor]ld</p></div>"#
//! );
//! ```
//!
//! Whitespace-only text between tags is dropped while parsing, and the only
//! attribute kept is `class`.
//!
//! [`EditorHost`]: crate::EditorHost

mod format;
mod host;
mod parse;
mod render;

use std::collections::{BTreeMap, HashMap};

use indextree::{Arena, NodeId};

use crate::catalogue::ClassList;
use crate::format::FormatRule;
use crate::menu::{MenuButton, ToolbarButton};

pub use parse::FixtureError;

/// Tags treated as blocks.
pub const BLOCK_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "pre",
    "blockquote",
    "div",
    "address",
];

/// Tags that may hold other blocks and serve as wrapping scope.
pub const CONTAINER_TAGS: &[&str] = &["body", "div", "blockquote"];

/// Tags without content or closing tag.
pub const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Tags that count as visible content on their own.
const CONTENT_TAGS: &[&str] = &["hr", "img"];

/// An element: a tag and its classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub classes: ClassList,
}

impl Element {
    pub fn new(tag: &str, classes: ClassList) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes,
        }
    }
}

/// The payload of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(Element),
    Text(String),
}

/// A point in the document.
///
/// In a text node `offset` counts characters; in an element it counts
/// children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub node: NodeId,
    pub offset: usize,
}

/// The current selection. Collapsed when `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// A caret at `position`.
    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Whether the selection is a caret.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Which text node wins when an absolute offset falls on a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bias {
    Forward,
    Backward,
}

/// An in-memory document with a selection.
#[derive(Debug, Clone)]
pub struct Document {
    arena: Arena<NodeData>,
    body: NodeId,
    selection: Selection,
    formats: BTreeMap<String, FormatRule>,
    content_styles: Vec<String>,
    content_css: Vec<String>,
    stylesheets: Vec<String>,
    menu_buttons: Vec<(String, MenuButton)>,
    buttons: Vec<(String, ToolbarButton)>,
}

impl Default for Document {
    fn default() -> Self {
        let mut arena = Arena::new();
        let body = arena.new_node(NodeData::Element(Element::new("body", ClassList::new())));
        Self {
            arena,
            body,
            selection: Selection::caret(Position {
                node: body,
                offset: 0,
            }),
            formats: BTreeMap::new(),
            content_styles: Vec::new(),
            content_css: Vec::new(),
            stylesheets: Vec::new(),
            menu_buttons: Vec::new(),
            buttons: Vec::new(),
        }
    }
}

impl Document {
    /// The root element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Replaces the selection.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// The payload of a node.
    pub fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.arena
            .get(node)
            .filter(|n| !n.is_removed())
            .map(|n| n.get())
    }

    /// The element payload of a node, if it is an element.
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.data(node) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self
            .arena
            .get_mut(node)
            .filter(|n| !n.is_removed())
            .map(|n| n.get_mut())
        {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// The text of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.data(node) {
            Some(NodeData::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Lowercase tag of an element.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag.as_str())
    }

    /// The first element with `tag`, in document order.
    pub fn find(&self, tag: &str) -> Option<NodeId> {
        self.body
            .descendants(&self.arena)
            .find(|n| self.tag(*n) == Some(tag))
    }

    /// Every element with `tag`, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<NodeId> {
        self.body
            .descendants(&self.arena)
            .filter(|n| self.tag(*n) == Some(tag))
            .collect()
    }

    /// The concatenated text of the document.
    pub fn text_content(&self) -> String {
        self.text_nodes()
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Formats registered so far, by name.
    pub fn registered_formats(&self) -> &BTreeMap<String, FormatRule> {
        &self.formats
    }

    /// Inline CSS pushed into the surface.
    pub fn content_styles(&self) -> &[String] {
        &self.content_styles
    }

    /// Stylesheet URLs pushed into the content CSS list.
    pub fn content_css(&self) -> &[String] {
        &self.content_css
    }

    /// Registered menu buttons.
    pub fn menu_buttons(&self) -> &[(String, MenuButton)] {
        &self.menu_buttons
    }

    /// Registered plain buttons.
    pub fn buttons(&self) -> &[(String, ToolbarButton)] {
        &self.buttons
    }

    // --- tree helpers ----------------------------------------------------

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(|n| n.parent())
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        node.children(&self.arena).collect()
    }

    fn child_index(&self, node: NodeId) -> usize {
        node.preceding_siblings(&self.arena).count() - 1
    }

    fn is_block(&self, node: NodeId) -> bool {
        node != self.body && self.tag(node).is_some_and(|tag| BLOCK_TAGS.contains(&tag))
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        node.ancestors(&self.arena).any(|n| n == ancestor)
    }

    /// The nearest block around `node`, `node` included.
    fn enclosing_block(&self, node: NodeId) -> Option<NodeId> {
        node.ancestors(&self.arena).find(|n| self.is_block(*n))
    }

    /// Whether `node` holds no visible content.
    fn is_blank(&self, node: NodeId) -> bool {
        !node.descendants(&self.arena).any(|n| match self.data(n) {
            Some(NodeData::Text(text)) => !text.trim().is_empty(),
            Some(NodeData::Element(el)) => CONTENT_TAGS.contains(&el.tag.as_str()),
            None => false,
        })
    }

    /// Document order of every node under `body`.
    fn document_order(&self) -> HashMap<NodeId, usize> {
        self.body
            .descendants(&self.arena)
            .enumerate()
            .map(|(i, n)| (n, i))
            .collect()
    }

    fn text_nodes(&self) -> Vec<NodeId> {
        self.body
            .descendants(&self.arena)
            .filter(|n| self.text(*n).is_some())
            .collect()
    }

    fn text_len(&self, node: NodeId) -> usize {
        self.text(node).map_or(0, |t| t.chars().count())
    }

    /// Characters of text strictly before `node` in document order.
    fn text_before(&self, node: NodeId) -> usize {
        let mut total = 0;
        for n in self.body.descendants(&self.arena) {
            if n == node {
                break;
            }
            total += self.text_len(n);
        }
        total
    }

    /// Text nodes with their absolute start offsets.
    fn text_spans(&self) -> Vec<(NodeId, usize, usize)> {
        let mut offset = 0;
        self.text_nodes()
            .into_iter()
            .map(|n| {
                let len = self.text_len(n);
                let span = (n, offset, len);
                offset += len;
                span
            })
            .collect()
    }

    // --- offsets ---------------------------------------------------------

    /// Converts a position to an absolute character offset.
    fn absolute(&self, position: Position) -> usize {
        if self.text(position.node).is_some() {
            return self.text_before(position.node) + position.offset;
        }
        match self.children(position.node).get(position.offset) {
            Some(child) => self.text_before(*child),
            None => {
                self.text_before(position.node)
                    + position
                        .node
                        .descendants(&self.arena)
                        .map(|n| self.text_len(n))
                        .sum::<usize>()
            }
        }
    }

    fn range(&self) -> (usize, usize) {
        let start = self.absolute(self.selection.start);
        let end = self.absolute(self.selection.end);
        (start.min(end), start.max(end))
    }

    /// Converts an absolute offset back to a text position.
    fn position_at(&self, absolute: usize, bias: Bias) -> Position {
        let spans = self.text_spans();
        let hit = match bias {
            Bias::Forward => spans
                .iter()
                .find(|(_, start, len)| *start <= absolute && absolute < start + len)
                .or_else(|| spans.iter().rev().find(|(_, start, len)| absolute == start + len)),
            Bias::Backward => spans
                .iter()
                .find(|(_, start, len)| *start < absolute && absolute <= start + len)
                .or_else(|| spans.iter().find(|(_, start, _)| *start == absolute)),
        };
        match hit {
            Some((node, start, _)) => Position {
                node: *node,
                offset: absolute - start,
            },
            None => Position {
                node: self.body,
                offset: 0,
            },
        }
    }

    /// Selects the text between two absolute character offsets.
    ///
    /// Offsets count characters of [`text_content`](Self::text_content) and
    /// are clamped to its length. Equal offsets place a caret.
    pub fn select_text(&mut self, start: usize, end: usize) {
        let total = self.text_content().chars().count();
        let (start, end) = (start.min(end).min(total), start.max(end).min(total));
        let start_pos = self.position_at(start, Bias::Forward);
        let end_pos = if start == end {
            start_pos
        } else {
            self.position_at(end, Bias::Backward)
        };
        self.selection = Selection {
            start: start_pos,
            end: end_pos,
        };
    }

    // --- selection queries -----------------------------------------------

    /// The node a position points into, for block lookup.
    fn anchor(&self, position: Position) -> NodeId {
        if self.text(position.node).is_some() {
            return position.node;
        }
        let children = self.children(position.node);
        match children.len() {
            0 => position.node,
            n => children[position.offset.min(n - 1)],
        }
    }

    /// The text node holding the caret, if any.
    fn caret_text(&self) -> Option<NodeId> {
        let start = self.selection.start;
        if self.text(start.node).is_some() {
            return Some(start.node);
        }
        let found = self.position_at(self.absolute(start), Bias::Forward);
        self.text(found.node).map(|_| found.node)
    }

    /// Text nodes overlapping `[start, end)`.
    fn text_in(&self, start: usize, end: usize) -> Vec<NodeId> {
        self.text_spans()
            .into_iter()
            .filter(|(_, b, len)| *len > 0 && *b < end && b + len > start)
            .map(|(n, _, _)| n)
            .collect()
    }

    /// Blocks touched by the selection, in document order.
    fn blocks_in_selection(&self) -> Vec<NodeId> {
        let mut touched = vec![self.anchor(self.selection.start)];
        if !self.selection.is_collapsed() {
            let (start, end) = self.range();
            touched.extend(self.text_in(start, end));
            touched.push(self.anchor(self.selection.end));
        }

        let order = self.document_order();
        let mut blocks: Vec<NodeId> = touched
            .into_iter()
            .filter_map(|n| self.enclosing_block(n))
            .collect();
        blocks.sort_by_key(|n| order.get(n).copied().unwrap_or(usize::MAX));
        blocks.dedup();
        blocks
    }

    // --- structural edits that keep the selection valid ----------------------

    fn positions_mut(&mut self) -> [&mut Position; 2] {
        [&mut self.selection.start, &mut self.selection.end]
    }

    /// Replaces an element by its children.
    fn unwrap(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let index = self.child_index(node);
        let count = node.children(&self.arena).count();
        for pos in self.positions_mut() {
            if pos.node == node {
                *pos = Position {
                    node: parent,
                    offset: index + pos.offset,
                };
            } else if pos.node == parent && pos.offset > index {
                pos.offset = pos.offset + count - 1;
            }
        }
        node.remove(&mut self.arena);
    }

    /// Moves the contiguous `run` of siblings into a new element.
    fn wrap_siblings(&mut self, run: &[NodeId], wrapper: Element) -> Option<NodeId> {
        let first = *run.first()?;
        let parent = self.parent(first)?;
        let index = self.child_index(first);
        let len = run.len();
        let wrapper = self.arena.new_node(NodeData::Element(wrapper));
        first.insert_before(wrapper, &mut self.arena);
        for node in run {
            wrapper.append(*node, &mut self.arena);
        }
        for pos in self.positions_mut() {
            if pos.node == parent && pos.offset > index {
                if pos.offset < index + len {
                    *pos = Position {
                        node: wrapper,
                        offset: pos.offset - index,
                    };
                } else {
                    pos.offset = pos.offset - len + 1;
                }
            }
        }
        Some(wrapper)
    }

    /// Moves the children of `node` outside `lo..=hi` into copies of `node`
    /// placed right before and after it, so that `node` keeps only the run.
    fn split_around(&mut self, node: NodeId, lo: usize, hi: usize) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let Some(element) = self.element(node).cloned() else {
            return;
        };
        let children = self.children(node);
        if lo > hi || hi >= children.len() {
            return;
        }
        let index = self.child_index(node);

        let head = (lo > 0).then(|| {
            let copy = self.arena.new_node(NodeData::Element(element.clone()));
            node.insert_before(copy, &mut self.arena);
            for child in &children[..lo] {
                copy.append(*child, &mut self.arena);
            }
            copy
        });
        let tail = (hi + 1 < children.len()).then(|| {
            let copy = self.arena.new_node(NodeData::Element(element));
            node.insert_after(copy, &mut self.arena);
            for child in &children[hi + 1..] {
                copy.append(*child, &mut self.arena);
            }
            copy
        });
        let added = usize::from(head.is_some()) + usize::from(tail.is_some());

        for pos in self.positions_mut() {
            if pos.node == node {
                match (head, tail) {
                    (Some(head), _) if pos.offset < lo => pos.node = head,
                    (_, Some(tail)) if pos.offset > hi => {
                        *pos = Position {
                            node: tail,
                            offset: pos.offset - hi - 1,
                        };
                    }
                    _ => pos.offset -= lo,
                }
            } else if pos.node == parent && pos.offset > index {
                pos.offset += added;
            }
        }
    }

    /// Moves `node` to the end of `target`, a sibling of it.
    fn move_to_end(&mut self, node: NodeId, target: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let index = self.child_index(node);
        let end = target.children(&self.arena).count();
        for pos in self.positions_mut() {
            if pos.node == parent && pos.offset == index {
                *pos = Position {
                    node: target,
                    offset: end,
                };
            } else if pos.node == parent && pos.offset > index {
                pos.offset -= 1;
            }
        }
        target.append(node, &mut self.arena);
    }

    /// Detaches and discards a subtree.
    fn remove_subtree(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let index = self.child_index(node);
        let inside: Vec<bool> = [self.selection.start.node, self.selection.end.node]
            .into_iter()
            .map(|n| self.is_ancestor_or_self(node, n))
            .collect();
        for (pos, inside) in self.positions_mut().into_iter().zip(inside) {
            if inside {
                *pos = Position {
                    node: parent,
                    offset: index,
                };
            } else if pos.node == parent && pos.offset > index {
                pos.offset -= 1;
            }
        }
        node.remove_subtree(&mut self.arena);
    }

    /// Inserts a detached node after `reference`.
    fn place_after(&mut self, node: NodeId, reference: NodeId) {
        let Some(parent) = self.parent(reference) else {
            self.body.append(node, &mut self.arena);
            return;
        };
        let index = self.child_index(reference);
        reference.insert_after(node, &mut self.arena);
        for pos in self.positions_mut() {
            if pos.node == parent && pos.offset > index {
                pos.offset += 1;
            }
        }
    }

    /// Merges adjacent text nodes and drops empty ones.
    ///
    /// Text node identities change; callers restore the selection from
    /// absolute offsets afterwards.
    fn normalize_text(&mut self) {
        let elements: Vec<NodeId> = self
            .body
            .descendants(&self.arena)
            .filter(|n| self.element(*n).is_some())
            .collect();
        for element in elements {
            let mut previous: Option<NodeId> = None;
            for child in self.children(element) {
                let Some(text) = self.text(child).map(str::to_owned) else {
                    previous = None;
                    continue;
                };
                if text.is_empty() {
                    child.remove(&mut self.arena);
                    continue;
                }
                match previous {
                    Some(prev) => {
                        if let NodeData::Text(existing) = self.arena[prev].get_mut() {
                            existing.push_str(&text);
                        }
                        child.remove(&mut self.arena);
                    }
                    None => previous = Some(child),
                }
            }
        }
    }
}

/// Byte index of the `chars`-th character of `text`.
fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}
