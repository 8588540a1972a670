//! Leaving a styled container with Enter.
//!
//! Block styles wrap content in a container that would otherwise trap the
//! caret: Enter keeps splitting paragraphs inside it. Pressing Enter (without
//! Shift) on an empty line inside a styled container instead moves the caret
//! to a fresh paragraph right after the container and drops the empty line.
//!
//! The decision is made from a [`CaretContext`], a snapshot of the caret's
//! ancestors, so it can be tested without a document.

use crate::catalogue::{ClassList, StyleCatalogue};
use crate::event::{Mutation, Plan};
use crate::host::EditorHost;

/// Elements that hold a line of text.
pub const TEXT_FLOW_BLOCKS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "li"];

/// One ancestor of the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot<N> {
    pub node: N,
    pub tag: String,
    pub classes: ClassList,
    pub empty: bool,
}

/// The caret's ancestors, nearest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretContext<N> {
    pub ancestors: Vec<ElementSnapshot<N>>,
}

impl<N> Default for CaretContext<N> {
    fn default() -> Self {
        Self {
            ancestors: Vec::new(),
        }
    }
}

impl<N: Clone> CaretContext<N> {
    /// Reads the caret's ancestors from a host.
    pub fn capture<H: EditorHost<Node = N>>(host: &H) -> Self {
        let node = host.selection_node();
        let ancestors = host
            .ancestors(&node)
            .into_iter()
            .map(|node| ElementSnapshot {
                tag: host.tag_name(&node),
                classes: host.classes(&node),
                empty: host.is_empty(&node),
                node,
            })
            .collect();
        Self { ancestors }
    }
}

/// Where the caret is relative to styled containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    /// Some ancestor carries a block style.
    InsideStyledBlock,
    /// No styled container around the caret.
    Normal,
}

/// Index of the nearest styled container in `context`.
fn container_index<N>(catalogue: &StyleCatalogue, context: &CaretContext<N>) -> Option<usize> {
    context
        .ancestors
        .iter()
        .position(|el| catalogue.container_entry(&el.classes).is_some())
}

/// Classifies the caret position.
pub fn exit_state<N>(catalogue: &StyleCatalogue, context: &CaretContext<N>) -> ExitState {
    match container_index(catalogue, context) {
        Some(_) => ExitState::InsideStyledBlock,
        None => ExitState::Normal,
    }
}

/// Plans the reaction to Enter without Shift.
///
/// Returns an empty plan (default Enter handling) unless the caret sits in
/// an empty text block inside a styled container.
///
/// # Example
///
/// ```rust
/// use restyle::{plan_enter, CaretContext, ClassList, ElementSnapshot, StyleCatalogue, StyleEntry};
///
/// let catalogue = StyleCatalogue::new(vec![StyleEntry::block("Callout", "callout")]);
/// let context = CaretContext {
///     ancestors: vec![
///         ElementSnapshot { node: 2, tag: "p".into(), classes: ClassList::new(), empty: true },
///         ElementSnapshot { node: 1, tag: "div".into(), classes: ClassList::parse("callout"), empty: true },
///     ],
/// };
///
/// let plan = plan_enter(&catalogue, &context);
/// assert!(plan.prevent_default);
/// assert_eq!(plan.mutations.len(), 3);
/// ```
pub fn plan_enter<N: Clone>(catalogue: &StyleCatalogue, context: &CaretContext<N>) -> Plan<N> {
    let Some(index) = container_index(catalogue, context) else {
        return Plan::empty();
    };
    let container = &context.ancestors[index];

    let block = context.ancestors[..index]
        .iter()
        .find(|el| TEXT_FLOW_BLOCKS.contains(&el.tag.as_str()));

    match block {
        Some(block) if block.empty => vec![
            Mutation::InsertParagraphAfter(container.node.clone()),
            Mutation::RemoveNode(block.node.clone()),
            Mutation::CaretToInsertedParagraph,
        ]
        .into_iter()
        .collect::<Plan<N>>()
        .preventing_default(),
        _ => Plan::empty(),
    }
}
