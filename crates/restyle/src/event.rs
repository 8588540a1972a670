//! Editor events and the plans computed from them.
//!
//! The engine never touches the document while deciding what to do. Each
//! event is turned into a [`Plan`]: an ordered list of [`Mutation`]s computed
//! from the event, the catalogue and, for key presses, a snapshot of the
//! caret's surroundings. The plan is then executed against the host by
//! [`FormatRegistry::execute`](crate::FormatRegistry::execute), which is the
//! only place mutations happen.

use crate::catalogue::{ClassList, StyleKind};
use crate::format::{FormatRule, RuleName};
use crate::menu::MenuAction;

/// The events the engine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The Enter key was pressed.
    KeyEnter { shift: bool },
    /// A menu item or toolbar button was activated.
    MenuActivate(MenuAction),
    /// A caller asked for a style to be toggled directly.
    FormatToggleRequested { classes: ClassList, kind: StyleKind },
}

/// One change to apply to the host document.
///
/// `N` is the host's node handle type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<N> {
    /// Register the rule unless the host already knows its name.
    RegisterFormat(FormatRule),
    /// Toggle a registered rule on the selection.
    ToggleFormat(RuleName),
    /// Remove a rule from the selection if it is active there.
    RemoveFormatIfActive(RuleName),
    /// Turn every selected block into a plain paragraph.
    ResetBlocksToParagraph,
    /// Strip the given tokens from every currently selected block.
    ///
    /// Blocks are collected when the mutation runs, so earlier mutations in
    /// the same plan are taken into account.
    StripSelectedBlockClasses(ClassList),
    /// Create an empty paragraph right after the node.
    InsertParagraphAfter(N),
    /// Remove the node and its content.
    RemoveNode(N),
    /// Put the caret at the start of the paragraph created by this plan.
    CaretToInsertedParagraph,
}

/// An ordered list of mutations plus the fate of the host's default action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan<N> {
    /// Suppress the host's own handling of the event.
    pub prevent_default: bool,
    /// Mutations, applied in order.
    pub mutations: Vec<Mutation<N>>,
}

impl<N> Plan<N> {
    /// A plan that changes nothing.
    pub fn empty() -> Self {
        Self {
            prevent_default: false,
            mutations: Vec::new(),
        }
    }

    /// Returns `true` if the plan neither mutates nor prevents anything.
    pub fn is_empty(&self) -> bool {
        !self.prevent_default && self.mutations.is_empty()
    }

    /// Appends a mutation.
    pub fn push(&mut self, mutation: Mutation<N>) {
        self.mutations.push(mutation);
    }

    /// Marks the host's default action as suppressed.
    pub fn preventing_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}

impl<N> Default for Plan<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<N> FromIterator<Mutation<N>> for Plan<N> {
    fn from_iter<I: IntoIterator<Item = Mutation<N>>>(iter: I) -> Self {
        Self {
            prevent_default: false,
            mutations: iter.into_iter().collect(),
        }
    }
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The host must skip its default handling of the event.
    pub default_prevented: bool,
}
