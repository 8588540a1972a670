//! The adapter between catalogue styles and the host's named formats.

use tracing::{debug, trace};

use super::rule::{FormatRule, RuleName};
use crate::catalogue::{ClassList, StyleKind};
use crate::event::{EventOutcome, Mutation, Plan};
use crate::host::{EditorHost, PARAGRAPH_TAG};

/// Registers, toggles, queries and removes style rules on a host.
///
/// This is the only type that mutates the host document. Rules are
/// registered lazily: the first time a style is applied or queried its rule
/// is registered, and later registrations of the same name are skipped.
///
/// # Example
///
/// ```rust
/// use restyle::document::Document;
/// use restyle::{ClassList, FormatRegistry, StyleKind};
///
/// let mut doc = Document::parse("<p>[Hello]</p>").unwrap();
/// let classes = ClassList::parse("alert");
///
/// let mut formats = FormatRegistry::new(&mut doc);
/// formats.toggle(&classes, StyleKind::Block);
/// assert!(formats.is_active(&classes, StyleKind::Block));
///
/// assert_eq!(doc.to_html(), r#"<div class="alert"><p>Hello</p></div>"#);
/// ```
pub struct FormatRegistry<'h, H: EditorHost> {
    host: &'h mut H,
}

impl<'h, H: EditorHost> FormatRegistry<'h, H> {
    /// Wraps a host.
    pub fn new(host: &'h mut H) -> Self {
        Self { host }
    }

    /// Registers the rule for `classes` unless the host already knows it.
    ///
    /// Empty class lists name no rule and register nothing.
    pub fn ensure_registered(&mut self, classes: &ClassList, kind: StyleKind) -> Option<RuleName> {
        if classes.is_empty() {
            return None;
        }
        Some(self.ensure_rule(&FormatRule::new(classes.clone(), kind)))
    }

    fn ensure_rule(&mut self, rule: &FormatRule) -> RuleName {
        let name = rule.name();
        if !self.host.has_format(name.as_str()) {
            trace!(rule = %name, "registering format");
            self.host.register_format(name.as_str(), rule);
        }
        name
    }

    /// Applies the style if absent, removes it if it already covers the
    /// selection. Empty class lists do nothing.
    pub fn toggle(&mut self, classes: &ClassList, kind: StyleKind) {
        if let Some(name) = self.ensure_registered(classes, kind) {
            self.host.toggle_format(name.as_str());
        }
    }

    /// Whether the style matches the selection or caret.
    pub fn is_active(&mut self, classes: &ClassList, kind: StyleKind) -> bool {
        self.ensure_registered(classes, kind)
            .is_some_and(|name| self.host.match_format(name.as_str()))
    }

    /// Removes the style from the selection; does nothing when inactive.
    pub fn remove(&mut self, classes: &ClassList, kind: StyleKind) {
        if let Some(name) = self.ensure_registered(classes, kind) {
            self.remove_if_active(&name);
        }
    }

    fn remove_if_active(&mut self, name: &RuleName) {
        if self.host.match_format(name.as_str()) {
            self.host.remove_format(name.as_str());
        }
    }

    /// Runs a plan against the host.
    ///
    /// Mutations are applied in order. The paragraph created by
    /// [`Mutation::InsertParagraphAfter`] is remembered so that
    /// [`Mutation::CaretToInsertedParagraph`] can move the caret into it.
    pub fn execute(&mut self, plan: Plan<H::Node>) -> EventOutcome {
        let outcome = EventOutcome {
            default_prevented: plan.prevent_default,
        };
        let mut inserted: Option<H::Node> = None;

        for mutation in plan.mutations {
            match mutation {
                Mutation::RegisterFormat(rule) => {
                    self.ensure_rule(&rule);
                }
                Mutation::ToggleFormat(name) => {
                    debug!(rule = %name, "toggling format");
                    self.host.toggle_format(name.as_str());
                }
                Mutation::RemoveFormatIfActive(name) => self.remove_if_active(&name),
                Mutation::ResetBlocksToParagraph => self.host.format_block(PARAGRAPH_TAG),
                Mutation::StripSelectedBlockClasses(classes) => {
                    for block in self.host.selected_blocks() {
                        for class in classes.iter() {
                            self.host.remove_class(&block, class);
                        }
                    }
                }
                Mutation::InsertParagraphAfter(reference) => {
                    let paragraph = self.host.create_element(PARAGRAPH_TAG);
                    self.host.insert_after(&paragraph, &reference);
                    inserted = Some(paragraph);
                }
                Mutation::RemoveNode(node) => self.host.remove_node(&node),
                Mutation::CaretToInsertedParagraph => {
                    if let Some(paragraph) = &inserted {
                        self.host.set_cursor_location(paragraph, 0);
                    }
                }
            }
        }

        outcome
    }
}
