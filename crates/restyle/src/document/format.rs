//! How the reference document applies, matches and removes format rules.
//!
//! Block rules wrap the selected blocks in a `div`; inline rules wrap the
//! selected text in `span`s. A collapsed caret stands for the word around
//! it when an inline rule is applied or removed, and the selection covers
//! that word afterwards.

use indextree::NodeId;
use tracing::trace;

use super::{byte_index, Document, Element, NodeData, CONTAINER_TAGS};
use crate::catalogue::ClassList;
use crate::format::{FormatRule, BLOCK_ELEMENT};
use crate::host::PARAGRAPH_TAG;

/// Blocks `FormatBlock` leaves alone.
const KEEP_ON_RESET: &[&str] = &["li"];

impl Document {
    pub(super) fn apply_rule(&mut self, rule: &FormatRule) {
        match rule {
            FormatRule::Block { classes, .. } => self.wrap_blocks(classes),
            FormatRule::Inline { tag, classes } => {
                if let Some((start, end)) = self.inline_range() {
                    self.wrap_text(start, end, tag.as_str(), classes);
                }
            }
        }
    }

    pub(super) fn rule_matches(&self, rule: &FormatRule) -> bool {
        match rule {
            FormatRule::Block { classes, .. } => self
                .blocks_in_selection()
                .into_iter()
                .any(|block| self.styled_container(block, classes).is_some()),
            FormatRule::Inline { tag, classes } => {
                let nodes = if self.selection.is_collapsed() {
                    self.caret_text().into_iter().collect()
                } else {
                    let (start, end) = self.range();
                    self.text_in(start, end)
                };
                nodes
                    .into_iter()
                    .any(|n| self.inline_around(n, tag.as_str(), classes).is_some())
            }
        }
    }

    /// Whether the rule covers the whole selection.
    fn rule_covers(&self, rule: &FormatRule) -> bool {
        match rule {
            FormatRule::Block { classes, .. } => {
                let blocks = self.blocks_in_selection();
                !blocks.is_empty()
                    && blocks
                        .into_iter()
                        .all(|block| self.styled_container(block, classes).is_some())
            }
            FormatRule::Inline { tag, classes } => {
                let Some((start, end)) = self.inline_range() else {
                    return false;
                };
                let nodes = self.text_in(start, end);
                !nodes.is_empty()
                    && nodes
                        .into_iter()
                        .all(|n| self.inline_around(n, tag.as_str(), classes).is_some())
            }
        }
    }

    pub(super) fn toggle_rule(&mut self, rule: &FormatRule) {
        if self.rule_covers(rule) {
            self.remove_rule(rule);
        } else {
            self.apply_rule(rule);
        }
    }

    pub(super) fn remove_rule(&mut self, rule: &FormatRule) {
        match rule {
            FormatRule::Block { classes, .. } => self.unwrap_blocks(classes),
            FormatRule::Inline { tag, classes } => {
                if let Some((start, end)) = self.inline_range() {
                    self.unwrap_text(start, end, tag.as_str(), classes);
                }
            }
        }
    }

    /// Converts the selected blocks to `tag`, lifting them out of the
    /// wrappers above them. Unselected blocks keep their wrappers.
    pub(super) fn reset_blocks(&mut self, tag: &str) {
        let blocks = self.blocks_in_selection();

        let mut wrappers: Vec<NodeId> = Vec::new();
        for block in &blocks {
            for ancestor in block.ancestors(&self.arena).skip(1) {
                if ancestor == self.body {
                    break;
                }
                let is_wrapper = self
                    .tag(ancestor)
                    .is_some_and(|t| CONTAINER_TAGS.contains(&t));
                if is_wrapper && !wrappers.contains(&ancestor) {
                    wrappers.push(ancestor);
                }
            }
        }
        for wrapper in wrappers {
            if let Some((lo, hi)) = self.selected_run(wrapper, &blocks) {
                self.split_around(wrapper, lo, hi);
            }
            trace!(tag = ?self.tag(wrapper), "dissolving wrapper");
            self.unwrap(wrapper);
        }

        for block in blocks {
            if let Some(el) = self.element_mut(block) {
                if !KEEP_ON_RESET.contains(&el.tag.as_str()) {
                    el.tag = tag.to_string();
                }
            }
        }
    }

    // --- block rules -------------------------------------------------------

    /// The nearest `div` around `node` carrying every class.
    fn styled_container(&self, node: NodeId, classes: &ClassList) -> Option<NodeId> {
        node.ancestors(&self.arena)
            .take_while(|n| *n != self.body)
            .find(|n| {
                self.element(*n).is_some_and(|el| {
                    el.tag == BLOCK_ELEMENT && el.classes.contains_all(classes)
                })
            })
    }

    /// Whether `node` is a wrapper with exactly these classes.
    fn is_wrapper_with(&self, node: NodeId, classes: &ClassList) -> bool {
        self.element(node)
            .is_some_and(|el| el.tag == BLOCK_ELEMENT && el.classes == *classes)
    }

    /// The first and last children of `container` holding a selected block.
    fn selected_run(&self, container: NodeId, blocks: &[NodeId]) -> Option<(usize, usize)> {
        let touched: Vec<usize> = self
            .children(container)
            .into_iter()
            .enumerate()
            .filter(|(_, child)| blocks.iter().any(|b| self.is_ancestor_or_self(*child, *b)))
            .map(|(i, _)| i)
            .collect();
        Some((*touched.first()?, *touched.last()?))
    }

    fn wrap_blocks(&mut self, classes: &ClassList) {
        let blocks = self.blocks_in_selection();
        let Some(first) = blocks.first().copied() else {
            return;
        };

        let container = first
            .ancestors(&self.arena)
            .skip(1)
            .find(|n| {
                self.tag(*n).is_some_and(|t| CONTAINER_TAGS.contains(&t))
                    && blocks.iter().all(|b| self.is_ancestor_or_self(*n, *b))
            })
            .unwrap_or(self.body);

        let Some((lo, hi)) = self.selected_run(container, &blocks) else {
            return;
        };

        trace!(classes = %classes, count = hi - lo + 1, "wrapping blocks");
        let run = self.children(container)[lo..=hi].to_vec();
        let Some(mut wrapper) =
            self.wrap_siblings(&run, Element::new(BLOCK_ELEMENT, classes.clone()))
        else {
            return;
        };

        // Same-style wrappers inside the run dissolve into the new one.
        for child in self.children(wrapper) {
            if self.is_wrapper_with(child, classes) {
                self.unwrap(child);
            }
        }

        // Same-style neighbours merge with it.
        let previous = wrapper
            .preceding_siblings(&self.arena)
            .nth(1)
            .filter(|n| self.is_wrapper_with(*n, classes));
        if let Some(previous) = previous {
            self.move_to_end(wrapper, previous);
            self.unwrap(wrapper);
            wrapper = previous;
        }
        let next = wrapper
            .following_siblings(&self.arena)
            .nth(1)
            .filter(|n| self.is_wrapper_with(*n, classes));
        if let Some(next) = next {
            self.move_to_end(next, wrapper);
            self.unwrap(next);
        }
    }

    fn unwrap_blocks(&mut self, classes: &ClassList) {
        let blocks = self.blocks_in_selection();
        let mut containers: Vec<NodeId> = Vec::new();
        for block in &blocks {
            if let Some(container) = self.styled_container(*block, classes) {
                if !containers.contains(&container) {
                    containers.push(container);
                }
            }
        }

        for container in containers {
            // Only the selected run leaves the style.
            if let Some((lo, hi)) = self.selected_run(container, &blocks) {
                self.split_around(container, lo, hi);
            }

            let Some(el) = self.element_mut(container) else {
                continue;
            };
            for token in classes {
                el.classes.remove(token);
            }
            if !el.classes.is_empty() {
                continue;
            }

            let holds_blocks = self
                .children(container)
                .into_iter()
                .any(|n| self.is_block(n));
            if holds_blocks {
                trace!(classes = %classes, "unwrapping container");
                self.unwrap(container);
            } else if let Some(el) = self.element_mut(container) {
                el.tag = PARAGRAPH_TAG.to_string();
            }
        }
    }

    // --- inline rules ------------------------------------------------------

    /// The range inline rules act on: the selection, or the word at the caret.
    fn inline_range(&self) -> Option<(usize, usize)> {
        if !self.selection.is_collapsed() {
            let (start, end) = self.range();
            return (start < end).then_some((start, end));
        }

        let node = self.caret_text()?;
        let chars: Vec<char> = self.text(node)?.chars().collect();
        let base = self.text_before(node);
        let caret = self
            .absolute(self.selection.start)
            .saturating_sub(base)
            .min(chars.len());

        let mut start = caret;
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let mut end = caret;
        while end < chars.len() && !chars[end].is_whitespace() {
            end += 1;
        }
        (start < end).then_some((base + start, base + end))
    }

    /// The nearest inline element around a text node carrying every class.
    fn inline_around(&self, text: NodeId, tag: &str, classes: &ClassList) -> Option<NodeId> {
        text.ancestors(&self.arena)
            .skip(1)
            .take_while(|n| *n != self.body && !self.is_block(*n))
            .find(|n| self.is_inline_with(*n, tag, classes))
    }

    fn is_inline_with(&self, node: NodeId, tag: &str, classes: &ClassList) -> bool {
        self.element(node)
            .is_some_and(|el| el.tag == tag && el.classes.contains_all(classes))
    }

    /// Splits the text node spanning `absolute` so a node boundary falls there.
    fn split_text_at(&mut self, absolute: usize) {
        let Some((node, start, _)) = self
            .text_spans()
            .into_iter()
            .find(|(_, start, len)| *start < absolute && absolute < start + len)
        else {
            return;
        };

        let tail = match self.arena[node].get_mut() {
            NodeData::Text(text) => {
                let at = byte_index(text, absolute - start);
                text.split_off(at)
            }
            NodeData::Element(_) => return,
        };
        let tail = self.arena.new_node(NodeData::Text(tail));
        node.insert_after(tail, &mut self.arena);
    }

    /// Wraps one text node, joining an identical inline element right before it.
    fn wrap_text_node(&mut self, node: NodeId, tag: &str, classes: &ClassList) {
        let previous = node.preceding_siblings(&self.arena).nth(1).filter(|p| {
            self.element(*p)
                .is_some_and(|el| el.tag == tag && el.classes == *classes)
        });
        let wrapper = match previous {
            Some(wrapper) => wrapper,
            None => {
                let wrapper = self
                    .arena
                    .new_node(NodeData::Element(Element::new(tag, classes.clone())));
                node.insert_before(wrapper, &mut self.arena);
                wrapper
            }
        };
        wrapper.append(node, &mut self.arena);
    }

    fn wrap_text(&mut self, start: usize, end: usize, tag: &str, classes: &ClassList) {
        self.split_text_at(start);
        self.split_text_at(end);

        let nodes = self.text_in(start, end);
        trace!(classes = %classes, nodes = nodes.len(), "wrapping text");
        for node in nodes {
            if self.inline_around(node, tag, classes).is_none() {
                self.wrap_text_node(node, tag, classes);
            }
        }

        self.normalize_text();
        self.select_text(start, end);
    }

    fn unwrap_text(&mut self, start: usize, end: usize, tag: &str, classes: &ClassList) {
        self.split_text_at(start);
        self.split_text_at(end);

        let inside = self.text_in(start, end);
        let mut wrappers: Vec<NodeId> = Vec::new();
        for node in &inside {
            for ancestor in node.ancestors(&self.arena).skip(1) {
                if ancestor == self.body || self.is_block(ancestor) {
                    break;
                }
                if self.is_inline_with(ancestor, tag, classes) && !wrappers.contains(&ancestor) {
                    wrappers.push(ancestor);
                }
            }
        }
        trace!(classes = %classes, wrappers = wrappers.len(), "unwrapping text");

        for wrapper in wrappers {
            let outside: Vec<NodeId> = wrapper
                .descendants(&self.arena)
                .filter(|n| self.text(*n).is_some() && !inside.contains(n))
                .collect();

            let Some(el) = self.element_mut(wrapper) else {
                continue;
            };
            let original = el.classes.clone();
            for token in classes {
                el.classes.remove(token);
            }

            // Text outside the range keeps the format.
            let restore = if el.classes.is_empty() {
                self.unwrap(wrapper);
                original
            } else {
                classes.clone()
            };
            for node in outside {
                self.wrap_text_node(node, tag, &restore);
            }
        }

        self.normalize_text();
        self.select_text(start, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::StyleKind;

    fn block(classes: &str) -> FormatRule {
        FormatRule::new(ClassList::parse(classes), StyleKind::Block)
    }

    fn inline(classes: &str) -> FormatRule {
        FormatRule::new(ClassList::parse(classes), StyleKind::Inline)
    }

    fn apply(markup: &str, rule: &FormatRule) -> String {
        let mut doc = Document::parse(markup).unwrap();
        doc.apply_rule(rule);
        doc.to_marked_html()
    }

    fn remove(markup: &str, rule: &FormatRule) -> String {
        let mut doc = Document::parse(markup).unwrap();
        doc.remove_rule(rule);
        doc.to_marked_html()
    }

    #[test]
    fn test_block_wraps_contiguous_run() {
        assert_eq!(
            apply("<p>a</p><p>[b</p><h2>c</h2><p>d]</p><p>e</p>", &block("box")),
            r#"<p>a</p><div class="box"><p>[b</p><h2>c</h2><p>d]</p></div><p>e</p>"#
        );
    }

    #[test]
    fn test_block_wraps_whole_list() {
        assert_eq!(
            apply("<ul><li>[a</li><li>b]</li></ul>", &block("box")),
            r#"<div class="box"><ul><li>[a</li><li>b]</li></ul></div>"#
        );
    }

    #[test]
    fn test_block_wraps_inside_existing_container() {
        assert_eq!(
            apply(r#"<div class="outer"><p>a</p><p>|b</p></div>"#, &block("inner")),
            r#"<div class="outer"><p>a</p><div class="inner"><p>|b</p></div></div>"#
        );
    }

    #[test]
    fn test_block_match_needs_every_class() {
        let doc = Document::parse(r#"<div class="alert"><p>|x</p></div>"#).unwrap();
        assert!(doc.rule_matches(&block("alert")));
        assert!(!doc.rule_matches(&block("alert alert-warn")));
    }

    #[test]
    fn test_block_remove_keeps_other_classes() {
        assert_eq!(
            remove(r#"<div class="alert extra"><p>|x</p></div>"#, &block("alert")),
            r#"<div class="extra"><p>|x</p></div>"#
        );
    }

    #[test]
    fn test_block_remove_renames_inline_container() {
        assert_eq!(
            remove(r#"<div class="alert">x|y</div>"#, &block("alert")),
            "<p>x|y</p>"
        );
    }

    #[test]
    fn test_block_toggle_is_symmetric() {
        let mut doc = Document::parse("<p>[Hello]</p>").unwrap();
        let rule = block("alert alert-warn");
        doc.toggle_rule(&rule);
        assert_eq!(
            doc.to_marked_html(),
            r#"<div class="alert alert-warn"><p>[Hello]</p></div>"#
        );
        doc.toggle_rule(&rule);
        assert_eq!(doc.to_marked_html(), "<p>[Hello]</p>");
    }

    #[test]
    fn test_block_toggle_inside_larger_container_is_symmetric() {
        let fixture = r#"<div class="box"><p>a</p><p>[b]</p><p>c</p></div>"#;
        let mut doc = Document::parse(fixture).unwrap();
        let rule = block("box");

        doc.toggle_rule(&rule);
        assert_eq!(
            doc.to_marked_html(),
            r#"<div class="box"><p>a</p></div><p>[b]</p><div class="box"><p>c</p></div>"#
        );

        doc.toggle_rule(&rule);
        assert_eq!(doc.to_marked_html(), fixture);
    }

    #[test]
    fn test_block_remove_lifts_leading_run() {
        assert_eq!(
            remove(
                r#"<div class="alert extra"><p>[a</p><p>b]</p><p>c</p></div>"#,
                &block("alert")
            ),
            r#"<div class="extra"><p>[a</p><p>b]</p></div><div class="alert extra"><p>c</p></div>"#
        );
    }

    #[test]
    fn test_block_wrap_absorbs_same_style_container() {
        assert_eq!(
            apply(r#"<div class="box"><p>[a</p></div><p>b]</p>"#, &block("box")),
            r#"<div class="box"><p>[a</p><p>b]</p></div>"#
        );
    }

    #[test]
    fn test_block_wrap_merges_with_neighbours() {
        assert_eq!(
            apply(
                r#"<div class="box"><p>a</p></div><p>[b]</p><div class="box"><p>c</p></div>"#,
                &block("box")
            ),
            r#"<div class="box"><p>a</p><p>[b]</p><p>c</p></div>"#
        );
    }

    #[test]
    fn test_block_wrap_keeps_other_styles_apart() {
        assert_eq!(
            apply(r#"<div class="note"><p>a</p></div><p>[b]</p>"#, &block("box")),
            r#"<div class="note"><p>a</p></div><div class="box"><p>[b]</p></div>"#
        );
    }

    #[test]
    fn test_inline_wraps_selection() {
        assert_eq!(
            apply("<p>ab[cd]ef</p>", &inline("hl")),
            r#"<p>ab<span class="hl">[cd]</span>ef</p>"#
        );
    }

    #[test]
    fn test_inline_wraps_across_blocks() {
        assert_eq!(
            apply("<p>a[b</p><p>c]d</p>", &inline("hl")),
            r#"<p>a<span class="hl">[b</span></p><p><span class="hl">c]</span>d</p>"#
        );
    }

    #[test]
    fn test_inline_caret_expands_to_word() {
        assert_eq!(
            apply("<p>one tw|o three</p>", &inline("hl")),
            r#"<p>one <span class="hl">[two]</span> three</p>"#
        );
    }

    #[test]
    fn test_inline_caret_on_whitespace_does_nothing() {
        assert_eq!(apply("<p>one | two</p>", &inline("hl")), "<p>one | two</p>");
    }

    #[test]
    fn test_inline_joins_adjacent_span() {
        assert_eq!(
            apply(r#"<p><span class="hl">ab</span>[cd]</p>"#, &inline("hl")),
            r#"<p><span class="hl">ab[cd]</span></p>"#
        );
    }

    #[test]
    fn test_inline_remove_splits_span() {
        assert_eq!(
            remove(r#"<p><span class="hl">ab[cd]ef</span></p>"#, &inline("hl")),
            r#"<p><span class="hl">ab</span>[cd]<span class="hl">ef</span></p>"#
        );
    }

    #[test]
    fn test_inline_remove_keeps_other_classes() {
        assert_eq!(
            remove(r#"<p><span class="hl big">[ab]</span></p>"#, &inline("hl")),
            r#"<p><span class="big">[ab]</span></p>"#
        );
    }

    #[test]
    fn test_inline_toggle_is_symmetric() {
        let mut doc = Document::parse(r#"<p><span class="hl">ab</span>[cd]</p>"#).unwrap();
        let rule = inline("hl");
        doc.toggle_rule(&rule);
        doc.toggle_rule(&rule);
        assert_eq!(doc.to_marked_html(), r#"<p><span class="hl">ab</span>[cd]</p>"#);
    }

    #[test]
    fn test_inline_match_at_caret() {
        let doc = Document::parse(r#"<p>x <span class="hl">a|b</span></p>"#).unwrap();
        assert!(doc.rule_matches(&inline("hl")));
        let doc = Document::parse(r#"<p>x| <span class="hl">ab</span></p>"#).unwrap();
        assert!(!doc.rule_matches(&inline("hl")));
    }

    #[test]
    fn test_reset_dissolves_wrappers_and_keeps_classes() {
        let mut doc = Document::parse(
            r#"<div class="alert"><h2>[a</h2><ul><li>b</li></ul></div><div class="note">c]</div>"#,
        )
        .unwrap();
        doc.reset_blocks(PARAGRAPH_TAG);
        assert_eq!(
            doc.to_marked_html(),
            r#"<p>[a</p><ul><li>b</li></ul><p class="note">c]</p>"#
        );
    }

    #[test]
    fn test_reset_lifts_only_selected_blocks() {
        let mut doc = Document::parse(
            r#"<blockquote><div class="box"><h2>a</h2><h2>[b]</h2><p>c</p></div></blockquote>"#,
        )
        .unwrap();
        doc.reset_blocks(PARAGRAPH_TAG);
        assert_eq!(
            doc.to_marked_html(),
            concat!(
                r#"<blockquote><div class="box"><h2>a</h2></div></blockquote>"#,
                r#"<p>[b]</p>"#,
                r#"<blockquote><div class="box"><p>c</p></div></blockquote>"#,
            )
        );
    }
}
