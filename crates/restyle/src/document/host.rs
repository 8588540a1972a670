use indextree::NodeId;
use tracing::{trace, warn};

use super::{Document, Element, NodeData, Position, Selection};
use crate::catalogue::ClassList;
use crate::format::FormatRule;
use crate::host::EditorHost;
use crate::menu::{MenuButton, ToolbarButton};

impl Document {
    fn rule(&self, name: &str) -> Option<FormatRule> {
        let rule = self.formats.get(name).cloned();
        if rule.is_none() {
            warn!(rule = name, "format is not registered");
        }
        rule
    }
}

impl EditorHost for Document {
    type Node = NodeId;

    fn has_format(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    fn register_format(&mut self, name: &str, rule: &FormatRule) {
        trace!(rule = name, "format registered");
        self.formats.insert(name.to_string(), rule.clone());
    }

    fn toggle_format(&mut self, name: &str) {
        if let Some(rule) = self.rule(name) {
            trace!(rule = name, "toggle");
            self.toggle_rule(&rule);
        }
    }

    fn match_format(&self, name: &str) -> bool {
        self.formats
            .get(name)
            .is_some_and(|rule| self.rule_matches(rule))
    }

    fn remove_format(&mut self, name: &str) {
        if let Some(rule) = self.rule(name) {
            trace!(rule = name, "remove");
            self.remove_rule(&rule);
        }
    }

    fn format_block(&mut self, tag: &str) {
        trace!(tag, "format block");
        self.reset_blocks(tag);
    }

    fn selected_blocks(&self) -> Vec<NodeId> {
        self.blocks_in_selection()
    }

    fn selection_node(&self) -> NodeId {
        let start = self.selection.start.node;
        if self.text(start).is_some() {
            self.parent(start).unwrap_or(self.body)
        } else {
            start
        }
    }

    fn set_cursor_location(&mut self, node: &NodeId, offset: usize) {
        self.selection = Selection::caret(Position {
            node: *node,
            offset,
        });
    }

    fn ancestors(&self, node: &NodeId) -> Vec<NodeId> {
        node.ancestors(&self.arena)
            .take_while(|n| *n != self.body)
            .collect()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        match self.data(*node) {
            Some(NodeData::Element(el)) => el.tag.clone(),
            Some(NodeData::Text(_)) => String::from("#text"),
            None => String::new(),
        }
    }

    fn classes(&self, node: &NodeId) -> ClassList {
        self.element(*node)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    fn is_empty(&self, node: &NodeId) -> bool {
        self.is_blank(*node)
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(el) = self.element_mut(*node) {
            el.classes.remove(class);
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena
            .new_node(NodeData::Element(Element::new(tag, ClassList::new())))
    }

    fn insert_after(&mut self, node: &NodeId, reference: &NodeId) {
        trace!(?reference, "insert after");
        self.place_after(*node, *reference);
    }

    fn remove_node(&mut self, node: &NodeId) {
        if *node == self.body {
            return;
        }
        trace!(?node, "remove node");
        self.remove_subtree(*node);
    }

    fn push_content_style(&mut self, css: &str) {
        self.content_styles.push(css.to_string());
    }

    fn push_content_css(&mut self, url: &str) {
        self.content_css.push(url.to_string());
    }

    fn linked_stylesheets(&self) -> Vec<String> {
        self.stylesheets.clone()
    }

    fn link_stylesheet(&mut self, href: &str) {
        self.stylesheets.push(href.to_string());
    }

    fn add_menu_button(&mut self, name: &str, button: &MenuButton) {
        self.menu_buttons.push((name.to_string(), button.clone()));
    }

    fn add_button(&mut self, name: &str, button: &ToolbarButton) {
        self.buttons.push((name.to_string(), button.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::StyleKind;

    #[test]
    fn test_unregistered_format_is_ignored() {
        let mut doc = Document::parse("<p>[a]</p>").unwrap();
        doc.toggle_format("custom_block_nope");
        assert!(!doc.match_format("custom_block_nope"));
        assert_eq!(doc.to_html(), "<p>a</p>");
    }

    #[test]
    fn test_register_then_toggle() {
        let mut doc = Document::parse("<p>[a]</p>").unwrap();
        let rule = FormatRule::new(ClassList::parse("box"), StyleKind::Block);
        doc.register_format("custom_block_box", &rule);
        assert!(doc.has_format("custom_block_box"));
        doc.toggle_format("custom_block_box");
        assert!(doc.match_format("custom_block_box"));
        assert_eq!(doc.to_html(), r#"<div class="box"><p>a</p></div>"#);
    }

    #[test]
    fn test_selection_node_and_ancestors() {
        let doc = Document::parse(r#"<div class="box"><p>a|b</p></div>"#).unwrap();
        let node = doc.selection_node();
        assert_eq!(doc.tag_name(&node), "p");
        let tags: Vec<String> = doc
            .ancestors(&node)
            .iter()
            .map(|n| doc.tag_name(n))
            .collect();
        assert_eq!(tags, vec!["p", "div"]);
        assert_eq!(doc.classes(&doc.ancestors(&node)[1]).to_string(), "box");
    }

    #[test]
    fn test_insert_after_and_remove() {
        let mut doc = Document::parse(r#"<div class="box"><p>|</p></div>"#).unwrap();
        let div = doc.find("div").unwrap();
        let p = doc.find("p").unwrap();
        let fresh = doc.create_element("p");
        doc.insert_after(&fresh, &div);
        doc.remove_node(&p);
        doc.set_cursor_location(&fresh, 0);
        assert_eq!(doc.to_marked_html(), r#"<div class="box"></div><p>|</p>"#);
    }

    #[test]
    fn test_remove_class() {
        let mut doc = Document::parse(r#"<p class="a b">x</p>"#).unwrap();
        let p = doc.find("p").unwrap();
        doc.remove_class(&p, "a");
        doc.remove_class(&p, "missing");
        assert_eq!(doc.to_html(), r#"<p class="b">x</p>"#);
    }
}
