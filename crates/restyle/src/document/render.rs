//! Serializing documents back to markup.

use indextree::NodeId;

use super::{Document, NodeData, Position, VOID_TAGS};

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

struct Writer<'d> {
    doc: &'d Document,
    marked: bool,
    out: String,
}

impl Writer<'_> {
    /// Selection markers that sit exactly at `position`.
    fn markers_at(&mut self, position: Position) {
        if !self.marked {
            return;
        }
        let selection = self.doc.selection;
        if selection.is_collapsed() {
            if selection.start == position {
                self.out.push('|');
            }
            return;
        }
        if selection.start == position {
            self.out.push('[');
        }
        if selection.end == position {
            self.out.push(']');
        }
    }

    fn node(&mut self, node: NodeId) {
        let doc = self.doc;
        match doc.data(node) {
            Some(NodeData::Text(text)) => self.text(node, text),
            Some(NodeData::Element(el)) => {
                let void = VOID_TAGS.contains(&el.tag.as_str());
                self.out.push('<');
                self.out.push_str(&el.tag);
                if !el.classes.is_empty() {
                    self.out.push_str(" class=\"");
                    escape_attribute(&el.classes.to_string(), &mut self.out);
                    self.out.push('"');
                }
                self.out.push('>');
                if void {
                    return;
                }
                self.children(node);
                self.out.push_str("</");
                self.out.push_str(&el.tag);
                self.out.push('>');
            }
            None => {}
        }
    }

    fn text(&mut self, node: NodeId, text: &str) {
        for (offset, c) in text.chars().enumerate() {
            self.markers_at(Position { node, offset });
            let mut buf = [0u8; 4];
            escape_text(c.encode_utf8(&mut buf), &mut self.out);
        }
        self.markers_at(Position {
            node,
            offset: text.chars().count(),
        });
    }

    fn children(&mut self, node: NodeId) {
        let doc = self.doc;
        let children = doc.children(node);
        for (offset, child) in children.iter().enumerate() {
            self.markers_at(Position { node, offset });
            self.node(*child);
        }
        self.markers_at(Position {
            node,
            offset: children.len(),
        });
    }
}

impl Document {
    fn render(&self, marked: bool) -> String {
        let mut writer = Writer {
            doc: self,
            marked,
            out: String::new(),
        };
        writer.children(self.body);
        writer.out
    }

    /// The document's markup, without the `body` wrapper.
    pub fn to_html(&self) -> String {
        self.render(false)
    }

    /// Like [`to_html`](Self::to_html), with selection markers.
    pub fn to_marked_html(&self) -> String {
        self.render(true)
    }
}
