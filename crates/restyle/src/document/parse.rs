//! Markup fixtures with selection markers.

use indextree::NodeId;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::{Document, Element, NodeData, Position, Selection};
use crate::catalogue::ClassList;

/// Errors from parsing a document fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("closing tag </{0}> has no open element")]
    UnexpectedClose(String),

    #[error("invalid selection markers: {0}")]
    Selection(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    End,
    Caret,
}

impl Marker {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '[' => Some(Marker::Start),
            ']' => Some(Marker::End),
            '|' => Some(Marker::Caret),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Markers {
    start: Option<Position>,
    end: Option<Position>,
    caret: Option<Position>,
}

impl Markers {
    fn record(&mut self, marker: Marker, position: Position) -> Result<(), FixtureError> {
        let slot = match marker {
            Marker::Start => &mut self.start,
            Marker::End => {
                if self.start.is_none() {
                    return Err(FixtureError::Selection("`]` before `[`"));
                }
                &mut self.end
            }
            Marker::Caret => &mut self.caret,
        };
        if slot.is_some() {
            return Err(FixtureError::Selection("marker used twice"));
        }
        *slot = Some(position);
        Ok(())
    }

    fn into_selection(self) -> Result<Option<Selection>, FixtureError> {
        match (self.start, self.end, self.caret) {
            (None, None, None) => Ok(None),
            (None, None, Some(caret)) => Ok(Some(Selection::caret(caret))),
            (Some(start), Some(end), None) => Ok(Some(Selection { start, end })),
            (Some(_), None, _) => Err(FixtureError::Selection("`[` without `]`")),
            _ => Err(FixtureError::Selection("`|` mixed with a range")),
        }
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, FixtureError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let mut classes = ClassList::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref().eq_ignore_ascii_case(b"class") {
            classes = ClassList::parse(&attribute.unescape_value()?);
        }
    }
    Ok(Element::new(&tag, classes))
}

impl Document {
    /// Parses a fixture.
    ///
    /// The markup must be well formed: void elements are written `<br/>`.
    /// Without markers the caret sits at the start of the document.
    pub fn parse(markup: &str) -> Result<Self, FixtureError> {
        let mut doc = Document::default();
        let mut markers = Markers::default();
        let mut stack: Vec<NodeId> = vec![doc.body];

        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text(false);

        loop {
            let parent = *stack.last().unwrap_or(&doc.body);
            match reader.read_event()? {
                Event::Start(start) => {
                    let element = element_from(&start)?;
                    let node = doc.arena.new_node(NodeData::Element(element));
                    parent.append(node, &mut doc.arena);
                    stack.push(node);
                }
                Event::Empty(start) => {
                    let element = element_from(&start)?;
                    let node = doc.arena.new_node(NodeData::Element(element));
                    parent.append(node, &mut doc.arena);
                }
                Event::End(end) => {
                    if stack.len() == 1 {
                        let tag = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                        return Err(FixtureError::UnexpectedClose(tag));
                    }
                    stack.pop();
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    doc.push_text(parent, &text, &mut markers)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data).into_owned();
                    doc.push_text(parent, &text, &mut markers)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if stack.len() > 1 {
            let open = stack.last().and_then(|n| doc.tag(*n)).unwrap_or_default();
            return Err(FixtureError::Unclosed(open.to_string()));
        }

        if let Some(selection) = markers.into_selection()? {
            doc.selection = selection;
        }
        Ok(doc)
    }

    /// Appends a text run, lifting selection markers out of it.
    fn push_text(
        &mut self,
        parent: NodeId,
        raw: &str,
        markers: &mut Markers,
    ) -> Result<(), FixtureError> {
        let mut text = String::new();
        let mut found = Vec::new();
        for c in raw.chars() {
            match Marker::from_char(c) {
                Some(marker) => found.push((marker, text.chars().count())),
                None => text.push(c),
            }
        }

        if text.trim().is_empty() {
            let offset = parent.children(&self.arena).count();
            for (marker, _) in found {
                markers.record(marker, Position { node: parent, offset })?;
            }
            return Ok(());
        }

        let node = self.arena.new_node(NodeData::Text(text));
        parent.append(node, &mut self.arena);
        for (marker, offset) in found {
            markers.record(marker, Position { node, offset })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_classes_and_lowercases_tags() {
        let doc = Document::parse(r#"<P CLASS="a  b" id="x">Hi</P>"#).unwrap();
        let p = doc.find("p").unwrap();
        assert_eq!(doc.element(p).unwrap().classes.to_string(), "a b");
        assert_eq!(doc.to_html(), r#"<p class="a b">Hi</p>"#);
    }

    #[test]
    fn test_parse_range_markers() {
        let doc = Document::parse("<p>a[b</p><p>c]d</p>").unwrap();
        let selection = doc.selection();
        assert_eq!(doc.text(selection.start.node), Some("ab"));
        assert_eq!(selection.start.offset, 1);
        assert_eq!(doc.text(selection.end.node), Some("cd"));
        assert_eq!(selection.end.offset, 1);
    }

    #[test]
    fn test_parse_caret_in_empty_element() {
        let doc = Document::parse("<p>|</p>").unwrap();
        let p = doc.find("p").unwrap();
        assert_eq!(doc.selection().start, Position { node: p, offset: 0 });
        assert!(doc.selection().is_collapsed());
    }

    #[test]
    fn test_parse_unescapes_text() {
        let doc = Document::parse("<p>a &amp; b &lt;c&gt;</p>").unwrap();
        assert_eq!(doc.text_content(), "a & b <c>");
        assert_eq!(doc.to_html(), "<p>a &amp; b &lt;c&gt;</p>");
    }

    #[test]
    fn test_parse_void_elements() {
        let doc = Document::parse("<p>a<br/>b</p><hr/>").unwrap();
        assert_eq!(doc.to_html(), "<p>a<br>b</p><hr>");
    }

    #[test]
    fn test_parse_rejects_bad_markers() {
        assert!(matches!(
            Document::parse("<p>a]b[</p>"),
            Err(FixtureError::Selection(_))
        ));
        assert!(matches!(
            Document::parse("<p>[ab</p>"),
            Err(FixtureError::Selection(_))
        ));
        assert!(matches!(
            Document::parse("<p>|a[b]</p>"),
            Err(FixtureError::Selection(_))
        ));
        assert!(matches!(
            Document::parse("<p>||</p>"),
            Err(FixtureError::Selection(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unbalanced_markup() {
        assert!(Document::parse("<p>a").is_err());
        assert!(Document::parse("<p>a</p></div>").is_err());
    }
}
