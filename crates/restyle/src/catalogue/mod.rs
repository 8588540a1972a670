//! The style catalogue: administrator-defined classes offered to authors.
//!
//! This module provides:
//!
//! - [`ClassList`]: an ordered set of CSS class tokens
//! - [`StyleEntry`] and [`StyleKind`]: one named style and its target
//! - [`StyleCatalogue`]: the parsed, read-only list of entries
//! - [`CatalogueSource`]: raw catalogue input, encoded or already decoded
//!
//! # Accepted shapes
//!
//! A catalogue is either a bare array of entries or an object carrying the
//! array under `styles`:
//!
//! ```json
//! [{ "title": "Alert", "classes": "alert alert-warn", "type": "block" }]
//! ```
//!
//! ```json
//! { "css": ".test { color: red; }",
//!   "styles": [{ "label": "Test Style", "class": "test", "type": "inline" }] }
//! ```
//!
//! # Failure handling
//!
//! Parsing never fails. Undecodable input produces an empty catalogue that
//! reports [`StyleCatalogue::is_well_formed`] as `false`, and the problem is
//! logged. A single bad entry is skipped without discarding its neighbours.

mod classes;
mod entry;

pub use classes::ClassList;
pub use entry::{StyleEntry, StyleKind};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

/// Catalogue input as found in editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogueSource {
    /// JSON text, decoded when the catalogue is parsed.
    Encoded(String),
    /// An already-decoded document.
    Structured(Value),
}

impl Default for CatalogueSource {
    fn default() -> Self {
        CatalogueSource::Encoded(String::from("[]"))
    }
}

impl From<&str> for CatalogueSource {
    fn from(raw: &str) -> Self {
        CatalogueSource::Encoded(raw.to_string())
    }
}

impl From<Value> for CatalogueSource {
    fn from(value: Value) -> Self {
        CatalogueSource::Structured(value)
    }
}

/// An ordered, read-only list of styles.
///
/// Entry order is menu order. A catalogue is parsed once per editor session
/// and never edited afterwards.
///
/// # Example
///
/// ```rust
/// use restyle::{StyleCatalogue, StyleKind};
///
/// let catalogue = StyleCatalogue::from_json_str(
///     r#"[{"title":"Alert","classes":"alert alert-warn","type":"block"}]"#,
/// );
/// assert_eq!(catalogue.len(), 1);
/// assert_eq!(catalogue.entries()[0].kind, StyleKind::Block);
///
/// let broken = StyleCatalogue::from_json_str("{not valid");
/// assert!(broken.is_empty());
/// assert!(!broken.is_well_formed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCatalogue {
    entries: Vec<StyleEntry>,
    well_formed: bool,
}

impl StyleCatalogue {
    /// Creates a catalogue from entries.
    pub fn new(entries: Vec<StyleEntry>) -> Self {
        Self {
            entries,
            well_formed: true,
        }
    }

    /// The fallback used when input cannot be decoded.
    pub fn malformed() -> Self {
        Self {
            entries: Vec::new(),
            well_formed: false,
        }
    }

    /// Parses either form of catalogue input.
    pub fn parse(raw: &CatalogueSource) -> Self {
        match raw {
            CatalogueSource::Encoded(text) => Self::from_json_str(text),
            CatalogueSource::Structured(value) => Self::from_value(value),
        }
    }

    /// Decodes JSON text. Blank text is an empty, well-formed catalogue.
    pub fn from_json_str(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(err) => {
                error!(error = %err, "error parsing style JSON; using an empty catalogue");
                Self::malformed()
            }
        }
    }

    /// Reads a decoded document.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::from_items(items),
            Value::Object(map) => match map.get("styles") {
                Some(Value::Array(items)) => Self::from_items(items),
                _ => {
                    error!("style definition object has no \"styles\" array; using an empty catalogue");
                    Self::malformed()
                }
            },
            Value::Null => Self::default(),
            other => {
                error!(found = %kind_of(other), "style definition is not a list; using an empty catalogue");
                Self::malformed()
            }
        }
    }

    fn from_items(items: &[Value]) -> Self {
        let entries = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match StyleEntry::deserialize(item) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(index, error = %err, "skipping undecodable style entry");
                    None
                }
            })
            .collect();
        Self::new(entries)
    }

    /// Encodes the entries as a JSON array with `title`, `classes` and `type`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }

    /// All entries in menu order.
    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, StyleEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `false` when the input could not be read as a list of entries.
    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }

    /// Entries that target blocks.
    pub fn block_entries(&self) -> impl Iterator<Item = &StyleEntry> {
        self.entries.iter().filter(|e| e.kind == StyleKind::Block)
    }

    /// Entries that target inline text.
    pub fn inline_entries(&self) -> impl Iterator<Item = &StyleEntry> {
        self.entries.iter().filter(|e| e.kind == StyleKind::Inline)
    }

    /// Every class token used by a block entry, de-duplicated.
    pub fn block_classes(&self) -> ClassList {
        let mut all = ClassList::new();
        for entry in self.block_entries() {
            all.union_with(&entry.classes);
        }
        all
    }

    /// The first block entry whose classes are all present on `element`.
    ///
    /// An element for which this returns `Some` is a styled container.
    pub fn container_entry(&self, element: &ClassList) -> Option<&StyleEntry> {
        self.block_entries()
            .find(|entry| element.contains_all(&entry.classes))
    }
}

impl Default for StyleCatalogue {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a> IntoIterator for &'a StyleCatalogue {
    type Item = &'a StyleEntry;
    type IntoIter = std::slice::Iter<'a, StyleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_array() {
        let catalogue = StyleCatalogue::from_json_str(
            r#"[
                {"title":"Alert","classes":"alert alert-warn","type":"block"},
                {"title":"Mark","classes":"hl","type":"inline"}
            ]"#,
        );
        assert!(catalogue.is_well_formed());
        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.entries()[1].kind, StyleKind::Inline);
    }

    #[test]
    fn test_parse_settings_object() {
        let catalogue = StyleCatalogue::from_json_str(
            r#"{"css":".test { color: red; }","styles":[{"label":"Test Style","class":"test","type":"inline"}]}"#,
        );
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.entries()[0].label(), "Test Style");
        assert_eq!(catalogue.entries()[0].classes.to_string(), "test");
    }

    #[test]
    fn test_parse_invalid_json_is_malformed() {
        let catalogue = StyleCatalogue::from_json_str("{not valid");
        assert!(catalogue.is_empty());
        assert!(!catalogue.is_well_formed());
    }

    #[test]
    fn test_parse_wrong_shapes_are_malformed() {
        assert!(!StyleCatalogue::from_value(&json!({"other": []})).is_well_formed());
        assert!(!StyleCatalogue::from_value(&json!("text")).is_well_formed());
        assert!(!StyleCatalogue::from_value(&json!(3)).is_well_formed());
    }

    #[test]
    fn test_parse_blank_and_null_are_empty_but_well_formed() {
        assert!(StyleCatalogue::from_json_str("   ").is_well_formed());
        assert!(StyleCatalogue::from_value(&Value::Null).is_well_formed());
        assert!(StyleCatalogue::from_json_str("null").is_empty());
    }

    #[test]
    fn test_bad_entry_is_skipped() {
        let catalogue = StyleCatalogue::from_value(&json!([
            {"title": "Good", "classes": "good"},
            {"title": 12, "classes": "bad"},
            "not an object",
            {"title": "Also good", "classes": "fine", "type": "inline"}
        ]));
        assert!(catalogue.is_well_formed());
        let labels: Vec<_> = catalogue.iter().map(StyleEntry::label).collect();
        assert_eq!(labels, vec!["Good", "Also good"]);
    }

    #[test]
    fn test_structured_source() {
        let source = CatalogueSource::from(json!([{"classes": "a"}]));
        assert_eq!(StyleCatalogue::parse(&source).len(), 1);
    }

    #[test]
    fn test_block_classes_dedup() {
        let catalogue = StyleCatalogue::new(vec![
            StyleEntry::block("A", "box box-a"),
            StyleEntry::inline("I", "box-i"),
            StyleEntry::block("B", "box box-b"),
            StyleEntry::block("Empty", ""),
        ]);
        assert_eq!(catalogue.block_classes().to_string(), "box box-a box-b");
    }

    #[test]
    fn test_container_entry_requires_every_token() {
        let catalogue = StyleCatalogue::new(vec![
            StyleEntry::block("Alert", "alert alert-warn"),
            StyleEntry::inline("Hl", "alert"),
        ]);
        assert!(catalogue
            .container_entry(&ClassList::parse("alert-warn alert extra"))
            .is_some());
        assert!(catalogue.container_entry(&ClassList::parse("alert")).is_none());
    }

    #[test]
    fn test_to_json_round_trip() {
        let catalogue = StyleCatalogue::new(vec![
            StyleEntry::block("Alert", "alert alert-warn"),
            StyleEntry::inline("Mark", "hl"),
        ]);
        let json = catalogue.to_json().unwrap();
        assert_eq!(StyleCatalogue::from_json_str(&json), catalogue);
    }
}
