//! Catalogue entries and their target kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::classes::ClassList;

/// Whether a style wraps whole blocks or inline runs of text.
///
/// Style definitions name the kind with a `type` string. Anything other than
/// `"inline"` (including a missing or null value) resolves to [`StyleKind::Block`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// Wraps the selected blocks in a container element.
    #[default]
    Block,
    /// Wraps the selected text in an inline element.
    Inline,
}

impl StyleKind {
    /// Resolves a `type` value from a style definition.
    ///
    /// | Input | Kind |
    /// |-------|------|
    /// | `"inline"` (any case, surrounding blanks ignored) | `Inline` |
    /// | `"block"` | `Block` |
    /// | anything else, or no value | `Block` |
    pub fn from_type_name(name: Option<&str>) -> Self {
        match name {
            Some(name) if name.trim().eq_ignore_ascii_case("inline") => StyleKind::Inline,
            _ => StyleKind::Block,
        }
    }

    /// Returns the lowercase name used in style definitions.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleKind::Block => "block",
            StyleKind::Inline => "inline",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One administrator-defined style.
///
/// Entries are decoded from objects such as:
///
/// ```json
/// { "title": "Alert", "classes": "alert alert-warn", "type": "block" }
/// ```
///
/// The settings default shape uses `label` and `class` for the same fields;
/// both spellings are accepted.
///
/// An entry whose class list is empty is inert: it still shows up in the
/// menu but applying it does nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct StyleEntry {
    /// Display label. The menu falls back to the class string when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// CSS classes applied by this style.
    pub classes: ClassList,
    /// Block or inline target.
    #[serde(rename = "type")]
    pub kind: StyleKind,
}

impl StyleEntry {
    /// Creates an entry with a title.
    pub fn new(title: impl Into<String>, classes: &str, kind: StyleKind) -> Self {
        Self {
            title: Some(title.into()),
            classes: ClassList::parse(classes),
            kind,
        }
    }

    /// Creates a block entry.
    pub fn block(title: impl Into<String>, classes: &str) -> Self {
        Self::new(title, classes, StyleKind::Block)
    }

    /// Creates an inline entry.
    pub fn inline(title: impl Into<String>, classes: &str) -> Self {
        Self::new(title, classes, StyleKind::Inline)
    }

    /// The label shown in menus: the title, or the class string when the
    /// title is missing or empty.
    pub fn label(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => self.classes.to_string(),
        }
    }

    /// Returns `true` if applying this entry can change the document.
    pub fn is_actionable(&self) -> bool {
        !self.classes.is_empty()
    }
}

/// Wire shape accepted for a single entry.
#[derive(Deserialize)]
struct RawEntry {
    #[serde(default, alias = "label")]
    title: Option<String>,
    #[serde(default, alias = "class")]
    classes: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl From<RawEntry> for StyleEntry {
    fn from(raw: RawEntry) -> Self {
        Self {
            title: raw.title,
            classes: raw.classes.as_deref().map(ClassList::parse).unwrap_or_default(),
            kind: StyleKind::from_type_name(raw.kind.as_deref()),
        }
    }
}
