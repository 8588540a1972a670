//! Format rules derived from catalogue entries.

use std::borrow::Borrow;
use std::fmt;

use crate::catalogue::{ClassList, StyleEntry, StyleKind};

/// Prefix of every block rule name.
pub const BLOCK_RULE_PREFIX: &str = "custom_block_";

/// Prefix of every inline rule name.
pub const INLINE_RULE_PREFIX: &str = "custom_inline_";

/// Element created by block rules.
pub const BLOCK_ELEMENT: &str = "div";

/// The deterministic name a rule is registered under.
///
/// The name is the kind prefix followed by the class tokens joined with `_`,
/// so equal class lists always produce equal names.
///
/// # Example
///
/// ```rust
/// use restyle::{rule_name_for, ClassList, StyleKind};
///
/// let name = rule_name_for(&ClassList::parse("alert  alert-warn"), StyleKind::Block);
/// assert_eq!(name.as_str(), "custom_block_alert_alert-warn");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleName(String);

impl RuleName {
    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Computes the rule name for a class list and kind.
pub fn rule_name_for(classes: &ClassList, kind: StyleKind) -> RuleName {
    let prefix = match kind {
        StyleKind::Block => BLOCK_RULE_PREFIX,
        StyleKind::Inline => INLINE_RULE_PREFIX,
    };
    RuleName(format!("{}{}", prefix, classes.join("_")))
}

/// Inline element used by inline rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InlineTag {
    #[default]
    Span,
}

impl InlineTag {
    /// Lowercase tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            InlineTag::Span => "span",
        }
    }
}

/// A named transformation registered with the host.
///
/// Block rules wrap the selected blocks in a `div` carrying the classes. The
/// `wrapper` flag tells the host the container may hold other blocks (lists,
/// headings, paragraphs) which must survive wrapping. Inline rules wrap the
/// selected text in an inline element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatRule {
    Block { classes: ClassList, wrapper: bool },
    Inline { tag: InlineTag, classes: ClassList },
}

impl FormatRule {
    /// Builds the rule for a class list and kind.
    pub fn new(classes: ClassList, kind: StyleKind) -> Self {
        match kind {
            StyleKind::Block => FormatRule::Block {
                classes,
                wrapper: true,
            },
            StyleKind::Inline => FormatRule::Inline {
                tag: InlineTag::Span,
                classes,
            },
        }
    }

    /// The rule for a catalogue entry.
    pub fn for_entry(entry: &StyleEntry) -> Self {
        Self::new(entry.classes.clone(), entry.kind)
    }

    /// The kind this rule targets.
    pub fn kind(&self) -> StyleKind {
        match self {
            FormatRule::Block { .. } => StyleKind::Block,
            FormatRule::Inline { .. } => StyleKind::Inline,
        }
    }

    /// The classes the rule applies.
    pub fn classes(&self) -> &ClassList {
        match self {
            FormatRule::Block { classes, .. } | FormatRule::Inline { classes, .. } => classes,
        }
    }

    /// Tag of the element the rule creates.
    pub fn element(&self) -> &'static str {
        match self {
            FormatRule::Block { .. } => BLOCK_ELEMENT,
            FormatRule::Inline { tag, .. } => tag.as_str(),
        }
    }

    /// Whether other blocks may nest inside the created element.
    pub fn is_wrapper(&self) -> bool {
        matches!(self, FormatRule::Block { wrapper: true, .. })
    }

    /// The name this rule registers under.
    pub fn name(&self) -> RuleName {
        rule_name_for(self.classes(), self.kind())
    }
}
