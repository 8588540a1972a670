//! Format rules and the host adapter that applies them.
//!
//! - [`FormatRule`]: the block or inline transformation for a class list
//! - [`RuleName`] and [`rule_name_for`]: deterministic rule naming
//! - [`FormatRegistry`]: registers, toggles, matches and removes rules on an
//!   [`EditorHost`](crate::EditorHost), and executes [`Plan`](crate::Plan)s

mod registry;
mod rule;

pub use registry::FormatRegistry;
pub use rule::{
    rule_name_for, FormatRule, InlineTag, RuleName, BLOCK_ELEMENT, BLOCK_RULE_PREFIX,
    INLINE_RULE_PREFIX,
};
