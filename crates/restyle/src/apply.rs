//! Applying and clearing catalogue styles.
//!
//! Both operations return a [`Plan`]; nothing happens until the plan is
//! executed by a [`FormatRegistry`](crate::FormatRegistry).
//!
//! # Clearing
//!
//! [`clear_all_classes`] works in three passes:
//!
//! 1. Every selected block is reset to a plain paragraph. This is a coarse
//!    reset that removes any block formatting, catalogue-defined or not.
//! 2. The selected blocks are collected again and every class token used by
//!    a block style is stripped from them. A reset can leave the class
//!    attribute of a converted container behind; this pass removes it.
//! 3. Every inline style still active in the selection is removed.
//!
//! When the catalogue could not be parsed, only the first pass runs.

use crate::catalogue::{ClassList, StyleCatalogue, StyleKind};
use crate::event::{Mutation, Plan};
use crate::format::FormatRule;

/// Plans a toggle of `classes` as a `kind` style.
///
/// Empty class lists produce an empty plan. Executing the plan twice on an
/// unchanged selection leaves the document as it was.
///
/// # Example
///
/// ```rust
/// use restyle::{apply_class, ClassList, Mutation, StyleKind};
///
/// let plan = apply_class::<usize>(&ClassList::parse("note"), StyleKind::Block);
/// assert_eq!(plan.mutations.len(), 2);
/// assert!(matches!(plan.mutations[1], Mutation::ToggleFormat(_)));
///
/// assert!(apply_class::<usize>(&ClassList::new(), StyleKind::Inline).is_empty());
/// ```
pub fn apply_class<N>(classes: &ClassList, kind: StyleKind) -> Plan<N> {
    if classes.is_empty() {
        return Plan::empty();
    }
    let rule = FormatRule::new(classes.clone(), kind);
    let name = rule.name();
    vec![Mutation::RegisterFormat(rule), Mutation::ToggleFormat(name)]
        .into_iter()
        .collect()
}

/// Plans the removal of every catalogue style from the selection.
pub fn clear_all_classes<N>(catalogue: &StyleCatalogue) -> Plan<N> {
    let mut plan = Plan::empty();
    plan.push(Mutation::ResetBlocksToParagraph);

    if !catalogue.is_well_formed() {
        return plan;
    }

    let block_classes = catalogue.block_classes();
    if !block_classes.is_empty() {
        plan.push(Mutation::StripSelectedBlockClasses(block_classes));
    }

    for entry in catalogue.inline_entries().filter(|e| e.is_actionable()) {
        let rule = FormatRule::for_entry(entry);
        let name = rule.name();
        plan.push(Mutation::RegisterFormat(rule));
        plan.push(Mutation::RemoveFormatIfActive(name));
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::StyleEntry;
    use crate::format::rule_name_for;

    fn catalogue() -> StyleCatalogue {
        StyleCatalogue::new(vec![
            StyleEntry::block("Alert", "alert alert-warn"),
            StyleEntry::inline("Mark", "hl"),
            StyleEntry::block("Note", "note alert"),
            StyleEntry::inline("Inert", ""),
        ])
    }

    #[test]
    fn test_apply_class_registers_then_toggles() {
        let classes = ClassList::parse("alert alert-warn");
        let plan = apply_class::<u8>(&classes, StyleKind::Block);
        assert_eq!(
            plan.mutations,
            vec![
                Mutation::RegisterFormat(FormatRule::new(classes.clone(), StyleKind::Block)),
                Mutation::ToggleFormat(rule_name_for(&classes, StyleKind::Block)),
            ]
        );
        assert!(!plan.prevent_default);
    }

    #[test]
    fn test_apply_empty_classes_is_noop() {
        assert!(apply_class::<u8>(&ClassList::parse("  "), StyleKind::Block).is_empty());
    }

    #[test]
    fn test_clear_plan_order() {
        let plan = clear_all_classes::<u8>(&catalogue());
        let hl = ClassList::parse("hl");
        assert_eq!(
            plan.mutations,
            vec![
                Mutation::ResetBlocksToParagraph,
                Mutation::StripSelectedBlockClasses(ClassList::parse("alert alert-warn note")),
                Mutation::RegisterFormat(FormatRule::new(hl.clone(), StyleKind::Inline)),
                Mutation::RemoveFormatIfActive(rule_name_for(&hl, StyleKind::Inline)),
            ]
        );
    }

    #[test]
    fn test_clear_with_malformed_catalogue_only_resets() {
        let plan = clear_all_classes::<u8>(&StyleCatalogue::malformed());
        assert_eq!(plan.mutations, vec![Mutation::ResetBlocksToParagraph]);
    }

    #[test]
    fn test_clear_without_block_styles_skips_strip() {
        let catalogue = StyleCatalogue::new(vec![StyleEntry::inline("Mark", "hl")]);
        let plan = clear_all_classes::<u8>(&catalogue);
        assert!(!plan
            .mutations
            .iter()
            .any(|m| matches!(m, Mutation::StripSelectedBlockClasses(_))));
    }
}
