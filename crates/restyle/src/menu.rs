//! Menu items and toolbar buttons built from the catalogue.

use serde::Serialize;

use crate::catalogue::{ClassList, StyleCatalogue, StyleKind};
use crate::settings::Labels;

/// Registration name of the dropdown menu button.
pub const MENU_BUTTON_NAME: &str = "restyle_styles";

/// Registration name of the separate clear button.
pub const CLEAR_BUTTON_NAME: &str = "restyle_clear";

/// Marker class hosts may put on rendered style items.
pub const PREVIEW_ITEM_CLASS: &str = "restyle-style-item";

/// Icon of the dropdown button.
pub const MENU_ICON: &str = "color-levels";

/// Icon of the clear item and clear button.
pub const CLEAR_ICON: &str = "invert";

/// What activating a menu item or button does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MenuAction {
    /// Remove every catalogue style from the selection.
    ClearAll,
    /// Toggle one style.
    Apply { classes: ClassList, kind: StyleKind },
}

/// One entry of the styles dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: String,
    pub icon: Option<&'static str>,
    pub action: MenuAction,
    /// Classes a host may add to the rendered item so it previews the style.
    /// Purely cosmetic.
    pub preview_classes: ClassList,
}

/// The dropdown button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuButton {
    pub icon: &'static str,
    pub tooltip: String,
}

/// A plain toolbar button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarButton {
    pub icon: &'static str,
    pub tooltip: String,
    pub action: MenuAction,
}

/// The buttons a session registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolbar {
    pub menu: MenuButton,
    /// Present only when clearing has its own button.
    pub clear: Option<ToolbarButton>,
}

fn clear_item(labels: &Labels) -> MenuItem {
    MenuItem {
        label: labels.clear_styles.clone(),
        icon: Some(CLEAR_ICON),
        action: MenuAction::ClearAll,
        preview_classes: ClassList::new(),
    }
}

/// Builds the dropdown items.
///
/// When clearing has no button of its own (`show_clear_button` is `false`)
/// the clear item comes first. Every catalogue entry follows in order,
/// labelled with its title or, failing that, its classes.
///
/// # Example
///
/// ```rust
/// use restyle::{build_menu_items, Labels, MenuAction, StyleCatalogue, StyleEntry};
///
/// let catalogue = StyleCatalogue::new(vec![StyleEntry::block("Alert", "alert")]);
///
/// let items = build_menu_items(&catalogue, false, &Labels::default());
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[0].action, MenuAction::ClearAll);
/// assert_eq!(items[1].label, "Alert");
///
/// assert_eq!(build_menu_items(&catalogue, true, &Labels::default()).len(), 1);
/// ```
pub fn build_menu_items(
    catalogue: &StyleCatalogue,
    show_clear_button: bool,
    labels: &Labels,
) -> Vec<MenuItem> {
    let clear = (!show_clear_button).then(|| clear_item(labels));

    clear
        .into_iter()
        .chain(catalogue.iter().map(|entry| {
            let mut preview_classes = ClassList::parse(PREVIEW_ITEM_CLASS);
            preview_classes.union_with(&entry.classes);
            MenuItem {
                label: entry.label(),
                icon: None,
                action: MenuAction::Apply {
                    classes: entry.classes.clone(),
                    kind: entry.kind,
                },
                preview_classes,
            }
        }))
        .collect()
}

/// Builds the toolbar buttons.
pub fn toolbar(show_clear_button: bool, labels: &Labels) -> Toolbar {
    Toolbar {
        menu: MenuButton {
            icon: MENU_ICON,
            tooltip: labels.show_styles.clone(),
        },
        clear: show_clear_button.then(|| ToolbarButton {
            icon: CLEAR_ICON,
            tooltip: labels.clear_styles.clone(),
            action: MenuAction::ClearAll,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::StyleEntry;

    fn catalogue() -> StyleCatalogue {
        StyleCatalogue::new(vec![
            StyleEntry::block("Alert", "alert alert-warn"),
            StyleEntry {
                title: None,
                classes: ClassList::parse("hl"),
                kind: StyleKind::Inline,
            },
            StyleEntry::block("Empty", ""),
        ])
    }

    #[test]
    fn test_items_with_separate_clear_button() {
        let items = build_menu_items(&catalogue(), true, &Labels::default());
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.action != MenuAction::ClearAll));
    }

    #[test]
    fn test_items_with_clear_in_menu() {
        let items = build_menu_items(&catalogue(), false, &Labels::default());
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].label, "Clear style");
        assert_eq!(items[0].icon, Some(CLEAR_ICON));
        assert_eq!(items[0].action, MenuAction::ClearAll);
    }

    #[test]
    fn test_item_labels_and_actions() {
        let items = build_menu_items(&catalogue(), true, &Labels::default());
        assert_eq!(items[0].label, "Alert");
        assert_eq!(items[1].label, "hl");
        assert_eq!(
            items[1].action,
            MenuAction::Apply {
                classes: ClassList::parse("hl"),
                kind: StyleKind::Inline
            }
        );
        assert_eq!(
            items[0].preview_classes.to_string(),
            "restyle-style-item alert alert-warn"
        );
    }

    #[test]
    fn test_inert_entry_still_listed() {
        let items = build_menu_items(&catalogue(), true, &Labels::default());
        assert_eq!(items[2].label, "Empty");
    }

    #[test]
    fn test_empty_catalogue() {
        let empty = StyleCatalogue::malformed();
        assert!(build_menu_items(&empty, true, &Labels::default()).is_empty());
        let items = build_menu_items(&empty, false, &Labels::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].action, MenuAction::ClearAll);
    }

    #[test]
    fn test_toolbar() {
        let labels = Labels::default();
        let with_clear = toolbar(true, &labels);
        assert_eq!(with_clear.menu.icon, MENU_ICON);
        assert_eq!(with_clear.menu.tooltip, "Show styles");
        assert_eq!(with_clear.clear.map(|b| b.action), Some(MenuAction::ClearAll));
        assert!(toolbar(false, &labels).clear.is_none());
    }
}
