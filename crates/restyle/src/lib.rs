//! Catalogue-driven class styling for rich-text editors.
//!
//! Administrators define a catalogue of named styles, each a list of CSS
//! classes targeting either whole blocks or inline text. Authors pick styles
//! from a menu; `restyle` turns those choices into formatting on the
//! editor's document.
//!
//! # Concepts
//!
//! - [`StyleCatalogue`]: the parsed style definitions. Parsing never fails;
//!   bad input yields an empty catalogue and a logged error.
//! - [`FormatRule`]: the block (`div` wrapper) or inline (`span`)
//!   transformation for one class list, registered with the editor under a
//!   deterministic [`RuleName`].
//! - [`EditorHost`]: everything the engine needs from the editor. The
//!   in-memory [`document::Document`] implements it.
//! - [`Plan`]: what an [`EditorEvent`] should do, computed without touching
//!   the document and executed by [`FormatRegistry::execute`].
//! - [`Stylist`]: one editor's session, wiring settings, menu and events.
//!
//! # Quick start
//!
//! ```rust
//! use restyle::document::Document;
//! use restyle::{EditorEvent, EditorSettings, MenuAction, Stylist};
//!
//! let settings = EditorSettings::from_json(r#"{
//!     "styles": "[{\"title\":\"Alert\",\"classes\":\"alert alert-warn\",\"type\":\"block\"}]",
//!     "show_clear_button": false
//! }"#).unwrap();
//! let stylist = Stylist::new(&settings);
//!
//! // Clear item first, then one item per style.
//! let items = stylist.menu_items();
//! assert_eq!(items.len(), 2);
//!
//! let mut doc = Document::parse("<p>[Careful]</p>").unwrap();
//! stylist.handle(&EditorEvent::MenuActivate(items[1].action.clone()), &mut doc);
//! assert_eq!(doc.to_html(), r#"<div class="alert alert-warn"><p>Careful</p></div>"#);
//!
//! stylist.handle(&EditorEvent::MenuActivate(MenuAction::ClearAll), &mut doc);
//! assert_eq!(doc.to_html(), "<p>Careful</p>");
//! ```

mod apply;
mod catalogue;
pub mod document;
mod event;
mod exit;
mod format;
mod host;
mod menu;
pub mod provision;
mod session;
mod settings;

pub use apply::{apply_class, clear_all_classes};
pub use catalogue::{CatalogueSource, ClassList, StyleCatalogue, StyleEntry, StyleKind};
pub use event::{EditorEvent, EventOutcome, Mutation, Plan};
pub use exit::{exit_state, plan_enter, CaretContext, ElementSnapshot, ExitState, TEXT_FLOW_BLOCKS};
pub use format::{
    rule_name_for, FormatRegistry, FormatRule, InlineTag, RuleName, BLOCK_ELEMENT,
    BLOCK_RULE_PREFIX, INLINE_RULE_PREFIX,
};
pub use host::{EditorHost, PARAGRAPH_TAG};
pub use menu::{
    build_menu_items, toolbar, MenuAction, MenuButton, MenuItem, Toolbar, ToolbarButton,
    CLEAR_BUTTON_NAME, CLEAR_ICON, MENU_BUTTON_NAME, MENU_ICON, PREVIEW_ITEM_CLASS,
};
pub use session::Stylist;
pub use settings::{EditorSettings, Labels, SettingsError, DEFAULT_SCSS, DEFAULT_STYLES};
