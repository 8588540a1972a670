//! One editor instance's styling session.

use tracing::debug;

use crate::apply::{apply_class, clear_all_classes};
use crate::catalogue::StyleCatalogue;
use crate::event::{EditorEvent, EventOutcome, Plan};
use crate::exit::{plan_enter, CaretContext};
use crate::format::FormatRegistry;
use crate::host::EditorHost;
use crate::menu::{build_menu_items, toolbar, MenuAction, MenuItem, CLEAR_BUTTON_NAME, MENU_BUTTON_NAME};
use crate::provision::{inject_theme_stylesheet, ContentCss};
use crate::settings::{EditorSettings, Labels};

/// Ties the catalogue, menu and event handling to one editor.
///
/// The session only holds read-only data derived from settings; all mutable
/// state lives in the host. Typical wiring:
///
/// 1. [`setup`](Self::setup) when the editor is created, to register buttons;
/// 2. [`init`](Self::init) once the editing surface exists;
/// 3. [`handle`](Self::handle) for every Enter key press and menu activation.
///
/// # Example
///
/// ```rust
/// use restyle::document::Document;
/// use restyle::{EditorEvent, EditorSettings, MenuAction, Stylist};
///
/// let settings = EditorSettings::from_json(
///     r#"{"styles": "[{\"title\":\"Alert\",\"classes\":\"alert\",\"type\":\"block\"}]"}"#,
/// )
/// .unwrap();
/// let stylist = Stylist::new(&settings);
/// let mut doc = Document::parse("<p>[Careful]</p>").unwrap();
///
/// let action = stylist.menu_items()[0].action.clone();
/// stylist.handle(&EditorEvent::MenuActivate(action), &mut doc);
/// assert_eq!(doc.to_html(), r#"<div class="alert"><p>Careful</p></div>"#);
/// ```
#[derive(Debug, Clone)]
pub struct Stylist {
    catalogue: StyleCatalogue,
    show_clear_button: bool,
    labels: Labels,
    content_css: ContentCss,
}

impl Stylist {
    /// Builds a session, parsing the catalogue once.
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            catalogue: StyleCatalogue::parse(&settings.styles),
            show_clear_button: settings.show_clear_button,
            labels: settings.labels.clone(),
            content_css: ContentCss::from_settings(settings),
        }
    }

    /// The session's catalogue.
    pub fn catalogue(&self) -> &StyleCatalogue {
        &self.catalogue
    }

    /// The dropdown items, in display order.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        build_menu_items(&self.catalogue, self.show_clear_button, &self.labels)
    }

    /// Registers the toolbar buttons.
    pub fn setup<H: EditorHost>(&self, host: &mut H) {
        let buttons = toolbar(self.show_clear_button, &self.labels);
        host.add_menu_button(MENU_BUTTON_NAME, &buttons.menu);
        if let Some(clear) = &buttons.clear {
            host.add_button(CLEAR_BUTTON_NAME, clear);
        }
    }

    /// Brings the author's stylesheets into the editing surface.
    pub fn init<H: EditorHost>(&self, host: &mut H) {
        self.content_css.inject(host);
        inject_theme_stylesheet(host);
    }

    /// Computes the plan for an event without touching any document.
    ///
    /// `context` is only consulted for Enter key presses.
    pub fn plan<N: Clone>(&self, event: &EditorEvent, context: &CaretContext<N>) -> Plan<N> {
        match event {
            EditorEvent::KeyEnter { shift: true } => Plan::empty(),
            EditorEvent::KeyEnter { shift: false } => plan_enter(&self.catalogue, context),
            EditorEvent::MenuActivate(MenuAction::ClearAll) => clear_all_classes(&self.catalogue),
            EditorEvent::MenuActivate(MenuAction::Apply { classes, kind })
            | EditorEvent::FormatToggleRequested { classes, kind } => apply_class(classes, *kind),
        }
    }

    /// Handles an event against a host.
    ///
    /// The host must skip its own handling of the event when the returned
    /// outcome says so.
    pub fn handle<H: EditorHost>(&self, event: &EditorEvent, host: &mut H) -> EventOutcome {
        let context = match event {
            EditorEvent::KeyEnter { shift: false } => CaretContext::capture(host),
            _ => CaretContext::default(),
        };
        let plan = self.plan(event, &context);
        if plan.is_empty() {
            return EventOutcome::default();
        }
        debug!(event = ?event, mutations = plan.mutations.len(), "applying plan");
        FormatRegistry::new(host).execute(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{ClassList, StyleKind};
    use crate::document::Document;
    use crate::event::Mutation;

    fn settings() -> EditorSettings {
        EditorSettings {
            styles: r#"[{"title":"Box","classes":"box","type":"block"},{"title":"Mark","classes":"hl","type":"inline"}]"#.into(),
            compiled_css: ".box { border: 1px solid; }".into(),
            use_external_css: true,
            external_css_urls: "https://cdn/a.css".into(),
            ..EditorSettings::default()
        }
    }

    #[test]
    fn test_setup_registers_buttons() {
        let stylist = Stylist::new(&settings());
        let mut doc = Document::default();
        stylist.setup(&mut doc);
        assert_eq!(doc.menu_buttons().len(), 1);
        assert_eq!(doc.buttons().len(), 1);
        assert_eq!(doc.buttons()[0].0, CLEAR_BUTTON_NAME);

        let hidden = Stylist::new(&EditorSettings {
            show_clear_button: false,
            ..settings()
        });
        let mut doc = Document::default();
        hidden.setup(&mut doc);
        assert!(doc.buttons().is_empty());
        assert_eq!(hidden.menu_items().len(), 3);
    }

    #[test]
    fn test_init_injects_css() {
        let stylist = Stylist::new(&settings());
        let mut doc = Document::default();
        doc.link_stylesheet("https://site/theme/styles.php/boost/42/editor");
        stylist.init(&mut doc);

        assert_eq!(doc.content_styles(), [".box { border: 1px solid; }".to_string()]);
        assert_eq!(doc.content_css(), ["https://cdn/a.css".to_string()]);
        assert!(doc
            .linked_stylesheets()
            .contains(&"https://site/theme/styles.php/boost/42/all".to_string()));

        // A second init does not link the theme sheet twice.
        let before = doc.linked_stylesheets().len();
        stylist.init(&mut doc);
        assert_eq!(doc.linked_stylesheets().len(), before);
    }

    #[test]
    fn test_plan_dispatch() {
        let stylist = Stylist::new(&settings());
        let context = CaretContext::<u8>::default();

        assert!(stylist
            .plan(&EditorEvent::KeyEnter { shift: true }, &context)
            .is_empty());
        assert!(stylist
            .plan(&EditorEvent::KeyEnter { shift: false }, &context)
            .is_empty());

        let clear = stylist.plan(&EditorEvent::MenuActivate(MenuAction::ClearAll), &context);
        assert_eq!(clear.mutations[0], Mutation::ResetBlocksToParagraph);

        let toggle = stylist.plan(
            &EditorEvent::FormatToggleRequested {
                classes: ClassList::parse("hl"),
                kind: StyleKind::Inline,
            },
            &context,
        );
        assert_eq!(toggle.mutations.len(), 2);
    }

    #[test]
    fn test_handle_enter_outside_container_keeps_default() {
        let stylist = Stylist::new(&settings());
        let mut doc = Document::parse("<p>|</p>").unwrap();
        let outcome = stylist.handle(&EditorEvent::KeyEnter { shift: false }, &mut doc);
        assert!(!outcome.default_prevented);
        assert_eq!(doc.to_html(), "<p></p>");
    }

    #[test]
    fn test_handle_enter_exits_container() {
        let stylist = Stylist::new(&settings());
        let mut doc =
            Document::parse(r#"<div class="box"><p>Text</p><p>|</p></div>"#).unwrap();
        let outcome = stylist.handle(&EditorEvent::KeyEnter { shift: false }, &mut doc);
        assert!(outcome.default_prevented);
        assert_eq!(
            doc.to_marked_html(),
            r#"<div class="box"><p>Text</p></div><p>|</p>"#
        );
    }

    #[test]
    fn test_shift_enter_is_ignored() {
        let stylist = Stylist::new(&settings());
        let mut doc = Document::parse(r#"<div class="box"><p>|</p></div>"#).unwrap();
        let outcome = stylist.handle(&EditorEvent::KeyEnter { shift: true }, &mut doc);
        assert!(!outcome.default_prevented);
        assert_eq!(doc.to_html(), r#"<div class="box"><p></p></div>"#);
    }
}
