//! Command implementations. Each returns plain data; rendering happens in
//! [`crate::run`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use restyle::provision::parse_url_list;
use restyle::{
    build_menu_items, toolbar, EditorSettings, MenuAction, MenuButton, StyleCatalogue,
    ToolbarButton,
};
use restyle_css::{refresh_compiled_css, ScssCompiler};

fn load_settings(path: &Path) -> Result<EditorSettings> {
    EditorSettings::load(path).context("could not load editor settings")
}

/// Compiles an SCSS file and returns the CSS.
pub fn compile_file(input: &Path, compressed: bool) -> Result<String> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("could not read {}", input.display()))?;
    let compiler = if compressed {
        ScssCompiler::compressed()
    } else {
        ScssCompiler::new()
    };
    debug!(path = %input.display(), compressed, "compiling");
    compiler
        .compile(&source)
        .with_context(|| format!("could not compile {}", input.display()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleLine {
    pub label: String,
    pub kind: &'static str,
    pub classes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileStatus {
    pub bytes: usize,
    pub defined_classes: usize,
    pub error: Option<String>,
}

/// Everything `restyle check` reports about a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub source: String,
    pub well_formed: bool,
    pub styles: Vec<StyleLine>,
    pub compile: CompileStatus,
    pub missing_classes: Vec<String>,
    pub external_css: Vec<String>,
}

impl CheckReport {
    pub fn new(source: impl Into<String>, settings: &EditorSettings) -> Self {
        let catalogue = StyleCatalogue::parse(&settings.styles);
        let styles = catalogue
            .iter()
            .map(|entry| StyleLine {
                label: entry.label(),
                kind: entry.kind.as_str(),
                classes: entry.classes.to_string(),
            })
            .collect();

        let mut scratch = settings.clone();
        let (compile, missing_classes) = match refresh_compiled_css(&mut scratch) {
            Ok(report) => (
                CompileStatus {
                    bytes: report.bytes,
                    defined_classes: report.defined_classes,
                    error: None,
                },
                report.missing_classes,
            ),
            Err(err) => (
                CompileStatus {
                    error: Some(err.to_string()),
                    ..CompileStatus::default()
                },
                Vec::new(),
            ),
        };

        let external_css = if settings.use_external_css {
            parse_url_list(&settings.external_css_urls)
        } else {
            Vec::new()
        };

        Self {
            source: source.into(),
            well_formed: catalogue.is_well_formed(),
            styles,
            compile,
            missing_classes,
            external_css,
        }
    }

    /// Whether the editor would run degraded with these settings.
    pub fn has_errors(&self) -> bool {
        !self.well_formed || self.compile.error.is_some()
    }
}

/// Checks a settings file.
pub fn check(path: &Path) -> Result<CheckReport> {
    let settings = load_settings(path)?;
    Ok(CheckReport::new(path.display().to_string(), &settings))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLine {
    pub label: String,
    pub detail: String,
}

/// The toolbar and dropdown an editor shows for a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub menu: MenuButton,
    pub items: Vec<MenuLine>,
    pub clear: Option<ToolbarButton>,
}

impl MenuView {
    pub fn new(settings: &EditorSettings) -> Self {
        let catalogue = StyleCatalogue::parse(&settings.styles);
        let items = build_menu_items(&catalogue, settings.show_clear_button, &settings.labels)
            .into_iter()
            .map(|item| {
                let detail = match &item.action {
                    MenuAction::ClearAll => String::from("clear"),
                    MenuAction::Apply { classes, kind } => {
                        format!("{}: {}", kind.as_str(), classes)
                    }
                };
                MenuLine {
                    label: item.label,
                    detail,
                }
            })
            .collect();
        let toolbar = toolbar(settings.show_clear_button, &settings.labels);
        Self {
            menu: toolbar.menu,
            items,
            clear: toolbar.clear,
        }
    }
}

/// Builds the menu for a settings file.
pub fn menu(path: &Path) -> Result<MenuView> {
    Ok(MenuView::new(&load_settings(path)?))
}
