//! Keeping the compiled stylesheet in step with the SCSS setting.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use restyle::{EditorSettings, StyleCatalogue};

use crate::classes::{defined_classes, undefined_catalogue_classes};
use crate::scss::{CompileScssError, ScssCompiler};

/// Summary of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileReport {
    /// Size of the compiled CSS in bytes.
    pub bytes: usize,
    /// Number of distinct class selectors in the compiled CSS.
    pub defined_classes: usize,
    /// Catalogue class tokens without a selector in the compiled CSS.
    pub missing_classes: Vec<String>,
}

/// Recompiles `settings.scss` into `settings.compiled_css`.
///
/// Called whenever the SCSS setting changes. On failure the compiled CSS is
/// cleared, so the editor never serves a stale stylesheet, and the error is
/// returned for the caller to report.
pub fn refresh_compiled_css(
    settings: &mut EditorSettings,
) -> Result<CompileReport, CompileScssError> {
    match ScssCompiler::new().compile(&settings.scss) {
        Ok(css) => {
            let catalogue = StyleCatalogue::parse(&settings.styles);
            let report = CompileReport {
                bytes: css.len(),
                defined_classes: defined_classes(&css).len(),
                missing_classes: undefined_catalogue_classes(&catalogue, &css),
            };
            debug!(
                bytes = report.bytes,
                missing = report.missing_classes.len(),
                "compiled stylesheet"
            );
            settings.compiled_css = css;
            Ok(report)
        }
        Err(err) => {
            error!(error = %err, "SCSS compilation failed");
            settings.compiled_css.clear();
            Err(err)
        }
    }
}

/// Payload of the stylesheet service: the compiled CSS for the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssResponse {
    pub css: String,
}

impl CssResponse {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            css: settings.compiled_css.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&EditorSettings> for CssResponse {
    fn from(settings: &EditorSettings) -> Self {
        Self::from_settings(settings)
    }
}
