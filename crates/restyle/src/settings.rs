//! Editor settings as handed over by the settings store.
//!
//! Settings can be built in code, or loaded from a JSON or YAML file whose
//! keys match either the field names below or the administrator setting
//! names (`styleslist`, `csslist`, `useexternalcss`, `externalcssurl`,
//! `showclearbutton`).
//!
//! ```yaml
//! styles: |
//!   [{"title": "Alert", "classes": "alert alert-warn", "type": "block"}]
//! scss: ".alert { border: 1px solid; .alert-warn { color: orange; } }"
//! use_external_css: true
//! external_css_urls: |
//!   https://cdn.example.org/a.css
//!   https://cdn.example.org/b.css
//! show_clear_button: false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalogue::CatalogueSource;

/// Default style definitions: one inline test style.
pub const DEFAULT_STYLES: &str = r#"{"css":".test { color: red; }","styles":[{"label":"Test Style","class":"test","type":"inline"}]}"#;

/// Default stylesheet source.
pub const DEFAULT_SCSS: &str = ".test { color: red; }";

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported settings format \"{0}\" (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// User-facing strings.
///
/// Translation happens outside this crate; hosts pass already-localized
/// strings here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Tooltip of the dropdown button.
    pub show_styles: String,
    /// Label of the clear item and tooltip of the clear button.
    pub clear_styles: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            show_styles: String::from("Show styles"),
            clear_styles: String::from("Clear style"),
        }
    }
}

/// Everything one editor instance is configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// The style catalogue.
    #[serde(alias = "styleslist")]
    pub styles: CatalogueSource,
    /// Author-supplied SCSS.
    #[serde(alias = "csslist")]
    pub scss: String,
    /// CSS compiled from [`scss`](Self::scss), injected into the editor.
    pub compiled_css: String,
    /// Whether [`external_css_urls`](Self::external_css_urls) is used.
    #[serde(alias = "useexternalcss")]
    pub use_external_css: bool,
    /// Stylesheet URLs, one per line.
    #[serde(alias = "externalcssurl")]
    pub external_css_urls: String,
    /// Show clearing as its own toolbar button instead of a menu item.
    #[serde(alias = "showclearbutton")]
    pub show_clear_button: bool,
    /// User-facing strings.
    pub labels: Labels,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            styles: CatalogueSource::Encoded(DEFAULT_STYLES.to_string()),
            scss: DEFAULT_SCSS.to_string(),
            compiled_css: String::new(),
            use_external_css: false,
            external_css_urls: String::new(),
            show_clear_button: true,
            labels: Labels::default(),
        }
    }
}

impl EditorSettings {
    /// Parses JSON settings.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses YAML settings.
    pub fn from_yaml(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Loads settings from a file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let read = || {
            std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
                path: path.display().to_string(),
                source,
            })
        };

        match extension.as_str() {
            "json" => Self::from_json(&read()?),
            "yaml" | "yml" => Self::from_yaml(&read()?),
            other => Err(SettingsError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Serializes the settings as pretty JSON.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleCatalogue;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = EditorSettings::default();
        assert!(settings.show_clear_button);
        assert!(!settings.use_external_css);
        let catalogue = StyleCatalogue::parse(&settings.styles);
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.entries()[0].label(), "Test Style");
    }

    #[test]
    fn test_json_with_admin_names() {
        let settings = EditorSettings::from_json(
            r#"{
                "styleslist": "[{\"title\":\"A\",\"classes\":\"a\"}]",
                "csslist": ".a { color: blue; }",
                "useexternalcss": true,
                "externalcssurl": "https://x/a.css",
                "showclearbutton": false
            }"#,
        )
        .unwrap();
        assert_eq!(settings.scss, ".a { color: blue; }");
        assert!(settings.use_external_css);
        assert!(!settings.show_clear_button);
        assert_eq!(StyleCatalogue::parse(&settings.styles).len(), 1);
        assert_eq!(settings.labels, Labels::default());
    }

    #[test]
    fn test_yaml_with_structured_styles() {
        let settings = EditorSettings::from_yaml(
            r#"
styles:
  - title: Alert
    classes: alert alert-warn
    type: block
  - title: Mark
    classes: hl
    type: inline
labels:
  clear_styles: Stil entfernen
"#,
        )
        .unwrap();
        assert!(matches!(settings.styles, CatalogueSource::Structured(_)));
        assert_eq!(StyleCatalogue::parse(&settings.styles).len(), 2);
        assert_eq!(settings.labels.clear_styles, "Stil entfernen");
        assert_eq!(settings.labels.show_styles, "Show styles");
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "show_clear_button: false").unwrap();

        let settings = EditorSettings::load(&path).unwrap();
        assert!(!settings.show_clear_button);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let err = EditorSettings::load("settings.toml").unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(ref ext) if ext == "toml"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EditorSettings::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = EditorSettings::default();
        let back = EditorSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }
}
