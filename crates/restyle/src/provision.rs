//! Getting the author's stylesheets into the editing surface.
//!
//! Styles only preview correctly inside the editor if the classes they use
//! are defined there. Two sources are pushed into the surface at init:
//!
//! - the CSS compiled from the configured SCSS, as inline content style;
//! - optionally, a list of external stylesheet URLs.
//!
//! Separately, editors embedded in a themed page usually only link the
//! theme's `editor` stylesheet. The theme's `all` stylesheet carries the
//! site-wide classes authors reference, so it is linked as well.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::host::EditorHost;
use crate::settings::EditorSettings;

static THEME_EDITOR_SHEET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/theme/styles\.php/[^/]+/[^/]+/editor$").expect("static regex is valid")
});

/// Splits a newline-separated URL list, trimming and dropping blank lines.
///
/// ```rust
/// use restyle::provision::parse_url_list;
///
/// let urls = parse_url_list("https://a/x.css\r\n\n  https://b/y.css  \n");
/// assert_eq!(urls, vec!["https://a/x.css", "https://b/y.css"]);
/// ```
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// The CSS an editor instance injects into its surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCss {
    /// Compiled stylesheet text; skipped when empty.
    pub compiled: String,
    /// External stylesheet URLs, in order.
    pub external_urls: Vec<String>,
}

impl ContentCss {
    /// Collects the content CSS from settings.
    ///
    /// External URLs are only used when `use_external_css` is set.
    pub fn from_settings(settings: &EditorSettings) -> Self {
        let external_urls = if settings.use_external_css {
            parse_url_list(&settings.external_css_urls)
        } else {
            Vec::new()
        };
        Self {
            compiled: settings.compiled_css.clone(),
            external_urls,
        }
    }

    /// Pushes the CSS into the host's surface.
    pub fn inject<H: EditorHost>(&self, host: &mut H) {
        if !self.compiled.trim().is_empty() {
            debug!(bytes = self.compiled.len(), "injecting compiled css");
            host.push_content_style(&self.compiled);
        }
        for url in &self.external_urls {
            debug!(url = %url, "linking external css");
            host.push_content_css(url);
        }
    }
}

/// Derives the theme-wide stylesheet URL from the linked ones.
///
/// Looks for the first link ending in `/theme/styles.php/<theme>/<rev>/editor`
/// and swaps the trailing `editor` for `all`.
///
/// ```rust
/// use restyle::provision::theme_all_stylesheet;
///
/// let links = vec![
///     "https://site/lib/fonts.css".to_string(),
///     "https://site/theme/styles.php/boost/1700000000/editor".to_string(),
/// ];
/// assert_eq!(
///     theme_all_stylesheet(&links).as_deref(),
///     Some("https://site/theme/styles.php/boost/1700000000/all")
/// );
/// ```
pub fn theme_all_stylesheet(links: &[String]) -> Option<String> {
    links.iter().find_map(|href| {
        THEME_EDITOR_SHEET.find(href).map(|m| {
            let editor_suffix = "editor".len();
            format!("{}all", &href[..m.end() - editor_suffix])
        })
    })
}

/// Links the theme-wide stylesheet into the surface unless already present.
///
/// Returns `true` when a stylesheet was linked.
pub fn inject_theme_stylesheet<H: EditorHost>(host: &mut H) -> bool {
    let links = host.linked_stylesheets();
    let Some(all) = theme_all_stylesheet(&links) else {
        warn!("no theme editor stylesheet linked; theme styles will not preview");
        return false;
    };
    if links.iter().any(|href| *href == all) {
        return false;
    }
    debug!(href = %all, "linking theme stylesheet");
    host.link_stylesheet(&all);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list_handles_crlf_and_blanks() {
        assert_eq!(
            parse_url_list("a.css\r\n\r\n b.css \n\t\n"),
            vec!["a.css".to_string(), "b.css".to_string()]
        );
        assert!(parse_url_list("").is_empty());
    }

    #[test]
    fn test_content_css_ignores_urls_when_disabled() {
        let settings = EditorSettings {
            external_css_urls: "https://x/a.css".into(),
            compiled_css: ".a{}".into(),
            ..EditorSettings::default()
        };
        let css = ContentCss::from_settings(&settings);
        assert!(css.external_urls.is_empty());
        assert_eq!(css.compiled, ".a{}");
    }

    #[test]
    fn test_content_css_uses_urls_when_enabled() {
        let settings = EditorSettings {
            use_external_css: true,
            external_css_urls: "https://x/a.css\nhttps://x/b.css".into(),
            ..EditorSettings::default()
        };
        let css = ContentCss::from_settings(&settings);
        assert_eq!(css.external_urls.len(), 2);
    }

    #[test]
    fn test_theme_stylesheet_needs_full_path() {
        let links = vec!["https://site/theme/styles.php/boost/editor".to_string()];
        assert_eq!(theme_all_stylesheet(&links), None);

        let links = vec!["https://site/theme/styles.php/boost/1/editor?x=1".to_string()];
        assert_eq!(theme_all_stylesheet(&links), None);
    }

    #[test]
    fn test_theme_stylesheet_first_match_wins() {
        let links = vec![
            "/theme/styles.php/a/1/editor".to_string(),
            "/theme/styles.php/b/2/editor".to_string(),
        ];
        assert_eq!(
            theme_all_stylesheet(&links).as_deref(),
            Some("/theme/styles.php/a/1/all")
        );
    }
}
