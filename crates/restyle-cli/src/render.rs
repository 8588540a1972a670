//! Template rendering for command output.

use std::collections::HashMap;

use console::Style;
use minijinja::{Environment, Error, Value};
use serde::Serialize;

const CHECK_TEMPLATE: &str = include_str!("templates/check.jinja");
const MENU_TEMPLATE: &str = include_str!("templates/menu.jinja");

/// Named terminal styles available to templates through the `style` filter.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a named style.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Styles `text` with the named style. Unknown names and disabled color
    /// leave the text untouched.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
            _ => text.to_string(),
        }
    }
}

/// The styles used by the bundled templates.
pub fn default_theme() -> Theme {
    Theme::new()
        .add("heading", Style::new().bold())
        .add("muted", Style::new().dim())
        .add("accent", Style::new().cyan())
        .add("ok", Style::new().green())
        .add("warn", Style::new().yellow())
        .add("error", Style::new().red().bold())
}

fn register_filters(env: &mut Environment<'static>, theme: Theme, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });
}

/// Renders the command templates.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Result<Self, Error> {
        Self::with_theme(default_theme(), use_color)
    }

    pub fn with_theme(theme: Theme, use_color: bool) -> Result<Self, Error> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        register_filters(&mut env, theme, use_color);
        env.add_template("check", CHECK_TEMPLATE)?;
        env.add_template("menu", MENU_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders a bundled template with the given data.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        self.env.get_template(name)?.render(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Data {
        message: String,
    }

    #[test]
    fn test_theme_apply_without_color() {
        let theme = default_theme();
        assert_eq!(theme.apply("error", "boom", false), "boom");
    }

    #[test]
    fn test_theme_apply_with_color() {
        let theme = Theme::new().add("ok", Style::new().green());
        let styled = theme.apply("ok", "fine", true);
        assert_ne!(styled, "fine");
        assert!(styled.contains("fine"));
        assert!(styled.contains('\u{1b}'));
    }

    #[test]
    fn test_theme_unknown_style() {
        assert_eq!(default_theme().apply("nope", "text", true), "text");
    }

    #[test]
    fn test_style_filter_in_template() {
        let mut env = Environment::new();
        register_filters(&mut env, default_theme(), false);
        env.add_template("t", r#"[{{ message | style("heading") }}]"#)
            .unwrap();
        let out = env
            .get_template("t")
            .unwrap()
            .render(&Data {
                message: "hi".into(),
            })
            .unwrap();
        assert_eq!(out, "[hi]");
    }

    #[test]
    fn test_unknown_template() {
        let renderer = Renderer::new(false).unwrap();
        assert!(renderer.render("missing", &()).is_err());
    }
}
