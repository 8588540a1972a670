//! Stylesheet side of `restyle`.
//!
//! Administrators write SCSS alongside the style catalogue. This crate
//! compiles it into the CSS that editors load as content styles, serves it,
//! and checks which catalogue classes the stylesheet does not cover.
//!
//! ```rust
//! use restyle::EditorSettings;
//! use restyle_css::{refresh_compiled_css, CssResponse};
//!
//! let mut settings = EditorSettings::default();
//! let report = refresh_compiled_css(&mut settings).unwrap();
//! assert!(report.missing_classes.is_empty());
//!
//! let response = CssResponse::from_settings(&settings);
//! assert!(response.css.contains(".test"));
//! ```

mod classes;
mod scss;
mod service;

pub use classes::{defined_classes, undefined_catalogue_classes};
pub use scss::{CompileScssError, ScssCompiler};
pub use service::{refresh_compiled_css, CompileReport, CssResponse};
