//! SCSS compilation.
//!
//! Built on [`grass`], a pure Rust Sass implementation.

use grass::{Options, OutputStyle};
use thiserror::Error;

/// Errors from compiling SCSS.
#[derive(Debug, Error)]
pub enum CompileScssError {
    #[error(transparent)]
    Grass(#[from] Box<grass::Error>),
}

/// Compiles SCSS source to CSS.
pub struct ScssCompiler<'o> {
    options: Options<'o>,
}

impl ScssCompiler<'_> {
    /// Creates a compiler producing expanded CSS.
    pub fn new() -> Self {
        Self {
            options: Options::default(),
        }
    }

    /// Creates a compiler producing minified CSS.
    pub fn compressed() -> Self {
        Self {
            options: Options::default().style(OutputStyle::Compressed),
        }
    }

    /// Compiles a SCSS string.
    pub fn compile(&self, input: impl AsRef<str>) -> Result<String, CompileScssError> {
        Ok(grass::from_string(input.as_ref(), &self.options)?)
    }
}

impl Default for ScssCompiler<'_> {
    fn default() -> Self {
        Self::new()
    }
}
