//! The `restyle` command-line tool.
//!
//! Administrators use it to compile stylesheets and to see what editors will
//! make of a settings file before rolling it out:
//!
//! ```text
//! restyle compile styles.scss -o styles.css
//! restyle check settings.yaml
//! restyle menu settings.json
//! ```

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

pub mod commands;
pub mod render;

use render::Renderer;

#[derive(Parser, Debug)]
#[command(name = "restyle", version)]
#[command(about = "Check editor style settings and compile their stylesheets")]
pub struct Cli {
    /// Log what is happening to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never color output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile an SCSS file to CSS
    Compile {
        /// SCSS source file
        input: PathBuf,
        /// Write the CSS here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Minify the output
        #[arg(long)]
        compressed: bool,
    },
    /// Validate a settings file (JSON or YAML)
    Check {
        /// Settings file
        settings: PathBuf,
    },
    /// Show the style menu an editor would build from a settings file
    Menu {
        /// Settings file
        settings: PathBuf,
    },
}

/// Runs a parsed command line, writing results to `out`.
///
/// Returns `Ok(false)` when the command ran but found problems.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<bool> {
    let use_color = !cli.no_color && console::colors_enabled();
    match &cli.command {
        Command::Compile {
            input,
            output,
            compressed,
        } => {
            let css = commands::compile_file(input, *compressed)?;
            match output {
                Some(path) => {
                    fs::write(path, &css)
                        .with_context(|| format!("could not write {}", path.display()))?;
                    info!(path = %path.display(), bytes = css.len(), "stylesheet written");
                }
                None => out.write_all(css.as_bytes())?,
            }
            Ok(true)
        }
        Command::Check { settings } => {
            let report = commands::check(settings)?;
            let text = Renderer::new(use_color)?.render("check", &report)?;
            writeln!(out, "{}", text.trim_end())?;
            Ok(!report.has_errors())
        }
        Command::Menu { settings } => {
            let view = commands::menu(settings)?;
            let text = Renderer::new(use_color)?.render("menu", &view)?;
            writeln!(out, "{}", text.trim_end())?;
            Ok(true)
        }
    }
}
