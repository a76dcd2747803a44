//! # diffcalc
//!
//! Command-line front end for `diffcalc-core`: reads an arithmetic
//! expression, asks for the value of each free variable in name order, and
//! prints the result. `diff(expr, var, point[, step])` takes a numerical
//! derivative.
//!
//! ## Modules
//!
//! - `config`: command-line arguments and number input parsing.
//! - `input`: the `LineSource` trait with terminal and scripted sources.
//! - `session`: one prompt/evaluate/report round.
//! - `repl`: the interactive loop and its `commands`.
//! - `render`: colored result, error and diagnostic output.

pub mod commands;
pub mod config;
pub mod input;
pub mod render;
pub mod repl;
pub mod session;

pub use crate::config::Config;
pub use crate::input::{EditorSource, LineSource, ScriptedSource};
pub use crate::session::Session;

use anyhow::Result;
use std::io;

/// Run the program described by `config`. Returns whether every evaluation
/// produced a result.
pub fn run(config: &Config) -> Result<bool> {
    if config.no_color {
        colored::control::set_override(false);
    }

    if config.repl {
        repl::start(config)?;
        return Ok(true);
    }

    let source = EditorSource::new()
        .map_err(|e| anyhow::anyhow!("Failed to initialize line editor: {}", e))?;
    let mut session = Session::new(source, io::stdout())
        .with_defines(config.defines.clone())
        .verbose(config.verbose);
    session.run_once(config.expression.as_deref())
}
