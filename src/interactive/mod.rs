//! Interactive command builder.
//!
//! Turns the command tree into a form: one dropdown per sub-command level,
//! one widget per flag of the selected leaf, and a free-text field for
//! positional arguments. Every change recomputes the equivalent command line,
//! which can be previewed, copied or executed on exit.
mod app;
mod builder;
mod external;
mod form;
mod preview;
mod reconstruct;
mod redirect;
mod section;
mod seed;
mod shell;
mod ui;
mod widgets;

use crate::cli::InteractiveArgs;
use crate::config::Config;
use crate::console;
use crate::registry::Registry;
use anyhow::{Context, Result};
use app::App;
use builder::Builder;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

const EVENT_POLL_MS: u64 = 200;

/// Run the builder, falling back to printing the seeded command line for
/// non-TTY environments.
pub fn run(args: &InteractiveArgs, config: &Config, registry: &dyn Registry) -> Result<()> {
    let outputs = console::OUTPUT_FORMATS
        .iter()
        .map(|format| format.to_string())
        .collect();
    let mut builder = Builder::new(registry.root(), outputs)?;
    let tty = io::stdout().is_terminal() && io::stdin().is_terminal();

    let seed = if !args.args.is_empty() {
        args.args.clone()
    } else if tty && config.clipboard {
        clipboard_seed(builder.program())
    } else {
        Vec::new()
    };
    builder.seed(&seed).context("seed form")?;

    if !tty {
        let line = builder.command_line();
        let mut stdout = io::stdout().lock();
        if line.is_empty() {
            writeln!(stdout, "{}", builder.program())?;
        } else {
            writeln!(stdout, "{} {line}", builder.program())?;
        }
        return Ok(());
    }

    let app = App::new(builder, registry, config.clipboard);
    let Some(line) = ui::run_tui(app)? else {
        return Ok(());
    };
    tracing::info!(command = %line, "executing");
    let args = shell::tokenize(&line)?;
    registry.invoke(&args, &mut io::stdout().lock())
}

/// Clipboard text is only used when it looks like one of our command lines.
fn clipboard_seed(program: &str) -> Vec<String> {
    let Some(text) = external::read_clipboard() else {
        return Vec::new();
    };
    let Ok(tokens) = shell::tokenize(text.trim()) else {
        return Vec::new();
    };
    let ours = tokens.first().is_some_and(|first| {
        Path::new(first)
            .file_name()
            .is_some_and(|name| name.to_string_lossy() == program)
    });
    if ours {
        tracing::debug!(tokens = tokens.len(), "seeding from clipboard");
        tokens
    } else {
        Vec::new()
    }
}
