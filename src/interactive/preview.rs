//! Run the reconstructed command and capture what it prints.
use super::redirect::StreamRedirect;
use super::shell::tokenize;
use crate::registry::{CommandNode, Registry};
use anyhow::Result;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CaptureMode {
    /// The command writes into an in-memory buffer.
    Plain,
    /// The command writes to the real stdout, which is redirected into a pipe.
    Ansi,
}

impl CaptureMode {
    /// Terminal capture for commands that style their own output and for the
    /// colorized formats (`jsonc`).
    pub(super) fn for_command(leaf: Option<&CommandNode>, output: Option<&str>) -> Self {
        let raw = leaf.is_some_and(|node| node.raw_terminal_output);
        let colorized = output.is_some_and(|format| format.ends_with('c'));
        if raw || colorized {
            CaptureMode::Ansi
        } else {
            CaptureMode::Plain
        }
    }
}

/// Output of `line` (program name excluded). Command and quoting errors become
/// part of the text; only redirection failures are returned as errors.
pub(super) fn run_preview(
    registry: &dyn Registry,
    line: &str,
    mode: CaptureMode,
) -> Result<String> {
    let args = match tokenize(line) {
        Ok(args) => args,
        Err(err) => return Ok(format!("error: {err:#}")),
    };
    tracing::debug!(line, ?mode, "running preview");
    match mode {
        CaptureMode::Plain => Ok(capture_plain(registry, &args)),
        CaptureMode::Ansi => capture_ansi(registry, &args),
    }
}

fn capture_plain(registry: &dyn Registry, args: &[String]) -> String {
    let mut buffer = Vec::new();
    let result = registry.invoke(args, &mut buffer);
    let mut text = String::from_utf8_lossy(&buffer).into_owned();
    if let Err(err) = result {
        append_error(&mut text, &err);
    }
    text
}

fn capture_ansi(registry: &dyn Registry, args: &[String]) -> Result<String> {
    let redirect = StreamRedirect::acquire()?;
    let result = registry.invoke(args, &mut io::stdout());
    let bytes = redirect.finish()?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if let Err(err) = result {
        append_error(&mut text, &err);
    }
    Ok(text)
}

fn append_error(text: &mut String, err: &anyhow::Error) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    let message = format!("{err:#}");
    // clap renders its own `error:` prefix
    if !message.starts_with("error:") {
        text.push_str("error: ");
    }
    text.push_str(&message);
}
