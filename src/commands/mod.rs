//! Leaf command implementations.
//!
//! Every command writes to the `out` sink it is handed instead of stdout so
//! the interactive preview can capture it.
mod echo;
mod env;
mod wait;

use crate::cli::{Command, EnvCommand, RootArgs, UuidArgs};
use crate::console;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, FromArgMatches};
use serde_json::Value;
use std::io::Write;

/// Run a parsed command.
pub fn run(command: &Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Echo(args) => echo::run(args, out),
        Command::Uuid(args) => uuid(args, out),
        Command::Env(EnvCommand::List(args)) => env::list(args, out),
        Command::Env(EnvCommand::Get(args)) => env::get(args, out),
        Command::Wait(args) => wait::run(args, out),
        Command::Interactive(_) => Err(anyhow!("interactive cannot be started from itself")),
    }
}

/// Registry handler: rebuild the typed arguments from fresh matches and run.
pub fn dispatch(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let root = RootArgs::from_arg_matches(matches).map_err(|err| anyhow!("{err}"))?;
    run(&root.command, out)
}

fn uuid(args: &UuidArgs, out: &mut dyn Write) -> Result<()> {
    let ids: Vec<Value> = (0..args.count)
        .map(|_| Value::String(uuid::Uuid::new_v4().to_string()))
        .collect();
    let value = if ids.len() == 1 {
        ids.into_iter().next().unwrap_or(Value::Null)
    } else {
        Value::Array(ids)
    };
    console::emit(out, &value, &args.output.output)
}
