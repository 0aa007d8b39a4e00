//! heimdall: a small toolbox of commands plus an interactive builder that
//! turns its own command tree into a form.
mod cli;
mod commands;
mod config;
mod console;
mod interactive;
mod logging;
mod registry;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Command, RootArgs};
use registry::ClapRegistry;
use std::io;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    let mut config = config::load(args.config.as_deref())?;
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    logging::init(&config.log_level);

    match &args.command {
        Command::Interactive(interactive) => {
            let registry = ClapRegistry::new(
                RootArgs::command(),
                commands::dispatch,
                &config.ignored_commands,
            )?;
            interactive::run(interactive, &config, &registry)
        }
        command => commands::run(command, &mut io::stdout().lock()),
    }
}
