//! CLI argument parsing for the heimdall toolbox.
//!
//! The derive types double as the command registry: the interactive builder
//! introspects `RootArgs::command()` at runtime, so value names carry meaning
//! (`N` marks integers, `DURATION` marks durations).
use crate::console;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "heimdall",
    version,
    about = "Perform compliance checks and report evidences",
    after_help = "Examples:\n  heimdall uuid --count 3 --output table\n  heimdall env list --prefix HOME\n  heimdall echo --bold --foreground red \"Error: something bad happened\"\n  heimdall interactive env list",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Location of the heimdall config directory
    #[arg(long, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Echo(EchoArgs),
    Uuid(UuidArgs),
    #[command(subcommand)]
    Env(EnvCommand),
    Wait(WaitArgs),
    Interactive(InteractiveArgs),
}

/// Styled text output.
#[derive(Args, Debug)]
#[command(about = "Apply coloring, borders, spacing to text")]
pub struct EchoArgs {
    /// Foreground color (name, #rrggbb or 0-255)
    #[arg(long, value_name = "COLOR")]
    pub foreground: Option<String>,

    /// Background color (name, #rrggbb or 0-255)
    #[arg(long, value_name = "COLOR")]
    pub background: Option<String>,

    /// Bold text
    #[arg(long)]
    pub bold: bool,

    /// Faint text
    #[arg(long)]
    pub faint: bool,

    /// Italicize text
    #[arg(long)]
    pub italic: bool,

    /// Underline text
    #[arg(long)]
    pub underline: bool,

    /// Strikethrough text
    #[arg(long)]
    pub strikethrough: bool,

    /// Text alignment
    #[arg(long, default_value = "left", value_parser = ["left", "center", "right"])]
    pub align: String,

    /// Text width
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,

    /// Text padding
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub padding: usize,

    /// Text to print
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Identifier generation.
#[derive(Args, Debug)]
#[command(about = "Generate a Universally Unique Identifier")]
pub struct UuidArgs {
    /// Number of identifiers to generate
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub count: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Environment inspection commands.
#[derive(Subcommand, Debug)]
#[command(about = "Inspect environment variables")]
pub enum EnvCommand {
    List(EnvListArgs),
    Get(EnvGetArgs),
}

#[derive(Args, Debug)]
#[command(about = "List environment variables")]
pub struct EnvListArgs {
    /// Only list variables starting with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Variables to leave out
    #[arg(long, value_name = "NAME", value_delimiter = ',')]
    pub exclude: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
#[command(about = "Print a single environment variable")]
pub struct EnvGetArgs {
    /// Value printed when the variable is not set
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Variable name
    pub name: String,
}

/// Pause before reporting.
#[derive(Args, Debug)]
#[command(about = "Wait for a duration, then print a message")]
pub struct WaitArgs {
    /// How long to wait (e.g. 500ms, 2s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "1s")]
    pub duration: String,

    /// Message printed after waiting
    #[arg(long, value_name = "TEXT")]
    pub message: Option<String>,
}

/// Interactive builder inputs.
#[derive(Args, Debug)]
#[command(about = "Interactive CLI builder")]
pub struct InteractiveArgs {
    /// Command line used to pre-populate the form
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..=100)]
    pub args: Vec<String>,
}

/// Output flags shared by structured commands.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output format
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = console::DEFAULT_OUTPUT,
        value_parser = PossibleValuesParser::new(console::OUTPUT_FORMATS)
    )]
    pub output: String,
}
