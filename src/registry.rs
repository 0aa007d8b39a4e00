//! Command registry consumed by the interactive builder.
//!
//! The builder never touches clap directly: it walks a [`CommandNode`] tree
//! with explicit [`FlagKind`]s and runs commands through [`Registry::invoke`].
use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches};
use std::io::Write;

/// Commands that write terminal styling themselves instead of going through
/// an output format.
const RAW_TERMINAL_COMMANDS: &[&str] = &["echo"];

/// Declared value kind of a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagKind {
    Boolean,
    Integer,
    String,
    StringList,
    Duration,
    Enumerated(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: String,
    pub kind: FlagKind,
    pub default: Option<String>,
    pub help: Option<String>,
}

impl FlagSpec {
    pub fn new(name: impl Into<String>, kind: FlagKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            help: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// One node of the command tree; identity is the path from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandNode {
    pub name: String,
    pub about: Option<String>,
    pub children: Vec<CommandNode>,
    pub flags: Vec<FlagSpec>,
    pub raw_terminal_output: bool,
}

impl CommandNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child_names(&self) -> Vec<String> {
        self.children.iter().map(|child| child.name.clone()).collect()
    }

    pub fn has_subcommands(&self) -> bool {
        !self.children.is_empty()
    }

    /// Build the tree from a clap command, skipping hidden and ignored
    /// sub-commands. Global flags are inherited by every descendant.
    pub fn from_clap(command: &clap::Command, ignored: &[String]) -> Result<Self> {
        build_node(command, ignored, &[], true)
    }
}

fn build_node(
    command: &clap::Command,
    ignored: &[String],
    inherited: &[FlagSpec],
    is_root: bool,
) -> Result<CommandNode> {
    let mut flags = Vec::new();
    let mut globals = inherited.to_vec();
    for arg in command.get_arguments() {
        let Some(spec) = flag_spec(command.get_name(), arg)? else {
            continue;
        };
        if arg.is_global_set() {
            globals.push(spec.clone());
        }
        flags.push(spec);
    }
    for spec in inherited {
        if !flags.iter().any(|flag| flag.name == spec.name) {
            flags.push(spec.clone());
        }
    }

    let mut children = Vec::new();
    for sub in command.get_subcommands() {
        let name = sub.get_name();
        if sub.is_hide_set() || name == "help" || (is_root && ignored.iter().any(|i| i == name)) {
            continue;
        }
        children.push(build_node(sub, ignored, &globals, false)?);
    }

    let mut node = CommandNode::new(command.get_name());
    node.about = command.get_about().map(|about| about.to_string());
    node.children = children;
    node.flags = flags;
    node.raw_terminal_output = RAW_TERMINAL_COMMANDS.contains(&command.get_name());
    Ok(node)
}

fn flag_spec(command: &str, arg: &Arg) -> Result<Option<FlagSpec>> {
    if arg.is_positional() || arg.is_hide_set() {
        return Ok(None);
    }
    let Some(long) = arg.get_long() else {
        return Ok(None);
    };
    let kind = match arg.get_action() {
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version => {
            return Ok(None)
        }
        ArgAction::SetTrue => FlagKind::Boolean,
        ArgAction::Append => FlagKind::StringList,
        ArgAction::Set => valued_kind(arg),
        other => {
            return Err(anyhow!(
                "{command}: flag --{long} uses unsupported action {other:?}"
            ))
        }
    };
    let mut spec = FlagSpec::new(long, kind);
    if let Some(default) = arg.get_default_values().first() {
        spec = spec.with_default(default.to_string_lossy());
    }
    spec.help = arg.get_help().map(|help| help.to_string());
    Ok(Some(spec))
}

fn valued_kind(arg: &Arg) -> FlagKind {
    let choices: Vec<String> = arg
        .get_possible_values()
        .iter()
        .filter(|value| !value.is_hide_set())
        .map(|value| value.get_name().to_string())
        .collect();
    if !choices.is_empty() {
        return FlagKind::Enumerated(choices);
    }
    let value_name = arg
        .get_value_names()
        .and_then(|names| names.first())
        .map(|name| name.as_str());
    match value_name {
        Some("N") => FlagKind::Integer,
        Some("DURATION") => FlagKind::Duration,
        _ => FlagKind::String,
    }
}

/// Source of the command tree and the way to run one of its commands.
pub trait Registry {
    fn root(&self) -> &CommandNode;

    /// Run `args` (without the program name), writing output to `out`.
    fn invoke(&self, args: &[String], out: &mut dyn Write) -> Result<()>;
}

pub type Handler = fn(&ArgMatches, &mut dyn Write) -> Result<()>;

/// Registry backed by a clap command tree. Every invocation parses a fresh
/// `ArgMatches`, so appended list values never survive between runs.
pub struct ClapRegistry {
    command: clap::Command,
    root: CommandNode,
    handler: Handler,
}

impl ClapRegistry {
    pub fn new(command: clap::Command, handler: Handler, ignored: &[String]) -> Result<Self> {
        let root = CommandNode::from_clap(&command, ignored)?;
        Ok(Self {
            command,
            root,
            handler,
        })
    }
}

impl Registry for ClapRegistry {
    fn root(&self) -> &CommandNode {
        &self.root
    }

    fn invoke(&self, args: &[String], out: &mut dyn Write) -> Result<()> {
        let argv = std::iter::once(self.root.name.clone()).chain(args.iter().cloned());
        let matches = match self.command.clone().try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(err) => {
                let rendered = err.render().to_string();
                return match err.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                        out.write_all(rendered.as_bytes())?;
                        Ok(())
                    }
                    _ => Err(anyhow!("{}", rendered.trim_end())),
                };
            }
        };
        (self.handler)(&matches, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    fn tree() -> Command {
        Command::new("tool")
            .arg(Arg::new("trace").long("trace").global(true).action(ArgAction::SetTrue))
            .subcommand(
                Command::new("alpha").subcommand(
                    Command::new("beta")
                        .arg(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue))
                        .arg(Arg::new("count").long("count").value_name("N"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append))
                        .arg(
                            Arg::new("mode")
                                .long("mode")
                                .value_parser(["fast", "slow"])
                                .default_value("fast"),
                        )
                        .arg(Arg::new("file")),
                ),
            )
            .subcommand(Command::new("secret").hide(true))
            .subcommand(Command::new("interactive"))
    }

    #[test]
    fn flag_kinds_follow_clap_actions() {
        let root = CommandNode::from_clap(&tree(), &["interactive".to_string()]).expect("tree");
        assert_eq!(root.child_names(), vec!["alpha".to_string()]);
        let beta = root
            .child("alpha")
            .and_then(|alpha| alpha.child("beta"))
            .expect("beta");
        let kinds: Vec<(&str, &FlagKind)> = beta
            .flags
            .iter()
            .map(|flag| (flag.name.as_str(), &flag.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("verbose", &FlagKind::Boolean),
                ("count", &FlagKind::Integer),
                ("tag", &FlagKind::StringList),
                (
                    "mode",
                    &FlagKind::Enumerated(vec!["fast".to_string(), "slow".to_string()])
                ),
                ("trace", &FlagKind::Boolean),
            ]
        );
        let mode = beta.flags.iter().find(|f| f.name == "mode").expect("mode");
        assert_eq!(mode.default.as_deref(), Some("fast"));
    }

    #[test]
    fn unsupported_action_is_a_registry_error() {
        let command = Command::new("tool").arg(Arg::new("v").long("v").action(ArgAction::Count));
        let err = CommandNode::from_clap(&command, &[]).expect_err("count flags unsupported");
        assert!(err.to_string().contains("--v"));
    }

    fn echo_tags(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
        let tags: Vec<&String> = matches
            .subcommand_matches("alpha")
            .and_then(|m| m.subcommand_matches("beta"))
            .and_then(|m| m.get_many::<String>("tag"))
            .map(|values| values.collect())
            .unwrap_or_default();
        writeln!(out, "tags={tags:?}")?;
        Ok(())
    }

    #[test]
    fn invoke_parses_fresh_state_each_time() {
        let registry = ClapRegistry::new(tree(), echo_tags, &[]).expect("registry");
        let args = |line: &str| shell_words::split(line).expect("split");

        let mut first = Vec::new();
        registry
            .invoke(&args("alpha beta --tag=a --tag=b"), &mut first)
            .expect("first run");
        assert_eq!(String::from_utf8_lossy(&first), "tags=[\"a\", \"b\"]\n");

        let mut second = Vec::new();
        registry
            .invoke(&args("alpha beta"), &mut second)
            .expect("second run");
        assert_eq!(String::from_utf8_lossy(&second), "tags=[]\n");
    }

    #[test]
    fn invoke_reports_parse_errors() {
        let registry = ClapRegistry::new(tree(), echo_tags, &[]).expect("registry");
        let args = ["alpha", "beta", "--nope"].map(String::from);
        let err = registry
            .invoke(&args, &mut Vec::new())
            .expect_err("unknown flag");
        assert!(err.to_string().contains("--nope"));
    }
}
