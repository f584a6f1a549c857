use anyhow::{Result, anyhow};
use std::fmt::Write;

use crate::{
    CancellationToken,
    cli::{Cli, handlers},
    core::context_resolver::{self, RunContext},
};

/// How a command is run.
#[derive(Clone, Copy)]
pub enum CommandHandler {
    /// Runs steps in a project: the root and configuration are resolved first.
    Task(fn(Vec<String>, &RunContext) -> Result<()>),
    /// Needs no project, so a broken `ops.toml` does not get in the way.
    Standalone(fn(Vec<String>) -> Result<()>),
}

/// Defines a task, its aliases, and its handler.
pub struct CommandDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub handler: CommandHandler,
}

impl std::fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// The single source of truth for all tasks.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "build",
        aliases: &["b"],
        description: t!("task.build.desc"),
        handler: CommandHandler::Task(handlers::build::handle),
    },
    CommandDefinition {
        name: "lint",
        aliases: &["l"],
        description: t!("task.lint.desc"),
        handler: CommandHandler::Task(handlers::lint::handle),
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        description: t!("task.list.desc"),
        handler: CommandHandler::Standalone(handlers::list::handle),
    },
];

/// The task run when no command is given.
const DEFAULT_COMMAND: &str = "list";

pub fn commands() -> &'static [CommandDefinition] {
    COMMAND_REGISTRY
}

/// Finds a command definition in the registry by its name or alias.
pub fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Looks up `name` (or the default task), failing with the list of known tasks.
pub fn resolve_command(name: Option<&str>) -> Result<&'static CommandDefinition> {
    let name = name.unwrap_or(DEFAULT_COMMAND);
    find_command(name).ok_or_else(|| {
        let known: Vec<&str> = COMMAND_REGISTRY.iter().map(|cmd| cmd.name).collect();
        anyhow!(
            "{} '{}' ({}: {})",
            t!("dispatch.unknown_command"),
            name,
            t!("dispatch.known_commands"),
            known.join(", ")
        )
    })
}

/// Tasks and descriptions, one per line, for `--help` and `op list`.
pub fn command_summary() -> String {
    let width = COMMAND_REGISTRY
        .iter()
        .map(|cmd| cmd.name.len())
        .max()
        .unwrap_or_default();
    let mut summary = String::from(t!("list.header"));
    for cmd in COMMAND_REGISTRY {
        let _ = write!(summary, "\n  {:<width$}  {}", cmd.name, cmd.description, width = width);
        if !cmd.aliases.is_empty() {
            let _ = write!(summary, " ({}: {})", t!("list.aliases"), cmd.aliases.join(", "));
        }
    }
    summary
}

/// Resolves the task, then (for project tasks) the project context, then runs it.
///
/// The task is looked up first so a typo is reported even when the project
/// configuration is broken.
pub fn dispatch(cli: Cli, cancellation_token: CancellationToken) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let command = resolve_command(cli.command.as_deref())?;
    match command.handler {
        CommandHandler::Standalone(handler) => handler(cli.args),
        CommandHandler::Task(handler) => {
            let ctx = context_resolver::resolve(&cli.context_options(), cancellation_token)?;
            handler(cli.args, &ctx)
        }
    }
}
