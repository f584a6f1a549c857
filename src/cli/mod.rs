use clap::Parser;
use std::path::PathBuf;

use crate::core::context_resolver::ContextOptions;

pub mod dispatcher;
pub mod handlers;

/// op: runs the project's build and lint tasks.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = dispatcher::command_summary(),
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Project root. Defaults to the nearest directory holding `ops.toml`,
    /// `.ops/` or `package.json`.
    #[arg(long, short = 'C', env = "OPS_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Configuration file to use instead of `<root>/ops.toml`.
    #[arg(long, env = "OPS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not echo commands before running them.
    #[arg(long, short)]
    pub quiet: bool,

    /// The task to run. Lists the tasks when omitted.
    pub command: Option<String>,

    /// Arguments for the task.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn context_options(&self) -> ContextOptions {
        ContextOptions {
            root: self.root.clone(),
            config: self.config.clone(),
            quiet: self.quiet,
        }
    }
}
