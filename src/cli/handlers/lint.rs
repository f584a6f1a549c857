use crate::{
    cli::handlers::commons,
    core::{context_resolver::RunContext, plans, task_executor},
};
use anyhow::Result;
use colored::*;

/// Entry point for `op lint`.
///
/// Runs `golangci-lint run` and `go fmt` inside the task sources directory,
/// then `bun install` and `bunx prettier --check <glob>` at the project root.
pub fn handle(args: Vec<String>, ctx: &RunContext) -> Result<()> {
    commons::ensure_no_args("lint", &args)?;
    commons::check_for_cancellation(&ctx.token)?;

    task_executor::run_steps(&plans::lint_plan(&ctx.config), ctx)?;

    if !ctx.config.quiet {
        println!("{}", t!("task.done").green());
    }
    Ok(())
}
