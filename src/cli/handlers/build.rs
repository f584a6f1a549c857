use crate::{
    cli::handlers::commons,
    core::{context_resolver::RunContext, plans, task_executor},
};
use anyhow::Result;
use colored::*;

/// Entry point for `op build`: `bun install`, then `bun run build`.
pub fn handle(args: Vec<String>, ctx: &RunContext) -> Result<()> {
    commons::ensure_no_args("build", &args)?;
    commons::check_for_cancellation(&ctx.token)?;

    task_executor::run_steps(&plans::build_plan(&ctx.config), ctx)?;

    if !ctx.config.quiet {
        println!("{}", t!("task.done").green());
    }
    Ok(())
}
