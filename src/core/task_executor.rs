use crate::{core::context_resolver::RunContext, models::Step, system::executor::ShellContext};
use anyhow::{Context, Result};
use colored::*;

/// Runs `steps` one after another, each in a fresh shell execution context.
///
/// The first failing step aborts the sequence; its error is wrapped with the
/// step label so the message always names the step (`bun install: ...`).
pub fn run_steps(steps: &[Step], ctx: &RunContext) -> Result<()> {
    for (position, step) in steps.iter().enumerate() {
        let cwd = match &step.dir {
            Some(dir) => ctx.root.join(dir),
            None => ctx.root.clone(),
        };
        let shell = ShellContext::new(ctx.runner.as_ref(), &step.shell, &ctx.token).with_dir(cwd);

        if !ctx.config.quiet {
            println!("{} {}", "→".blue(), step.command_line().green());
        }
        log::debug!(
            "Step {}/{} '{}' in '{}'",
            position + 1,
            steps.len(),
            step.label,
            shell.cwd().display()
        );

        shell
            .exec(&step.program, &step.args)
            .with_context(|| step.label.clone())?;
    }
    Ok(())
}
