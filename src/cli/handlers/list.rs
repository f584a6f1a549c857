use crate::cli::{dispatcher, handlers::commons};
use anyhow::Result;
use colored::*;

/// Entry point for `op list` (and plain `op`). Reads no project files.
pub fn handle(args: Vec<String>) -> Result<()> {
    commons::ensure_no_args("list", &args)?;

    println!("{}", t!("cli.usage").yellow().bold());
    println!();
    println!("{}", dispatcher::command_summary());
    Ok(())
}
