use crate::{CancellationToken, is_cancelled, system::executor::ExecutionError};
use anyhow::{Result, anyhow};

/// Fails if a task that takes no arguments was given some.
pub fn ensure_no_args(task: &str, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Ok(());
    }
    Err(anyhow!(
        "'{}' {} {}",
        task,
        t!("handler.unexpected_args"),
        args.join(" ")
    ))
}

/// Checks the cancellation flag between pieces of work.
pub fn check_for_cancellation(cancellation_token: &CancellationToken) -> Result<()> {
    if is_cancelled(cancellation_token) {
        return Err(ExecutionError::Cancelled.into());
    }
    Ok(())
}
