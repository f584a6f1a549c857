// src/bin/op.rs

use clap::Parser;
use colored::*;
use ops::{
    CancellationToken,
    cli::{Cli, dispatcher},
    constants::INTERRUPTED_EXIT_CODE,
    system::{executor::ExecutionError, signals},
    t,
};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Sets up logging and Ctrl+C handling, runs the requested task and turns its
/// outcome into the process exit status.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cancellation_token: CancellationToken = Arc::new(AtomicBool::new(false));
    signals::watch_for_interrupt(&cancellation_token);

    if let Err(e) = dispatcher::dispatch(Cli::parse(), cancellation_token) {
        // --- Centralized Error Handling ---
        if matches!(
            e.downcast_ref::<ExecutionError>(),
            Some(ExecutionError::Cancelled)
        ) {
            eprintln!("\n{}", t!("task.cancelled").yellow());
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }

        // `{:#}` keeps the failing step in front of its cause: "bun install: ...".
        eprintln!("\n{}: {:#}", t!("cli.error").red().bold(), e);
        std::process::exit(1);
    }
}
